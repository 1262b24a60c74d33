//! CPU mirror of the shader: one primary ray per pixel, rows traced in parallel.

use crate::camera::CameraFrame;
use crate::dimension::{BulbPoint, Dimension, Vec5};
use crate::frame::FrameInputs;
use crate::march::Scene;
use crate::shading::{post_process, to_rgba8};
use glam::{Vec3, Vec4};
use rayon::prelude::*;

/// March counters accumulated over an image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub hits: u64,
    pub misses: u64,
    pub total_steps: u64,
}

impl RenderStats {
    pub fn merge(self, other: Self) -> Self {
        Self {
            hits: self.hits + other.hits,
            misses: self.misses + other.misses,
            total_steps: self.total_steps + other.total_steps,
        }
    }

    pub fn pixels(&self) -> u64 {
        self.hits + self.misses
    }

    pub fn mean_steps(&self) -> f32 {
        if self.pixels() == 0 {
            0.0
        } else {
            self.total_steps as f32 / self.pixels() as f32
        }
    }
}

/// Row-major RGBA8 image.
#[derive(Clone, Debug)]
pub struct RenderedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    pub stats: RenderStats,
}

pub fn render_image(frame: &FrameInputs, width: u32, height: u32) -> RenderedImage {
    let width = width.max(1);
    let height = height.max(1);
    let (pixels, stats) = match frame.dimension {
        Dimension::Three => render_with::<Vec3>(frame, width, height),
        Dimension::Four => render_with::<Vec4>(frame, width, height),
        Dimension::Five => render_with::<Vec5>(frame, width, height),
    };
    log::debug!(
        "[render] {}x{} {}D hits={} misses={} mean_steps={:.1}",
        width,
        height,
        frame.dimension.count(),
        stats.hits,
        stats.misses,
        stats.mean_steps()
    );
    RenderedImage {
        width,
        height,
        pixels,
        stats,
    }
}

fn render_with<P: BulbPoint>(frame: &FrameInputs, width: u32, height: u32) -> (Vec<u8>, RenderStats) {
    let scene: Scene<P> = frame.scene();
    let camera = frame.camera;
    let audio = frame.audio;
    let mut pixels = vec![0u8; width as usize * height as usize * 4];

    let stats = pixels
        .par_chunks_mut(width as usize * 4)
        .enumerate()
        .map(|(y, row)| {
            let mut stats = RenderStats::default();
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let uv = CameraFrame::pixel_uv(x as f32 + 0.5, y as f32 + 0.5, width, height);
                let traced = scene.trace(&camera.ray_for_uv(uv));
                px.copy_from_slice(&to_rgba8(post_process(traced.color, uv, audio)));
                if traced.outcome.is_hit() {
                    stats.hits += 1;
                } else {
                    stats.misses += 1;
                }
                stats.total_steps += traced.outcome.steps() as u64;
            }
            stats
        })
        .reduce(RenderStats::default, RenderStats::merge);

    (pixels, stats)
}
