//! Immutable per-frame snapshot handed to renderers, and its GPU uniform layout.

use crate::audio::AudioEnergy;
use crate::camera::{CameraFrame, OrbitCamera};
use crate::dimension::{BulbPoint, Dimension, HyperSlice};
use crate::estimator::Modulation;
use crate::march::Scene;
use crate::params::{Appearance, FractalParams, MarchSettings};
use bytemuck::{Pod, Zeroable};

pub const FLAG_SOFT_SHADOWS: u32 = 1;
pub const FLAG_AMBIENT_OCCLUSION: u32 = 1 << 1;

/// Everything needed to draw one frame. Built by [`crate::Explorer::tick`] or by hand for
/// headless renders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInputs {
    pub time: f32,
    pub params: FractalParams,
    pub march: MarchSettings,
    pub appearance: Appearance,
    pub audio: AudioEnergy,
    pub camera: CameraFrame,
    pub dimension: Dimension,
    pub slice: HyperSlice,
}

impl FrameInputs {
    /// Silent frame with default settings seen from the default orbit camera.
    pub fn still(params: FractalParams) -> Self {
        Self {
            time: 0.0,
            params,
            march: MarchSettings::default(),
            appearance: Appearance::default(),
            audio: AudioEnergy::SILENT,
            camera: OrbitCamera::default().frame(),
            dimension: Dimension::Three,
            slice: HyperSlice::ORIGIN,
        }
    }

    pub fn modulation(&self) -> Modulation {
        Modulation::new(self.time, self.audio, self.appearance.audio_reactivity)
    }

    pub fn scene<P: BulbPoint>(&self) -> Scene<P> {
        Scene::new(
            self.params,
            self.march,
            self.appearance,
            self.modulation(),
            self.slice,
        )
    }

    pub fn uniforms(&self, width: u32, height: u32) -> FrameUniforms {
        let mut flags = 0;
        if self.appearance.soft_shadows {
            flags |= FLAG_SOFT_SHADOWS;
        }
        if self.appearance.ambient_occlusion {
            flags |= FLAG_AMBIENT_OCCLUSION;
        }
        FrameUniforms {
            resolution: [width.max(1) as f32, height.max(1) as f32],
            time: self.time,
            power: self.params.power(),
            eye: self.camera.eye.to_array(),
            iterations: self.params.iterations(),
            target: self.camera.target.to_array(),
            bailout: self.params.bailout(),
            audio: self.audio.clamped().to_array(),
            slice: [self.slice.w, self.slice.v],
            dimension: self.dimension.count(),
            max_steps: self.march.max_steps,
            max_dist: self.march.max_dist,
            surface_epsilon: self.march.surface_epsilon,
            detail: self.march.detail,
            glow_intensity: self.appearance.glow_intensity,
            color_shift: self.appearance.color_shift,
            focal_length: self.camera.focal_length,
            flags,
            reactivity: self.appearance.audio_reactivity,
        }
    }
}

/// Uniform block of `mandelbulb.wgsl` (group 0, binding 0). Field order matches WGSL
/// alignment so no padding is needed.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub resolution: [f32; 2],
    pub time: f32,
    pub power: f32,
    pub eye: [f32; 3],
    pub iterations: u32,
    pub target: [f32; 3],
    pub bailout: f32,
    /// bass, mid, treble, level
    pub audio: [f32; 4],
    pub slice: [f32; 2],
    pub dimension: u32,
    pub max_steps: u32,
    pub max_dist: f32,
    pub surface_epsilon: f32,
    pub detail: f32,
    pub glow_intensity: f32,
    pub color_shift: f32,
    pub focal_length: f32,
    pub flags: u32,
    pub reactivity: f32,
}

impl FrameUniforms {
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;
}
