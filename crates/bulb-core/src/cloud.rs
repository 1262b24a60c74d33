//! Point-cloud extraction: sample spherical shells and keep the samples inside the bulb.

use crate::audio::AudioEnergy;
use crate::constants::{DEFAULT_SHELL_RADIUS, DEFAULT_SHELL_RESOLUTION, MAX_SHELL_RESOLUTION};
use crate::dimension::{BulbPoint, HyperSlice, Projection};
use crate::escape::member;
use crate::params::FractalParams;
use crate::shading::palette;
use glam::Vec3;
use rand::Rng;
use rayon::prelude::*;
use std::f32::consts::{PI, TAU};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CloudPoint {
    /// Position after projection to 3D.
    pub position: Vec3,
    /// Magnitude of the sample before projection.
    pub radius: f32,
    /// Extra coordinate the sample was taken at (0 for the 3D bulb).
    pub w: f32,
    pub color: [u8; 3],
}

#[derive(Clone, Debug, Default)]
pub struct PointCloud {
    pub points: Vec<CloudPoint>,
    /// Members whose projection was not finite.
    pub dropped: usize,
    /// Samples tested.
    pub tested: usize,
}

impl PointCloud {
    fn absorb(mut self, other: PointCloud) -> Self {
        self.points.extend(other.points);
        self.dropped += other.dropped;
        self.tested += other.tested;
        self
    }

    fn push_sample<P: BulbPoint>(
        &mut self,
        sample: P,
        w: f32,
        params: &FractalParams,
        projection: &Projection,
        max_radius: f32,
    ) {
        self.tested += 1;
        if !member(sample, params) {
            return;
        }
        let position = sample.project(projection);
        if !position.is_finite() {
            self.dropped += 1;
            return;
        }
        let radius = sample.length();
        let c = palette(radius / max_radius.max(1.0e-3), position, 0.0, 0.0, AudioEnergy::SILENT)
            .clamp(Vec3::ZERO, Vec3::ONE);
        self.points.push(CloudPoint {
            position,
            radius,
            w,
            color: [
                (c.x * 255.0) as u8,
                (c.y * 255.0) as u8,
                (c.z * 255.0) as u8,
            ],
        });
    }
}

/// Latitude/longitude sweep over concentric shells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShellSweep {
    /// Latitude steps; longitude uses twice as many.
    pub resolution: u32,
    pub layers: u32,
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Amplitude of the `w`/`v` coordinates; ignored for the 3D bulb.
    pub hyper_amplitude: f32,
    /// Angular wobble in radians, animated by `time`.
    pub distortion: f32,
    pub time: f32,
}

impl Default for ShellSweep {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_SHELL_RESOLUTION,
            layers: 8,
            inner_radius: 0.3,
            outer_radius: DEFAULT_SHELL_RADIUS,
            hyper_amplitude: 0.5,
            distortion: 0.0,
            time: 0.0,
        }
    }
}

impl ShellSweep {
    /// Latitude rings actually swept, in `[1, MAX_SHELL_RESOLUTION]`.
    pub fn rings(&self) -> u32 {
        self.resolution.clamp(1, MAX_SHELL_RESOLUTION)
    }

    fn layer_radius(&self, layer: u32) -> f32 {
        let (lo, hi) = ordered(self.inner_radius, self.outer_radius);
        if self.layers <= 1 {
            return 0.5 * (lo + hi);
        }
        lo + (hi - lo) * layer as f32 / (self.layers - 1) as f32
    }
}

pub fn sweep_shell<P: BulbPoint>(
    sweep: &ShellSweep,
    params: &FractalParams,
    projection: &Projection,
) -> PointCloud {
    let resolution = sweep.rings();
    let (_, max_radius) = ordered(sweep.inner_radius, sweep.outer_radius);
    let d_theta = (sweep.time).sin() * sweep.distortion;
    let d_phi = (sweep.time).cos() * sweep.distortion;

    let cloud = (0..sweep.layers.max(1))
        .into_par_iter()
        .map(|layer| {
            let r = sweep.layer_radius(layer);
            let mut part = PointCloud::default();
            for lat in 0..resolution {
                for lon in 0..resolution * 2 {
                    let theta = PI * lat as f32 / resolution as f32 + d_theta;
                    let phi = TAU * lon as f32 / (resolution * 2) as f32 + d_phi;
                    let (st, ct) = theta.sin_cos();
                    let (sp, cp) = phi.sin_cos();
                    let p = Vec3::new(r * st * cp, r * st * sp, r * ct);
                    let slice = HyperSlice::new(
                        sweep.hyper_amplitude * (theta + phi).sin(),
                        sweep.hyper_amplitude * (theta - phi).cos(),
                    );
                    part.push_sample(P::embed(p, slice), slice.w, params, projection, max_radius);
                }
            }
            part
        })
        .reduce(PointCloud::default, PointCloud::absorb);

    if cloud.dropped > 0 {
        log::debug!("[cloud] dropped {} non-finite projections", cloud.dropped);
    }
    cloud
}

/// `count` uniformly distributed samples in the shell between `inner` and `outer`.
pub fn scatter_shell<P: BulbPoint, R: Rng>(
    rng: &mut R,
    count: usize,
    inner: f32,
    outer: f32,
    slice: HyperSlice,
    params: &FractalParams,
    projection: &Projection,
) -> PointCloud {
    let (lo, hi) = ordered(inner, outer);
    let mut cloud = PointCloud::default();
    for _ in 0..count {
        let z: f32 = rng.gen_range(-1.0..=1.0);
        let phi: f32 = rng.gen_range(0.0..TAU);
        let r: f32 = rng.gen_range(lo..=hi);
        let s = (1.0 - z * z).max(0.0).sqrt();
        let p = Vec3::new(s * phi.cos(), s * phi.sin(), z) * r;
        cloud.push_sample(P::embed(p, slice), slice.w, params, projection, hi);
    }
    if cloud.dropped > 0 {
        log::debug!("[cloud] dropped {} non-finite projections", cloud.dropped);
    }
    cloud
}

fn ordered(a: f32, b: f32) -> (f32, f32) {
    let a = if a.is_finite() { a.max(0.0) } else { 0.0 };
    let b = if b.is_finite() { b.max(0.0) } else { DEFAULT_SHELL_RADIUS };
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
