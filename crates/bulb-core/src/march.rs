//! Sphere tracing against a distance field, and the Mandelbulb scene that feeds it.

use crate::constants::NORMAL_EPSILON;
use crate::dimension::{BulbPoint, HyperSlice};
use crate::estimator::{distance_estimate, Modulation};
use crate::params::{Appearance, FractalParams, MarchSettings};
use crate::shading::{self, Color};
use glam::Vec3;
use std::marker::PhantomData;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Normalizes `direction`; a zero or non-finite direction looks down `-Z`.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        let direction = direction.try_normalize().unwrap_or(Vec3::NEG_Z);
        Self { origin, direction }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarchOutcome {
    /// Within `surface_epsilon` of the surface after `steps` field evaluations.
    Hit {
        position: Vec3,
        distance: f32,
        steps: u32,
    },
    /// Left `max_dist` or ran out of steps.
    Miss { distance: f32, steps: u32 },
}

impl MarchOutcome {
    pub fn steps(&self) -> u32 {
        match self {
            MarchOutcome::Hit { steps, .. } | MarchOutcome::Miss { steps, .. } => *steps,
        }
    }

    pub fn distance(&self) -> f32 {
        match self {
            MarchOutcome::Hit { distance, .. } | MarchOutcome::Miss { distance, .. } => *distance,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, MarchOutcome::Hit { .. })
    }
}

/// Advance along `ray` by `field(p) * detail` until the surface, `max_dist` or `max_steps`.
/// Always terminates after at most `max_steps` evaluations of `field`.
pub fn march<F>(ray: &Ray, settings: &MarchSettings, field: F) -> MarchOutcome
where
    F: Fn(Vec3) -> f32,
{
    let mut t = 0.0_f32;
    for step in 0..settings.max_steps {
        let p = ray.at(t);
        let d = field(p) * settings.detail;
        // NaN means a degenerate sample: stop here rather than drift
        if d.is_nan() || d < settings.surface_epsilon {
            return MarchOutcome::Hit {
                position: p,
                distance: t,
                steps: step + 1,
            };
        }
        t += d;
        if t > settings.max_dist {
            return MarchOutcome::Miss {
                distance: t,
                steps: step + 1,
            };
        }
    }
    MarchOutcome::Miss {
        distance: t,
        steps: settings.max_steps,
    }
}

/// Central-difference gradient of `field` at `p` (six samples), normalized.
pub fn surface_normal<F>(p: Vec3, eps: f32, field: F) -> Vec3
where
    F: Fn(Vec3) -> f32,
{
    let ex = Vec3::new(eps, 0.0, 0.0);
    let ey = Vec3::new(0.0, eps, 0.0);
    let ez = Vec3::new(0.0, 0.0, eps);
    let g = Vec3::new(
        field(p + ex) - field(p - ex),
        field(p + ey) - field(p - ey),
        field(p + ez) - field(p - ez),
    );
    g.try_normalize()
        .or_else(|| p.try_normalize())
        .unwrap_or(Vec3::Y)
}

/// Result of tracing one ray through a [`Scene`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Traced {
    pub color: Color,
    pub outcome: MarchOutcome,
}

/// Everything one frame's rays share, for a bulb living in the space of `P`.
#[derive(Clone, Copy, Debug)]
pub struct Scene<P: BulbPoint> {
    pub params: FractalParams,
    pub march: MarchSettings,
    pub appearance: Appearance,
    pub modulation: Modulation,
    pub slice: HyperSlice,
    _space: PhantomData<P>,
}

impl<P: BulbPoint> Scene<P> {
    pub fn new(
        params: FractalParams,
        march: MarchSettings,
        appearance: Appearance,
        modulation: Modulation,
        slice: HyperSlice,
    ) -> Self {
        Self {
            params,
            march,
            appearance,
            modulation,
            slice,
            _space: PhantomData,
        }
    }

    /// Unmodulated, default-looking scene.
    pub fn plain(params: FractalParams) -> Self {
        Self::new(
            params,
            MarchSettings::default(),
            Appearance::default(),
            Modulation::NONE,
            HyperSlice::ORIGIN,
        )
    }

    /// Distance estimate for a 3D position, lifted through the slice.
    #[inline]
    pub fn field(&self, p: Vec3) -> f32 {
        distance_estimate(P::embed(p, self.slice), &self.params, &self.modulation)
    }

    pub fn normal(&self, p: Vec3) -> Vec3 {
        surface_normal(p, NORMAL_EPSILON, |q| self.field(q))
    }

    pub fn trace(&self, ray: &Ray) -> Traced {
        let outcome = march(ray, &self.march, |p| self.field(p));
        let mut color = match outcome {
            MarchOutcome::Hit {
                position, steps, ..
            } => shading::shade_hit(self, ray, position, steps),
            MarchOutcome::Miss { steps, .. } => shading::background(self, steps),
        };
        color += shading::step_glow(self, outcome.steps());
        Traced {
            color: shading::sanitize(color),
            outcome,
        }
    }
}

/// Trace one ray and return its linear (pre-tone-mapping) colour.
pub fn ray_march<P: BulbPoint>(ray: &Ray, scene: &Scene<P>) -> Color {
    scene.trace(ray).color
}
