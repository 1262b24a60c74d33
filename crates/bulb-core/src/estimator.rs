//! Mandelbulb distance estimator with optional audio/time modulation.

use crate::audio::AudioEnergy;
use crate::constants::{ENCLOSING_MARGIN, MAX_POWER, MIN_POWER, RADIUS_EPSILON};
use crate::dimension::{AngleTwist, BulbPoint};
use crate::escape::orbit;
use crate::params::FractalParams;

/// Visual perturbations of the iteration driven by time and audio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Modulation {
    pub time: f32,
    pub audio: AudioEnergy,
    /// Scales every audio term; 0 disables modulation entirely.
    pub reactivity: f32,
}

impl Default for Modulation {
    fn default() -> Self {
        Self::NONE
    }
}

impl Modulation {
    pub const NONE: Self = Self {
        time: 0.0,
        audio: AudioEnergy::SILENT,
        reactivity: 0.0,
    };

    pub fn new(time: f32, audio: AudioEnergy, reactivity: f32) -> Self {
        Self {
            time,
            audio: audio.clamped(),
            reactivity: reactivity.max(0.0),
        }
    }

    /// Audio after reactivity scaling; silent when reactivity is zero.
    pub fn effective_audio(&self) -> AudioEnergy {
        if self.reactivity > 0.0 {
            self.audio.scaled(self.reactivity)
        } else {
            AudioEnergy::SILENT
        }
    }

    /// Bass makes the power breathe around its base value.
    pub fn power(&self, base: f32) -> f32 {
        let bass = self.effective_audio().bass;
        if bass == 0.0 {
            return base;
        }
        (base + (self.time * 0.5 + bass * 5.0).sin() * bass).clamp(MIN_POWER, MAX_POWER)
    }

    /// Mids wobble `theta`, trebles wobble `phi`.
    pub fn twist(&self) -> AngleTwist {
        let e = self.effective_audio();
        AngleTwist {
            theta: e.mid * 0.1 * (self.time * 2.0).sin(),
            phi: e.treble * 0.1 * (self.time * 3.0).cos(),
        }
    }
}

/// Full result of one estimator evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceEstimate {
    pub distance: f32,
    /// Iteration at which the orbit escaped, `None` if it stayed bounded.
    pub escape_iteration: Option<u32>,
    pub radius: f32,
    pub derivative: f32,
}

/// Radius of a sphere that contains every member of the set.
///
/// Once two iterations run, a member `c` needs `|c|^p - |c| < bailout`, so none lies
/// beyond `(2 * bailout)^(1/p)` when that is inside the bailout sphere. The margin keeps
/// the sphere strictly inside the bailout sphere so marching rays cross into it.
pub fn enclosing_radius(power: f32, iterations: u32, bailout: f32) -> f32 {
    let radius = if iterations >= 2 {
        bailout.min((2.0 * bailout).powf(1.0 / power.max(MIN_POWER)))
    } else {
        bailout
    };
    radius.min(bailout - ENCLOSING_MARGIN)
}

pub fn estimate<P: BulbPoint>(
    point: P,
    params: &FractalParams,
    modulation: &Modulation,
) -> DistanceEstimate {
    let power = modulation.power(params.power());
    let o = orbit(
        point,
        power,
        params.iterations(),
        params.bailout(),
        modulation.twist(),
    );
    let r = o.radius;
    let mut distance = 0.5 * r.max(RADIUS_EPSILON).ln() * r / o.derivative;
    // Far outside, the single-step estimate grows like r ln r; the enclosing sphere bounds it.
    if o.escaped_at == Some(0) && r.is_finite() {
        distance = distance.min(r - enclosing_radius(power, params.iterations(), params.bailout()));
    }
    DistanceEstimate {
        distance: if distance.is_finite() { distance } else { 0.0 },
        escape_iteration: o.escaped_at,
        radius: r,
        derivative: o.derivative,
    }
}

/// Conservative lower bound on the distance from `point` to the bulb surface.
/// Negative or zero inside the set.
#[inline]
pub fn distance_estimate<P: BulbPoint>(
    point: P,
    params: &FractalParams,
    modulation: &Modulation,
) -> f32 {
    estimate(point, params, modulation).distance
}
