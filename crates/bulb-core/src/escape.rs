//! Escape-time membership test.

use crate::dimension::{AngleTwist, BulbPoint};
use crate::params::FractalParams;

/// How an orbit ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Escape {
    /// `|z|` reached the bailout radius at the start of iteration `iteration` (0-based).
    Escaped { iteration: u32, radius: f32 },
    /// The orbit stayed inside for every iteration; `radius` is the last magnitude checked.
    Bounded { radius: f32 },
}

impl Escape {
    pub fn is_bounded(&self) -> bool {
        matches!(self, Escape::Bounded { .. })
    }

    pub fn iteration(&self) -> Option<u32> {
        match self {
            Escape::Escaped { iteration, .. } => Some(*iteration),
            Escape::Bounded { .. } => None,
        }
    }
}

/// Orbit summary shared by the membership test and the distance estimator.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Orbit {
    pub escaped_at: Option<u32>,
    pub radius: f32,
    pub derivative: f32,
}

/// Iterate `z -> z^power + c` from `z = c`. The escape check is inclusive (`r >= bailout`).
pub(crate) fn orbit<P: BulbPoint>(
    c: P,
    power: f32,
    iterations: u32,
    bailout: f32,
    twist: AngleTwist,
) -> Orbit {
    let mut z = c;
    let mut dr = 1.0_f32;
    let mut r = 0.0_f32;
    for i in 0..iterations {
        r = z.length();
        if r >= bailout || !r.is_finite() {
            return Orbit {
                escaped_at: Some(i),
                radius: r,
                derivative: dr,
            };
        }
        dr = power * r.powf(power - 1.0) * dr + 1.0;
        z = z.spherical_power(r, power, twist) + c;
    }
    Orbit {
        escaped_at: None,
        radius: r,
        derivative: dr,
    }
}

pub fn escape_time<P: BulbPoint>(point: P, params: &FractalParams) -> Escape {
    let o = orbit(
        point,
        params.power(),
        params.iterations(),
        params.bailout(),
        AngleTwist::NONE,
    );
    match o.escaped_at {
        Some(iteration) => Escape::Escaped {
            iteration,
            radius: o.radius,
        },
        None => Escape::Bounded { radius: o.radius },
    }
}

/// True when the orbit of `point` stays within the bailout radius for every iteration.
#[inline]
pub fn member<P: BulbPoint>(point: P, params: &FractalParams) -> bool {
    escape_time(point, params).is_bounded()
}
