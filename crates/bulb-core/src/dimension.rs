//! Coordinate strategies for the 3D, 4D and 5D bulbs.
//!
//! The escape-time loop is written once against [`BulbPoint`]; each dimension only supplies
//! its hyperspherical power map, its embedding of a 3D sample and its projection back to 3D.

use crate::constants::{DEFAULT_PROJECTION_DISTANCE, PROJECTION_MIN_DENOMINATOR, RADIUS_EPSILON};
use glam::{Vec3, Vec4};
use std::ops::Add;

/// Extra angle offsets added to `theta`/`phi` before they are multiplied by the power.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AngleTwist {
    pub theta: f32,
    pub phi: f32,
}

impl AngleTwist {
    pub const NONE: Self = Self { theta: 0.0, phi: 0.0 };
}

/// Fixed `w`/`v` coordinates used to lift a 3D sample into 4D/5D.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HyperSlice {
    pub w: f32,
    pub v: f32,
}

impl HyperSlice {
    pub const ORIGIN: Self = Self { w: 0.0, v: 0.0 };

    pub fn new(w: f32, v: f32) -> Self {
        Self { w, v }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Dimension {
    #[default]
    Three,
    Four,
    Five,
}

impl Dimension {
    pub fn count(self) -> u32 {
        match self {
            Dimension::Three => 3,
            Dimension::Four => 4,
            Dimension::Five => 5,
        }
    }

    pub fn from_count(n: u32) -> Option<Self> {
        match n {
            3 => Some(Dimension::Three),
            4 => Some(Dimension::Four),
            5 => Some(Dimension::Five),
            _ => None,
        }
    }
}

/// Perspective divide from a higher axis back into 3D.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub distance: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            distance: DEFAULT_PROJECTION_DISTANCE,
        }
    }
}

impl Projection {
    pub fn new(distance: f32) -> Self {
        let distance = if distance.is_finite() && distance.abs() > RADIUS_EPSILON {
            distance
        } else {
            DEFAULT_PROJECTION_DISTANCE
        };
        Self { distance }
    }

    /// `1 / (1 - w / distance)` with the denominator held at or above
    /// [`PROJECTION_MIN_DENOMINATOR`]. Coordinates at or beyond the eye plane get the
    /// maximum magnification instead of an infinite or mirrored one.
    pub fn factor(&self, w: f32) -> f32 {
        if !w.is_finite() {
            return 1.0 / PROJECTION_MIN_DENOMINATOR;
        }
        let denom = 1.0 - w / self.distance;
        1.0 / denom.max(PROJECTION_MIN_DENOMINATOR)
    }

    /// True when [`Projection::factor`] had to clamp.
    pub fn is_singular(&self, w: f32) -> bool {
        !w.is_finite() || 1.0 - w / self.distance < PROJECTION_MIN_DENOMINATOR
    }
}

/// A point the Mandelbulb iteration can run on.
pub trait BulbPoint: Copy + Add<Output = Self> + Send + Sync + 'static {
    const DIMENSION: Dimension;

    fn embed(p: Vec3, slice: HyperSlice) -> Self;

    fn length(&self) -> f32;

    /// `z^power` in hyperspherical form, given `r = |z|` already computed by the caller.
    fn spherical_power(&self, r: f32, power: f32, twist: AngleTwist) -> Self;

    /// Display position in 3D.
    fn project(&self, projection: &Projection) -> Vec3;

    fn is_finite(&self) -> bool;
}

/// `theta` of the 3D part, guarded against a zero-length vector.
#[inline]
fn polar(z: f32, r3: f32) -> f32 {
    (z / r3.max(RADIUS_EPSILON)).clamp(-1.0, 1.0).acos()
}

impl BulbPoint for Vec3 {
    const DIMENSION: Dimension = Dimension::Three;

    fn embed(p: Vec3, _slice: HyperSlice) -> Self {
        p
    }

    fn length(&self) -> f32 {
        Vec3::length(*self)
    }

    fn spherical_power(&self, r: f32, power: f32, twist: AngleTwist) -> Self {
        let theta = (polar(self.z, r) + twist.theta) * power;
        let phi = (self.y.atan2(self.x) + twist.phi) * power;
        let zr = r.powf(power);
        let (st, ct) = theta.sin_cos();
        let (sp, cp) = phi.sin_cos();
        zr * Vec3::new(st * cp, st * sp, ct)
    }

    fn project(&self, _projection: &Projection) -> Vec3 {
        *self
    }

    fn is_finite(&self) -> bool {
        Vec3::is_finite(*self)
    }
}

impl BulbPoint for Vec4 {
    const DIMENSION: Dimension = Dimension::Four;

    fn embed(p: Vec3, slice: HyperSlice) -> Self {
        p.extend(slice.w)
    }

    fn length(&self) -> f32 {
        Vec4::length(*self)
    }

    fn spherical_power(&self, r: f32, power: f32, twist: AngleTwist) -> Self {
        let r3 = self.truncate().length();
        let theta = (polar(self.z, r3) + twist.theta) * power;
        let phi = (self.y.atan2(self.x) + twist.phi) * power;
        let psi = r3.atan2(self.w) * power;
        let zr = r.powf(power);
        let (st, ct) = theta.sin_cos();
        let (sp, cp) = phi.sin_cos();
        let (ss, cs) = psi.sin_cos();
        zr * Vec4::new(ss * st * cp, ss * st * sp, ss * ct, cs)
    }

    fn project(&self, projection: &Projection) -> Vec3 {
        self.truncate() * projection.factor(self.w)
    }

    fn is_finite(&self) -> bool {
        Vec4::is_finite(*self)
    }
}

/// Five-component point for the 5D bulb.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec5 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
    pub v: f32,
}

impl Vec5 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32, w: f32, v: f32) -> Self {
        Self { x, y, z, w, v }
    }

    pub fn xyz(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w + self.v * self.v
    }
}

impl Add for Vec5 {
    type Output = Self;

    fn add(self, o: Self) -> Self {
        Self::new(self.x + o.x, self.y + o.y, self.z + o.z, self.w + o.w, self.v + o.v)
    }
}

impl BulbPoint for Vec5 {
    const DIMENSION: Dimension = Dimension::Five;

    fn embed(p: Vec3, slice: HyperSlice) -> Self {
        Self::new(p.x, p.y, p.z, slice.w, slice.v)
    }

    fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    fn spherical_power(&self, r: f32, power: f32, twist: AngleTwist) -> Self {
        let r3 = self.xyz().length();
        let r4 = (r3 * r3 + self.w * self.w).sqrt();
        let theta = (polar(self.z, r3) + twist.theta) * power;
        let phi = (self.y.atan2(self.x) + twist.phi) * power;
        let psi = r3.atan2(self.w) * power;
        let chi = r4.atan2(self.v) * power;
        let zr = r.powf(power);
        let (st, ct) = theta.sin_cos();
        let (sp, cp) = phi.sin_cos();
        let (ss, cs) = psi.sin_cos();
        let (sc, cc) = chi.sin_cos();
        Self::new(
            zr * sc * ss * st * cp,
            zr * sc * ss * st * sp,
            zr * sc * ss * ct,
            zr * sc * cs,
            zr * cc,
        )
    }

    fn project(&self, projection: &Projection) -> Vec3 {
        // v collapses into 4D first, then w into 3D
        let fv = projection.factor(self.v);
        let fw = projection.factor(self.w * fv);
        self.xyz() * fv * fw
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.z.is_finite()
            && self.w.is_finite()
            && self.v.is_finite()
    }
}
