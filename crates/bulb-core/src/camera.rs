//! Orbit camera and the per-frame look-at frame used to build primary rays.

use crate::audio::AudioEnergy;
use crate::constants::*;
use crate::march::Ray;
use glam::{Vec2, Vec3};

/// Camera circling the origin at a fixed height ratio.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitCamera {
    /// Azimuth in radians.
    pub angle: f32,
    pub zoom: f32,
    pub height_ratio: f32,
    pub auto_rotate: bool,
    /// Radians per second while `auto_rotate` is on.
    pub rotate_speed: f32,
    pub target: Vec3,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            angle: 0.0,
            zoom: DEFAULT_ZOOM,
            height_ratio: CAMERA_HEIGHT_RATIO,
            auto_rotate: true,
            rotate_speed: AUTO_ROTATE_RAD_PER_SEC,
            target: Vec3::ZERO,
        }
    }
}

impl OrbitCamera {
    pub fn eye(&self) -> Vec3 {
        let (s, c) = self.angle.sin_cos();
        self.target + Vec3::new(self.zoom * c, self.zoom * self.height_ratio, self.zoom * s)
    }

    pub fn advance(&mut self, dt: f32) {
        if self.auto_rotate && dt.is_finite() && dt > 0.0 {
            self.angle = (self.angle + self.rotate_speed * dt).rem_euclid(std::f32::consts::TAU);
        }
    }

    /// Multiply the orbit radius by `factor`, staying within the zoom limits.
    pub fn zoom_by(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    pub fn frame(&self) -> CameraFrame {
        CameraFrame {
            eye: self.eye(),
            target: self.target,
            focal_length: FOCAL_LENGTH,
        }
    }
}

/// Eye, target and focal length for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraFrame {
    pub eye: Vec3,
    pub target: Vec3,
    pub focal_length: f32,
}

impl CameraFrame {
    /// Shake the eye with bass and mids.
    pub fn with_audio_wobble(mut self, time: f32, audio: AudioEnergy) -> Self {
        self.eye += Vec3::new(
            (time * 2.0).sin() * audio.bass * AUDIO_WOBBLE,
            (time * 1.5).cos() * audio.mid * AUDIO_WOBBLE,
            0.0,
        );
        self
    }

    /// Right, up and forward unit vectors (`cu`, `cv`, `cw`).
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let cw = (self.target - self.eye).try_normalize().unwrap_or(Vec3::NEG_Z);
        let cu = cw
            .cross(Vec3::Y)
            .try_normalize()
            .unwrap_or(Vec3::X);
        let cv = cu.cross(cw);
        (cu, cv, cw)
    }

    /// Centred screen coordinate of pixel `(x, y)` with `y` growing downwards in image rows
    /// and upwards in `uv`. The shorter side spans `[-0.5, 0.5]` when the image is landscape.
    pub fn pixel_uv(x: f32, y: f32, width: u32, height: u32) -> Vec2 {
        let res = Vec2::new(width.max(1) as f32, height.max(1) as f32);
        let frag = Vec2::new(x, res.y - y);
        (frag - res * 0.5) / res.y
    }

    pub fn ray_for_uv(&self, uv: Vec2) -> Ray {
        let (cu, cv, cw) = self.basis();
        Ray::new(self.eye, cu * uv.x + cv * uv.y + cw * self.focal_length)
    }

    /// Primary ray through the centre of pixel `(px, py)`.
    pub fn ray_for_pixel(&self, px: u32, py: u32, width: u32, height: u32) -> Ray {
        self.ray_for_uv(Self::pixel_uv(px as f32 + 0.5, py as f32 + 0.5, width, height))
    }
}
