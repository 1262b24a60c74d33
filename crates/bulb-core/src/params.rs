//! Typed, range-checked settings passed by value into every evaluation.
//!
//! Nothing here is read implicitly: the host builds these once per frame (usually via
//! [`crate::Explorer`]) and threads them through the pure functions.

use crate::constants::*;
use crate::error::{check_range, clamp_or, ParamError};

/// Mandelbulb iteration parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FractalParams {
    power: f32,
    iterations: u32,
    bailout: f32,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            power: DEFAULT_POWER,
            iterations: DEFAULT_ITERATIONS,
            bailout: BAILOUT_RADIUS,
        }
    }
}

impl FractalParams {
    /// Validated constructor with the conventional bailout radius of 2.
    pub fn new(power: f32, iterations: u32) -> Result<Self, ParamError> {
        if !power.is_finite() {
            return Err(ParamError::NotFinite {
                name: "power",
                value: power,
            });
        }
        if !(MIN_POWER..=MAX_POWER).contains(&power) {
            return Err(ParamError::PowerOutOfRange {
                value: power,
                min: MIN_POWER,
                max: MAX_POWER,
            });
        }
        if !(MIN_ITERATIONS..=MAX_ITERATIONS).contains(&iterations) {
            return Err(ParamError::IterationsOutOfRange {
                value: iterations,
                min: MIN_ITERATIONS,
                max: MAX_ITERATIONS,
            });
        }
        Ok(Self {
            power,
            iterations,
            bailout: BAILOUT_RADIUS,
        })
    }

    /// Slider-style constructor: out-of-range input is pulled to the nearest valid value.
    pub fn clamped(power: f32, iterations: u32) -> Self {
        Self {
            power: clamp_or(power, MIN_POWER, MAX_POWER, DEFAULT_POWER),
            iterations: iterations.clamp(MIN_ITERATIONS, MAX_ITERATIONS),
            bailout: BAILOUT_RADIUS,
        }
    }

    /// Override the bailout radius. Only 2.0 keeps the distance estimate conservative;
    /// other values are accepted for experimentation.
    pub fn with_bailout(self, bailout: f32) -> Result<Self, ParamError> {
        let bailout = check_range("bailout", bailout, 1.0, 16.0)?;
        Ok(Self { bailout, ..self })
    }

    pub fn power(&self) -> f32 {
        self.power
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn bailout(&self) -> f32 {
        self.bailout
    }
}

/// Sphere-tracing limits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarchSettings {
    pub max_steps: u32,
    pub max_dist: f32,
    pub surface_epsilon: f32,
    /// Multiplier applied to every distance estimate before stepping.
    pub detail: f32,
}

impl Default for MarchSettings {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            max_dist: DEFAULT_MAX_DIST,
            surface_epsilon: DEFAULT_SURFACE_EPSILON,
            detail: DEFAULT_DETAIL,
        }
    }
}

impl MarchSettings {
    pub fn new(max_steps: u32, max_dist: f32, surface_epsilon: f32, detail: f32) -> Result<Self, ParamError> {
        let settings = Self {
            max_steps,
            max_dist,
            surface_epsilon,
            detail,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ParamError> {
        check_range("max_steps", self.max_steps as f32, 1.0, MAX_STEPS_LIMIT as f32)?;
        check_range("max_dist", self.max_dist, 1.0e-3, 1.0e4)?;
        check_range("surface_epsilon", self.surface_epsilon, 1.0e-7, 1.0)?;
        check_range("detail", self.detail, MIN_DETAIL, MAX_DETAIL)?;
        Ok(())
    }

    pub fn with_detail(self, detail: f32) -> Self {
        Self {
            detail: clamp_or(detail, MIN_DETAIL, MAX_DETAIL, DEFAULT_DETAIL),
            ..self
        }
    }
}

/// Look-and-feel knobs that never change the fractal's shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Appearance {
    pub color_shift: f32,
    pub glow_intensity: f32,
    pub audio_reactivity: f32,
    pub soft_shadows: bool,
    pub ambient_occlusion: bool,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            color_shift: 0.0,
            glow_intensity: DEFAULT_GLOW_INTENSITY,
            audio_reactivity: DEFAULT_AUDIO_REACTIVITY,
            soft_shadows: false,
            ambient_occlusion: false,
        }
    }
}

impl Appearance {
    pub fn validate(&self) -> Result<(), ParamError> {
        check_range("color_shift", self.color_shift, -1.0e3, 1.0e3)?;
        check_range("glow_intensity", self.glow_intensity, 0.0, MAX_GLOW_INTENSITY)?;
        check_range("audio_reactivity", self.audio_reactivity, 0.0, MAX_AUDIO_REACTIVITY)?;
        Ok(())
    }

    pub fn with_glow(self, glow_intensity: f32) -> Self {
        Self {
            glow_intensity: clamp_or(glow_intensity, 0.0, MAX_GLOW_INTENSITY, DEFAULT_GLOW_INTENSITY),
            ..self
        }
    }
}
