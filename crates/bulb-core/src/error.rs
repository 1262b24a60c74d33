//! Parameter validation errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("power {value} outside [{min}, {max}]")]
    PowerOutOfRange { value: f32, min: f32, max: f32 },

    #[error("iterations {value} outside [{min}, {max}]")]
    IterationsOutOfRange { value: u32, min: u32, max: u32 },

    #[error("{name} = {value} outside [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f32 },
}

pub(crate) fn check_range(name: &'static str, value: f32, min: f32, max: f32) -> Result<f32, ParamError> {
    if !value.is_finite() {
        return Err(ParamError::NotFinite { name, value });
    }
    if value < min || value > max {
        return Err(ParamError::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(value)
}

/// Clamp into `[min, max]`, falling back to `fallback` for NaN/infinite input.
#[inline]
pub(crate) fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}
