//! Native front-end for the Mandelbulb explorer: CLI, file export, keyboard mapping and
//! microphone analysis. The windowed GPU path is behind the `live` feature.

pub mod cli;
pub mod controls;
pub mod export;
pub mod spectrum;

#[cfg(feature = "live")]
pub mod gpu;
#[cfg(feature = "live")]
pub mod live;
#[cfg(feature = "live")]
pub mod mic;
