pub mod audio;
pub mod camera;
pub mod cloud;
pub mod constants;
pub mod dimension;
pub mod error;
pub mod escape;
pub mod estimator;
pub mod frame;
pub mod march;
pub mod params;
pub mod render;
pub mod session;
pub mod shading;

pub static MANDELBULB_WGSL: &str = include_str!("../shaders/mandelbulb.wgsl");

pub use audio::*;
pub use camera::*;
pub use cloud::*;
pub use dimension::*;
pub use error::ParamError;
pub use escape::*;
pub use estimator::*;
pub use frame::*;
pub use march::*;
pub use params::*;
pub use render::*;
pub use session::*;
pub use shading::{post_process, sanitize, to_rgba8, Color};
