use glam::Vec3;

// Shared fractal/render tuning constants used by the CPU renderers and the shader uniforms.

// Escape-time iteration
pub const BAILOUT_RADIUS: f32 = 2.0; // orbit magnitude that counts as escaped (inclusive)
pub const RADIUS_EPSILON: f32 = 1.0e-6; // divisor guard for r == 0
pub const DEFAULT_POWER: f32 = 8.0;
pub const MIN_POWER: f32 = 1.0;
pub const MAX_POWER: f32 = 16.0;
pub const DEFAULT_ITERATIONS: u32 = 16;
pub const MIN_ITERATIONS: u32 = 1;
pub const MAX_ITERATIONS: u32 = 32; // hard cap so every orbit terminates
pub const ENCLOSING_MARGIN: f32 = 0.02; // keeps the enclosing sphere strictly inside the bailout sphere

// Ray marching
pub const DEFAULT_MAX_STEPS: u32 = 128;
pub const MAX_STEPS_LIMIT: u32 = 1024;
pub const DEFAULT_MAX_DIST: f32 = 20.0;
pub const DEFAULT_SURFACE_EPSILON: f32 = 0.001;
pub const NORMAL_EPSILON: f32 = 0.001; // central-difference offset
pub const DEFAULT_DETAIL: f32 = 0.8; // step multiplier (< 1 is more conservative)
pub const MIN_DETAIL: f32 = 0.1;
pub const MAX_DETAIL: f32 = 2.0;

// Shading
pub const LIGHT_POSITION: Vec3 = Vec3::new(2.0, 3.0, -2.0);
pub const BACKGROUND_COLOR: Vec3 = Vec3::new(0.05, 0.02, 0.1);
pub const AMBIENT_WEIGHT: f32 = 0.2;
pub const DIFFUSE_WEIGHT: f32 = 0.6;
pub const SPECULAR_WEIGHT: f32 = 0.4;
pub const SPECULAR_EXPONENT: f32 = 32.0;
pub const FRESNEL_WEIGHT: f32 = 0.3;
pub const SUBSURFACE_WEIGHT: f32 = 0.2;
pub const SHADOW_STEPS: u32 = 64;
pub const SHADOW_SOFTNESS: f32 = 8.0;
pub const OCCLUSION_TAPS: u32 = 5;
pub const DEFAULT_GLOW_INTENSITY: f32 = 0.5;
pub const MAX_GLOW_INTENSITY: f32 = 2.0;
pub const DEFAULT_AUDIO_REACTIVITY: f32 = 1.0;
pub const MAX_AUDIO_REACTIVITY: f32 = 2.0;

// Camera
pub const DEFAULT_ZOOM: f32 = 3.0; // orbit radius
pub const MIN_ZOOM: f32 = 1.2;
pub const MAX_ZOOM: f32 = 10.0;
pub const CAMERA_HEIGHT_RATIO: f32 = 0.3; // eye height as a fraction of the orbit radius
pub const AUTO_ROTATE_RAD_PER_SEC: f32 = 0.18;
pub const FOCAL_LENGTH: f32 = 1.5;
pub const AUDIO_WOBBLE: f32 = 0.1;

// Hyperdimensional projection
pub const DEFAULT_PROJECTION_DISTANCE: f32 = 5.0;
pub const PROJECTION_MIN_DENOMINATOR: f32 = 0.05; // caps magnification at 20x
pub const HYPER_SLICE_LIMIT: f32 = 2.0; // |w|, |v| range exposed to controls

// Point clouds
pub const DEFAULT_SHELL_RADIUS: f32 = 1.5;
pub const DEFAULT_SHELL_RESOLUTION: u32 = 40;
pub const MAX_SHELL_RESOLUTION: u32 = 4096; // latitude rings; longitudes are twice this
