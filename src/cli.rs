//! Command-line interface: argument types and the headless subcommands.

use anyhow::{Context, Result};
use bulb_core::constants::*;
use bulb_core::{
    distance_estimate, escape_time, render_image, scatter_shell, sweep_shell, Appearance,
    AudioEnergy, BulbPoint, Dimension, Escape, FractalParams, FrameInputs, HyperSlice,
    MarchSettings, Modulation, OrbitCamera, PointCloud, Projection, ShellSweep, Vec5,
};
use clap::{Args, Parser, Subcommand};
use glam::{Vec3, Vec4};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

use crate::export;

#[derive(Parser, Debug)]
#[command(name = "bulb-viz")]
#[command(about = "Audio-reactive 3D/4D/5D Mandelbulb explorer", long_about = None)]
pub struct Cli {
    /// Defaults to `live` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open a window and ray march on the GPU, reacting to the microphone
    Live(LiveArgs),
    /// Ray march one frame on the CPU and save it as PNG
    Render(RenderArgs),
    /// Export the points inside the bulb as an ASCII PLY point cloud
    Cloud(CloudArgs),
    /// Print membership, escape iteration and distance estimate for one point
    Inspect(InspectArgs),
}

/// Shape of the bulb, shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct FractalArgs {
    /// Exponent of the power map, 1 to 16
    #[arg(long, default_value_t = DEFAULT_POWER)]
    pub power: f32,

    /// Escape-time iterations, 1 to 32
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: u32,

    /// 3, 4 or 5
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(3..=5))]
    pub dimension: u32,

    /// Fourth coordinate of the 3D slice (4D and 5D)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub w: f32,

    /// Fifth coordinate of the 3D slice (5D)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub v: f32,
}

impl Default for FractalArgs {
    fn default() -> Self {
        Self {
            power: DEFAULT_POWER,
            iterations: DEFAULT_ITERATIONS,
            dimension: 3,
            w: 0.0,
            v: 0.0,
        }
    }
}

impl FractalArgs {
    pub fn params(&self) -> Result<FractalParams> {
        FractalParams::new(self.power, self.iterations).context("Invalid fractal parameters")
    }

    pub fn dimension(&self) -> Dimension {
        Dimension::from_count(self.dimension).unwrap_or_default()
    }

    pub fn slice(&self) -> HyperSlice {
        HyperSlice::new(self.w, self.v)
    }
}

#[derive(Args, Debug, Clone)]
pub struct LiveArgs {
    /// Do not open the microphone; use simulated energies
    #[arg(long)]
    pub no_audio: bool,

    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    #[arg(long, default_value_t = 720)]
    pub height: u32,

    #[command(flatten)]
    pub fractal: FractalArgs,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Output PNG file path
    #[arg(short, long, default_value = "mandelbulb.png")]
    pub output: PathBuf,

    #[arg(long, default_value_t = 800)]
    pub width: u32,

    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Animation time in seconds (drives colour drift and audio modulation)
    #[arg(long, default_value_t = 0.0)]
    pub time: f32,

    #[command(flatten)]
    pub fractal: FractalArgs,

    /// Orbit radius of the camera
    #[arg(long, default_value_t = DEFAULT_ZOOM)]
    pub zoom: f32,

    /// Orbit angle of the camera in radians
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub angle: f32,

    /// Step multiplier, 0.1 to 2
    #[arg(long, default_value_t = DEFAULT_DETAIL)]
    pub detail: f32,

    #[arg(long, default_value_t = DEFAULT_GLOW_INTENSITY)]
    pub glow: f32,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub color_shift: f32,

    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    pub max_steps: u32,

    /// Soft shadows (slow)
    #[arg(long)]
    pub shadows: bool,

    /// Ambient occlusion
    #[arg(long)]
    pub occlusion: bool,

    /// Modulate with the simulated audio energies at `--time`
    #[arg(long)]
    pub simulated_audio: bool,
}

impl RenderArgs {
    pub fn frame(&self) -> Result<FrameInputs> {
        let march = MarchSettings::new(
            self.max_steps,
            DEFAULT_MAX_DIST,
            DEFAULT_SURFACE_EPSILON,
            self.detail,
        )
        .context("Invalid march settings")?;
        let appearance = Appearance {
            color_shift: self.color_shift,
            glow_intensity: self.glow,
            soft_shadows: self.shadows,
            ambient_occlusion: self.occlusion,
            ..Appearance::default()
        };
        appearance.validate().context("Invalid appearance")?;
        let camera = OrbitCamera {
            angle: self.angle,
            zoom: self.zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            ..OrbitCamera::default()
        };
        let audio = if self.simulated_audio {
            AudioEnergy::simulated(self.time)
        } else {
            AudioEnergy::SILENT
        };
        Ok(FrameInputs {
            time: self.time,
            params: self.fractal.params()?,
            march,
            appearance,
            audio,
            camera: camera.frame().with_audio_wobble(self.time, audio),
            dimension: self.fractal.dimension(),
            slice: self.fractal.slice(),
        })
    }
}

#[derive(Args, Debug, Clone)]
pub struct CloudArgs {
    /// Output PLY file path
    #[arg(short, long, default_value = "mandelbulb.ply")]
    pub output: PathBuf,

    /// Latitude steps per shell (longitude uses twice as many)
    #[arg(
        long,
        default_value_t = DEFAULT_SHELL_RESOLUTION,
        value_parser = clap::value_parser!(u32).range(1..=MAX_SHELL_RESOLUTION as i64)
    )]
    pub resolution: u32,

    #[arg(long, default_value_t = 8)]
    pub layers: u32,

    #[arg(long, default_value_t = 0.3)]
    pub inner: f32,

    #[arg(long, default_value_t = DEFAULT_SHELL_RADIUS)]
    pub outer: f32,

    /// Amplitude of the swept w/v coordinates (4D and 5D)
    #[arg(long, default_value_t = 0.5)]
    pub hyper_amplitude: f32,

    /// Angular wobble of the sweep in radians
    #[arg(long, default_value_t = 0.0)]
    pub distortion: f32,

    #[arg(long, default_value_t = 0.0)]
    pub time: f32,

    /// Draw N random shell samples instead of the regular sweep
    #[arg(long)]
    pub random: Option<usize>,

    /// Seed for `--random`
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Eye distance along the extra axes for the perspective divide
    #[arg(long, default_value_t = DEFAULT_PROJECTION_DISTANCE)]
    pub projection_distance: f32,

    #[command(flatten)]
    pub fractal: FractalArgs,
}

impl CloudArgs {
    pub fn build(&self) -> Result<PointCloud> {
        let params = self.fractal.params()?;
        let projection = Projection::new(self.projection_distance);
        let cloud = match self.fractal.dimension() {
            Dimension::Three => self.build_for::<Vec3>(&params, &projection),
            Dimension::Four => self.build_for::<Vec4>(&params, &projection),
            Dimension::Five => self.build_for::<Vec5>(&params, &projection),
        };
        Ok(cloud)
    }

    fn build_for<P: BulbPoint>(&self, params: &FractalParams, projection: &Projection) -> PointCloud {
        match self.random {
            Some(count) => {
                let mut rng = StdRng::seed_from_u64(self.seed);
                scatter_shell::<P, _>(
                    &mut rng,
                    count,
                    self.inner,
                    self.outer,
                    self.fractal.slice(),
                    params,
                    projection,
                )
            }
            None => {
                let sweep = ShellSweep {
                    resolution: self.resolution,
                    layers: self.layers,
                    inner_radius: self.inner,
                    outer_radius: self.outer,
                    hyper_amplitude: self.hyper_amplitude,
                    distortion: self.distortion,
                    time: self.time,
                };
                sweep_shell::<P>(&sweep, params, projection)
            }
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[arg(allow_negative_numbers = true)]
    pub x: f32,
    #[arg(allow_negative_numbers = true)]
    pub y: f32,
    #[arg(allow_negative_numbers = true)]
    pub z: f32,

    #[command(flatten)]
    pub fractal: FractalArgs,
}

/// Escape-time result and distance estimate at one sample point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InspectReport {
    pub escape: Escape,
    pub distance: f32,
}

impl InspectReport {
    fn at<P: BulbPoint>(point: P, params: &FractalParams) -> Self {
        Self {
            escape: escape_time(point, params),
            distance: distance_estimate(point, params, &Modulation::NONE),
        }
    }
}

impl std::fmt::Display for InspectReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.escape {
            Escape::Bounded { radius } => {
                write!(f, "inside (|z| = {radius:.4})")?;
            }
            Escape::Escaped { iteration, radius } => {
                write!(f, "outside, escaped at iteration {iteration} (|z| = {radius:.4})")?;
            }
        }
        write!(f, ", distance estimate {:.6}", self.distance)
    }
}

impl InspectArgs {
    pub fn report(&self) -> Result<InspectReport> {
        let params = self.fractal.params()?;
        let p = Vec3::new(self.x, self.y, self.z);
        let slice = self.fractal.slice();
        Ok(match self.fractal.dimension() {
            Dimension::Three => InspectReport::at(<Vec3 as BulbPoint>::embed(p, slice), &params),
            Dimension::Four => InspectReport::at(<Vec4 as BulbPoint>::embed(p, slice), &params),
            Dimension::Five => InspectReport::at(Vec5::embed(p, slice), &params),
        })
    }
}

pub fn run_render(args: &RenderArgs) -> Result<()> {
    let frame = args.frame()?;
    let started = std::time::Instant::now();
    let image = render_image(&frame, args.width, args.height);
    log::info!(
        "Rendered {}x{} in {:.2?} ({} hits, {} misses, {:.1} steps/pixel)",
        image.width,
        image.height,
        started.elapsed(),
        image.stats.hits,
        image.stats.misses,
        image.stats.mean_steps()
    );
    export::save_png(&image, &args.output)?;
    log::info!("Wrote {}", args.output.display());
    Ok(())
}

pub fn run_cloud(args: &CloudArgs) -> Result<()> {
    let cloud = args.build()?;
    log::info!(
        "Kept {} of {} samples ({} dropped as non-finite)",
        cloud.points.len(),
        cloud.tested,
        cloud.dropped
    );
    export::save_ply(&cloud, &args.output)?;
    log::info!("Wrote {}", args.output.display());
    Ok(())
}

pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let report = args.report()?;
    println!("{report}");
    Ok(())
}
