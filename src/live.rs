//! Windowed explorer: winit event loop driving the GPU ray marcher.

use anyhow::{Context, Result};
use bulb_core::{ControlAction, Explorer, FractalParams};
use std::time::Instant;
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

use crate::cli::LiveArgs;
use crate::controls::{command_for_key, KeyCommand, HELP};
use crate::gpu::GpuState;
use crate::mic::MicInput;

const TITLE: &str = "Mandelbulb";

fn key_name(key: &Key) -> Option<&str> {
    match key {
        Key::Named(NamedKey::ArrowUp) => Some("ArrowUp"),
        Key::Named(NamedKey::ArrowDown) => Some("ArrowDown"),
        Key::Named(NamedKey::Escape) => Some("Escape"),
        Key::Named(NamedKey::Space) => Some(" "),
        Key::Character(s) => Some(s.as_str()),
        _ => None,
    }
}

pub fn run(args: &LiveArgs) -> Result<()> {
    let mut explorer = Explorer::new();
    explorer.params = FractalParams::clamped(args.fractal.power, args.fractal.iterations);
    explorer.dimension = args.fractal.dimension();
    explorer.slice = args.fractal.slice();

    let mut mic = if args.no_audio {
        None
    } else {
        match MicInput::start() {
            Ok(mic) => Some(mic),
            Err(e) => {
                log::warn!("[mic] {e:#}; using simulated audio");
                None
            }
        }
    };

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let window = WindowBuilder::new()
        .with_title(format!("{TITLE} - {}", explorer.describe()))
        .with_inner_size(winit::dpi::LogicalSize::new(args.width, args.height))
        .build(&event_loop)
        .context("Failed to create window")?;

    let mut gpu = pollster::block_on(GpuState::new(&window))?;
    log::info!("Controls:\n{HELP}");
    let mut last_frame = Instant::now();

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::Resized(size),
                ..
            } => gpu.resize(size),
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => elwt.exit(),
            Event::WindowEvent {
                event:
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                logical_key,
                                state: ElementState::Pressed,
                                ..
                            },
                        ..
                    },
                ..
            } => match key_name(&logical_key).and_then(command_for_key) {
                Some(KeyCommand::Quit) => elwt.exit(),
                Some(KeyCommand::Control(action)) => {
                    explorer.apply(action);
                    if action == ControlAction::ToggleAudio {
                        log::info!("[live] audio {}", if explorer.audio_enabled { "on" } else { "off" });
                    }
                    gpu.window
                        .set_title(&format!("{TITLE} - {}", explorer.describe()));
                }
                None => {}
            },
            Event::AboutToWait => {
                let now = Instant::now();
                let dt = (now - last_frame).as_secs_f32();
                last_frame = now;
                let energy = mic.as_mut().map(MicInput::energy);
                let frame = explorer.tick(dt, energy);
                match gpu.render(&frame) {
                    Ok(_) => gpu.window.request_redraw(),
                    Err(wgpu::SurfaceError::Lost) => gpu.resize(gpu.window.inner_size()),
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("[gpu] out of memory");
                        elwt.exit()
                    }
                    Err(e) => log::warn!("[gpu] {e:?}"),
                }
            }
            _ => {}
        })
        .context("Event loop failed")?;
    Ok(())
}
