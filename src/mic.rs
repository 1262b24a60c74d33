//! Microphone capture (cpal). The input callback only appends mono samples to a shared
//! ring; analysis happens on the render thread.

use anyhow::{anyhow, Context, Result};
use bulb_core::AudioEnergy;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::spectrum::{AudioAnalyzer, SampleRing};

pub struct MicInput {
    // dropping the stream stops capture
    _stream: cpal::Stream,
    ring: Arc<Mutex<SampleRing>>,
    analyzer: AudioAnalyzer,
}

impl MicInput {
    pub fn start() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| anyhow!("No audio input device"))?;
        let config = device
            .default_input_config()
            .context("No default input config")?;
        let channels = config.channels() as usize;
        log::info!(
            "[mic] {} @ {} Hz, {} ch, {:?}",
            device.name().unwrap_or_else(|_| "unknown".into()),
            config.sample_rate().0,
            channels,
            config.sample_format()
        );

        let analyzer = AudioAnalyzer::default();
        let ring = Arc::new(Mutex::new(SampleRing::new(analyzer.window_len())));
        let err_fn = |err: cpal::StreamError| log::error!("[mic] stream error: {err}");

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => {
                build_input_stream::<f32>(&device, &config.into(), channels, Arc::clone(&ring), err_fn)
            }
            cpal::SampleFormat::I16 => {
                build_input_stream::<i16>(&device, &config.into(), channels, Arc::clone(&ring), err_fn)
            }
            cpal::SampleFormat::U16 => {
                build_input_stream::<u16>(&device, &config.into(), channels, Arc::clone(&ring), err_fn)
            }
            other => return Err(anyhow!("Unsupported sample format {other:?}")),
        }
        .context("Failed to build input stream")?;
        stream.play().context("Failed to start input stream")?;

        Ok(Self {
            _stream: stream,
            ring,
            analyzer,
        })
    }

    /// Smoothed energies of the most recent window.
    pub fn energy(&mut self) -> AudioEnergy {
        let samples = lock(&self.ring).snapshot();
        self.analyzer.analyze(&samples)
    }
}

trait ToUnit: Copy {
    fn to_unit(self) -> f32;
}

impl ToUnit for f32 {
    fn to_unit(self) -> f32 {
        self
    }
}

impl ToUnit for i16 {
    fn to_unit(self) -> f32 {
        self as f32 / i16::MAX as f32
    }
}

impl ToUnit for u16 {
    fn to_unit(self) -> f32 {
        self as f32 / u16::MAX as f32 * 2.0 - 1.0
    }
}

fn build_input_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    ring: Arc<Mutex<SampleRing>>,
    err_fn: impl Fn(cpal::StreamError) + Send + 'static,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: ToUnit + cpal::SizedSample,
{
    let channels = channels.max(1);
    device.build_input_stream(
        config,
        move |data: &[T], _| {
            let mut guard = lock(&ring);
            guard.extend(
                data.chunks(channels)
                    .map(|frame| frame.iter().map(|s| s.to_unit()).sum::<f32>() / frame.len() as f32),
            );
        },
        err_fn,
        None,
    )
}

// A poisoned lock still holds usable samples.
fn lock(ring: &Mutex<SampleRing>) -> MutexGuard<'_, SampleRing> {
    ring.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
