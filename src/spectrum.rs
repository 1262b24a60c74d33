//! Turns raw microphone samples into band energies.
//!
//! The capture side only pushes mono samples into a [`SampleRing`]; once per frame the
//! render loop copies the newest window out and runs it through an [`AudioAnalyzer`].

use bulb_core::{AudioEnergy, EnergySmoother};
use realfft::{RealFftPlanner, RealToComplex};
use std::collections::VecDeque;
use std::f32::consts::TAU;
use std::fmt;
use std::sync::Arc;

pub const SPECTRUM_BINS: usize = 64;
pub const DEFAULT_WINDOW: usize = 1024;
pub const DEFAULT_SMOOTHING: f32 = 0.8;

/// Fixed-capacity FIFO of the most recent samples.
#[derive(Clone, Debug)]
pub struct SampleRing {
    capacity: usize,
    samples: VecDeque<f32>,
}

impl SampleRing {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, sample: f32) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(if sample.is_finite() { sample } else { 0.0 });
    }

    pub fn extend<I: IntoIterator<Item = f32>>(&mut self, samples: I) {
        for s in samples {
            self.push(s);
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Oldest-first copy, zero padded at the front until the ring has filled.
    pub fn snapshot(&self) -> Vec<f32> {
        let mut out = vec![0.0; self.capacity - self.samples.len()];
        out.extend(self.samples.iter().copied());
        out
    }
}

/// Hann-windowed magnitude spectrum folded into [`SPECTRUM_BINS`] bins.
#[derive(Clone)]
pub struct AudioAnalyzer {
    window: Vec<f32>,
    fft: Arc<dyn RealToComplex<f32>>,
    smoother: EnergySmoother,
}

impl fmt::Debug for AudioAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioAnalyzer")
            .field("window_len", &self.window.len())
            .field("smoother", &self.smoother)
            .finish()
    }
}

impl AudioAnalyzer {
    pub fn new(window_len: usize, smoothing: f32) -> Self {
        let n = window_len.max(SPECTRUM_BINS * 2);
        let window = (0..n)
            .map(|i| 0.5 - 0.5 * (TAU * i as f32 / n as f32).cos())
            .collect();
        let fft = RealFftPlanner::<f32>::new().plan_fft_forward(n);
        Self {
            window,
            fft,
            smoother: EnergySmoother::new(smoothing),
        }
    }

    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// Magnitudes in `[0, 1]` for [`SPECTRUM_BINS`] equal-width bands below Nyquist.
    /// A full-scale sine centred on an FFT bin reads 1.0 in its band. Short input is
    /// zero padded at the front.
    pub fn spectrum(&self, samples: &[f32]) -> Vec<f32> {
        let n = self.window.len();
        let half = n / 2;
        let per_bin = (half / SPECTRUM_BINS).max(1);
        let norm = n as f32 / 4.0;

        let mut input = self.fft.make_input_vec();
        let tail = &samples[samples.len().saturating_sub(n)..];
        let offset = n - tail.len();
        for (i, s) in tail.iter().enumerate() {
            input[offset + i] = s * self.window[offset + i];
        }
        let mut output = self.fft.make_output_vec();
        if let Err(err) = self.fft.process(&mut input, &mut output) {
            log::warn!("[audio] fft failed: {err}");
            return vec![0.0; SPECTRUM_BINS];
        }

        let mut bins = vec![0.0_f32; SPECTRUM_BINS];
        for (b, bin) in bins.iter_mut().enumerate() {
            let peak = output[b * per_bin..((b + 1) * per_bin).min(half)]
                .iter()
                .map(|c| c.norm() / norm)
                .fold(0.0_f32, f32::max);
            *bin = if peak.is_finite() { peak.min(1.0) } else { 0.0 };
        }
        bins
    }

    /// Root mean square of the analysis window, in `[0, 1]`.
    pub fn level(&self, samples: &[f32]) -> f32 {
        let n = self.window.len().min(samples.len());
        if n == 0 {
            return 0.0;
        }
        let tail = &samples[samples.len() - n..];
        let rms = (tail.iter().map(|s| s * s).sum::<f32>() / n as f32).sqrt();
        if rms.is_finite() {
            rms.min(1.0)
        } else {
            0.0
        }
    }

    /// Unsmoothed band energies for `samples`.
    pub fn energy(&self, samples: &[f32]) -> AudioEnergy {
        AudioEnergy::from_spectrum(&self.spectrum(samples), self.level(samples))
    }

    /// Band energies smoothed against previous calls.
    pub fn analyze(&mut self, samples: &[f32]) -> AudioEnergy {
        let target = self.energy(samples);
        self.smoother.update(target)
    }
}

impl Default for AudioAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW, DEFAULT_SMOOTHING)
    }
}
