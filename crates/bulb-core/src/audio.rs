//! Band energies consumed by the fractal modulation and shading.
//!
//! Capturing audio and computing a spectrum belongs to the front-end; the core only turns a
//! normalized magnitude spectrum into the three bands the visuals react to.

/// Per-frame audio energies, each normalized to `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AudioEnergy {
    pub bass: f32,
    pub mid: f32,
    pub treble: f32,
    pub level: f32,
}

impl AudioEnergy {
    pub const SILENT: Self = Self {
        bass: 0.0,
        mid: 0.0,
        treble: 0.0,
        level: 0.0,
    };

    /// Split a magnitude spectrum (values in `[0, 1]`, lowest bin first) into bass, mid and
    /// treble averages. With 64 bins the bands are `0..8`, `8..32` and `32..64`; other sizes
    /// scale proportionally.
    pub fn from_spectrum(bins: &[f32], level: f32) -> Self {
        let len = bins.len();
        let bass_end = (len / 8).max(1).min(len);
        let mid_end = (len / 2).max(bass_end).min(len);
        Self {
            bass: band_average(&bins[..bass_end]),
            mid: band_average(&bins[bass_end..mid_end]),
            treble: band_average(&bins[mid_end..]),
            level,
        }
        .clamped()
    }

    /// Slow sine drift used when no microphone is available.
    pub fn simulated(time: f32) -> Self {
        Self {
            bass: ((time * 0.5).sin() * 0.5 + 0.5) * 0.3,
            mid: ((time * 0.7).cos() * 0.5 + 0.5) * 0.3,
            treble: ((time * 1.3).sin() * 0.5 + 0.5) * 0.3,
            level: 0.2,
        }
    }

    /// Clamp every band into `[0, 1]`; NaN becomes silence.
    pub fn clamped(self) -> Self {
        Self {
            bass: unit(self.bass),
            mid: unit(self.mid),
            treble: unit(self.treble),
            level: unit(self.level),
        }
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self {
            bass: self.bass * factor,
            mid: self.mid * factor,
            treble: self.treble * factor,
            level: self.level * factor,
        }
        .clamped()
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.bass, self.mid, self.treble, self.level]
    }
}

/// Exponential smoothing between successive analyses (0 = no smoothing).
#[derive(Clone, Debug)]
pub struct EnergySmoother {
    smoothing: f32,
    current: AudioEnergy,
}

impl EnergySmoother {
    pub fn new(smoothing: f32) -> Self {
        Self {
            smoothing: unit(smoothing).min(0.99),
            current: AudioEnergy::SILENT,
        }
    }

    pub fn update(&mut self, target: AudioEnergy) -> AudioEnergy {
        let a = self.smoothing;
        let t = target.clamped();
        let c = self.current;
        self.current = AudioEnergy {
            bass: c.bass * a + t.bass * (1.0 - a),
            mid: c.mid * a + t.mid * (1.0 - a),
            treble: c.treble * a + t.treble * (1.0 - a),
            level: c.level * a + t.level * (1.0 - a),
        };
        self.current
    }

    pub fn current(&self) -> AudioEnergy {
        self.current
    }
}

#[inline]
fn unit(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

fn band_average(bins: &[f32]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    bins.iter().map(|v| unit(*v)).sum::<f32>() / bins.len() as f32
}
