//! Interactive exploration state.
//!
//! The host owns one [`Explorer`], feeds it [`ControlAction`]s from the keyboard and calls
//! [`Explorer::tick`] once per frame to get an immutable [`FrameInputs`] for the renderer.

use crate::audio::AudioEnergy;
use crate::camera::OrbitCamera;
use crate::constants::HYPER_SLICE_LIMIT;
use crate::dimension::{Dimension, HyperSlice};
use crate::frame::FrameInputs;
use crate::params::{Appearance, FractalParams, MarchSettings};
use std::f32::consts::TAU;

/// One discrete user adjustment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlAction {
    AdjustPower(f32),
    AdjustIterations(i32),
    /// Multiplies the orbit radius.
    Zoom(f32),
    AdjustDetail(f32),
    AdjustGlow(f32),
    ShiftColor(f32),
    SetDimension(Dimension),
    AdjustSlice { dw: f32, dv: f32 },
    ToggleAutoRotate,
    ToggleAudio,
    ToggleShadows,
    ToggleOcclusion,
    Reset,
}

#[derive(Clone, Debug)]
pub struct Explorer {
    pub params: FractalParams,
    pub march: MarchSettings,
    pub appearance: Appearance,
    pub camera: OrbitCamera,
    pub dimension: Dimension,
    pub slice: HyperSlice,
    pub audio_enabled: bool,
    time: f32,
    last_audio: AudioEnergy,
}

impl Default for Explorer {
    fn default() -> Self {
        Self {
            params: FractalParams::default(),
            march: MarchSettings::default(),
            appearance: Appearance::default(),
            camera: OrbitCamera::default(),
            dimension: Dimension::Three,
            slice: HyperSlice::ORIGIN,
            audio_enabled: true,
            time: 0.0,
            last_audio: AudioEnergy::SILENT,
        }
    }
}

impl Explorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Advance the clock and camera by `dt` seconds and capture the next frame.
    /// `live_audio` is `None` when no microphone is running; simulated energies are used then.
    pub fn tick(&mut self, dt: f32, live_audio: Option<AudioEnergy>) -> FrameInputs {
        if dt.is_finite() && dt > 0.0 {
            self.time += dt;
            self.camera.advance(dt);
        }
        self.last_audio = if self.audio_enabled {
            live_audio
                .map(AudioEnergy::clamped)
                .unwrap_or_else(|| AudioEnergy::simulated(self.time))
        } else {
            AudioEnergy::SILENT
        };
        self.snapshot()
    }

    /// Frame for the current state without advancing time.
    pub fn snapshot(&self) -> FrameInputs {
        let audio = self.last_audio;
        let wobble = audio.scaled(self.appearance.audio_reactivity);
        FrameInputs {
            time: self.time,
            params: self.params,
            march: self.march,
            appearance: self.appearance,
            audio,
            camera: self.camera.frame().with_audio_wobble(self.time, wobble),
            dimension: self.dimension,
            slice: self.slice,
        }
    }

    pub fn apply(&mut self, action: ControlAction) {
        match action {
            ControlAction::AdjustPower(delta) => {
                self.params =
                    FractalParams::clamped(self.params.power() + delta, self.params.iterations());
            }
            ControlAction::AdjustIterations(delta) => {
                let iterations = self.params.iterations().saturating_add_signed(delta);
                self.params = FractalParams::clamped(self.params.power(), iterations);
            }
            ControlAction::Zoom(factor) => self.camera.zoom_by(factor),
            ControlAction::AdjustDetail(delta) => {
                self.march = self.march.with_detail(self.march.detail + delta);
            }
            ControlAction::AdjustGlow(delta) => {
                self.appearance = self.appearance.with_glow(self.appearance.glow_intensity + delta);
            }
            ControlAction::ShiftColor(delta) => {
                if delta.is_finite() {
                    self.appearance.color_shift = (self.appearance.color_shift + delta).rem_euclid(TAU);
                }
            }
            ControlAction::SetDimension(dimension) => self.dimension = dimension,
            ControlAction::AdjustSlice { dw, dv } => {
                self.slice = HyperSlice::new(
                    nudge(self.slice.w, dw, HYPER_SLICE_LIMIT),
                    nudge(self.slice.v, dv, HYPER_SLICE_LIMIT),
                );
            }
            ControlAction::ToggleAutoRotate => self.camera.auto_rotate = !self.camera.auto_rotate,
            ControlAction::ToggleAudio => self.audio_enabled = !self.audio_enabled,
            ControlAction::ToggleShadows => {
                self.appearance.soft_shadows = !self.appearance.soft_shadows;
            }
            ControlAction::ToggleOcclusion => {
                self.appearance.ambient_occlusion = !self.appearance.ambient_occlusion;
            }
            ControlAction::Reset => self.reset(),
        }
        log::debug!("[explorer] {:?} -> {}", action, self.describe());
    }

    /// Restore every setting to its default. The clock keeps running.
    pub fn reset(&mut self) {
        let time = self.time;
        *self = Self::default();
        self.time = time;
    }

    /// One-line summary for window titles and logs.
    pub fn describe(&self) -> String {
        format!(
            "{}D power {:.1} iter {} detail {:.2} glow {:.2} w {:.2} v {:.2}{}",
            self.dimension.count(),
            self.params.power(),
            self.params.iterations(),
            self.march.detail,
            self.appearance.glow_intensity,
            self.slice.w,
            self.slice.v,
            if self.audio_enabled { "" } else { " (muted)" },
        )
    }
}

fn nudge(value: f32, delta: f32, limit: f32) -> f32 {
    if delta.is_finite() {
        (value + delta).clamp(-limit, limit)
    } else {
        value
    }
}
