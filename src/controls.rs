//! Keyboard mapping for the live explorer. Keys use DOM-style names (`"ArrowUp"`, `" "`,
//! `"Escape"`, or the typed character) so the table stays independent of the windowing crate.

use bulb_core::{ControlAction, Dimension};

pub const POWER_STEP: f32 = 0.5;
pub const ZOOM_STEP: f32 = 1.1;
pub const DETAIL_STEP: f32 = 0.05;
pub const GLOW_STEP: f32 = 0.1;
pub const COLOR_STEP: f32 = 0.5;
pub const SLICE_STEP: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyCommand {
    Control(ControlAction),
    Quit,
}

#[inline]
pub fn dimension_for_digit(key: &str) -> Option<Dimension> {
    match key {
        "3" => Some(Dimension::Three),
        "4" => Some(Dimension::Four),
        "5" => Some(Dimension::Five),
        _ => None,
    }
}

pub fn command_for_key(key: &str) -> Option<KeyCommand> {
    if let Some(dimension) = dimension_for_digit(key) {
        return Some(KeyCommand::Control(ControlAction::SetDimension(dimension)));
    }
    let action = match key {
        "Escape" => return Some(KeyCommand::Quit),
        "ArrowUp" => ControlAction::AdjustPower(POWER_STEP),
        "ArrowDown" => ControlAction::AdjustPower(-POWER_STEP),
        "]" => ControlAction::AdjustIterations(1),
        "[" => ControlAction::AdjustIterations(-1),
        // zooming in shrinks the orbit
        "+" | "=" => ControlAction::Zoom(1.0 / ZOOM_STEP),
        "-" | "_" => ControlAction::Zoom(ZOOM_STEP),
        "." => ControlAction::AdjustDetail(DETAIL_STEP),
        "," => ControlAction::AdjustDetail(-DETAIL_STEP),
        "g" => ControlAction::AdjustGlow(GLOW_STEP),
        "G" => ControlAction::AdjustGlow(-GLOW_STEP),
        "c" | "C" => ControlAction::ShiftColor(COLOR_STEP),
        "w" => ControlAction::AdjustSlice {
            dw: SLICE_STEP,
            dv: 0.0,
        },
        "W" => ControlAction::AdjustSlice {
            dw: -SLICE_STEP,
            dv: 0.0,
        },
        "v" => ControlAction::AdjustSlice {
            dw: 0.0,
            dv: SLICE_STEP,
        },
        "V" => ControlAction::AdjustSlice {
            dw: 0.0,
            dv: -SLICE_STEP,
        },
        " " => ControlAction::ToggleAutoRotate,
        "a" | "A" => ControlAction::ToggleAudio,
        "s" | "S" => ControlAction::ToggleShadows,
        "o" | "O" => ControlAction::ToggleOcclusion,
        "r" | "R" => ControlAction::Reset,
        _ => return None,
    };
    Some(KeyCommand::Control(action))
}

pub const HELP: &str = "\
up/down power | [ ] iterations | + - zoom | , . detail | g/G glow | c colour
3 4 5 dimension | w/W v/V slice | space rotate | a audio | s shadows | o occlusion
r reset | esc quit";
