// Explorer state machine and orbit camera.

use bulb_core::constants::*;
use bulb_core::*;
use glam::{Vec2, Vec3};
use std::f32::consts::TAU;

#[test]
fn tick_advances_clock_and_camera() {
    let mut explorer = Explorer::new();
    let frame = explorer.tick(0.5, None);
    assert_eq!(explorer.time(), 0.5);
    assert_eq!(frame.time, 0.5);
    assert!((explorer.camera.angle - 0.5 * AUTO_ROTATE_RAD_PER_SEC).abs() < 1.0e-6);
    assert_eq!(frame.audio, AudioEnergy::simulated(0.5));
}

#[test]
fn non_positive_dt_is_ignored() {
    let mut explorer = Explorer::new();
    explorer.tick(-1.0, None);
    explorer.tick(f32::NAN, None);
    assert_eq!(explorer.time(), 0.0);
    assert_eq!(explorer.camera.angle, 0.0);
}

#[test]
fn live_audio_replaces_the_simulation() {
    let mut explorer = Explorer::new();
    let live = AudioEnergy {
        bass: 0.9,
        mid: 1.5,
        treble: 0.1,
        level: 0.4,
    };
    let frame = explorer.tick(0.1, Some(live));
    assert_eq!(frame.audio, live.clamped());
}

#[test]
fn muted_audio_is_silent_and_still() {
    let mut explorer = Explorer::new();
    explorer.apply(ControlAction::ToggleAudio);
    assert!(!explorer.audio_enabled);
    let frame = explorer.tick(0.25, Some(AudioEnergy::simulated(1.0)));
    assert_eq!(frame.audio, AudioEnergy::SILENT);
    assert_eq!(frame.camera.eye, explorer.camera.eye());
    assert!(explorer.describe().ends_with("(muted)"));
}

#[test]
fn controls_clamp_to_their_ranges() {
    let mut explorer = Explorer::new();
    explorer.apply(ControlAction::AdjustPower(100.0));
    assert_eq!(explorer.params.power(), MAX_POWER);
    explorer.apply(ControlAction::AdjustPower(-100.0));
    assert_eq!(explorer.params.power(), MIN_POWER);

    explorer.apply(ControlAction::AdjustIterations(-100));
    assert_eq!(explorer.params.iterations(), MIN_ITERATIONS);
    explorer.apply(ControlAction::AdjustIterations(100));
    assert_eq!(explorer.params.iterations(), MAX_ITERATIONS);

    explorer.apply(ControlAction::Zoom(100.0));
    assert_eq!(explorer.camera.zoom, MAX_ZOOM);
    explorer.apply(ControlAction::Zoom(0.0001));
    assert_eq!(explorer.camera.zoom, MIN_ZOOM);

    explorer.apply(ControlAction::AdjustSlice { dw: 5.0, dv: -5.0 });
    assert_eq!(explorer.slice, HyperSlice::new(HYPER_SLICE_LIMIT, -HYPER_SLICE_LIMIT));

    explorer.apply(ControlAction::AdjustDetail(10.0));
    assert_eq!(explorer.march.detail, MAX_DETAIL);
    explorer.apply(ControlAction::AdjustGlow(10.0));
    assert_eq!(explorer.appearance.glow_intensity, MAX_GLOW_INTENSITY);
}

#[test]
fn colour_shift_wraps() {
    let mut explorer = Explorer::new();
    for _ in 0..20 {
        explorer.apply(ControlAction::ShiftColor(0.5));
    }
    let shift = explorer.appearance.color_shift;
    assert!((0.0..TAU).contains(&shift));
    assert!((shift - 10.0_f32.rem_euclid(TAU)).abs() < 1.0e-4);
}

#[test]
fn toggles_and_dimension_switches() {
    let mut explorer = Explorer::new();
    explorer.apply(ControlAction::SetDimension(Dimension::Five));
    explorer.apply(ControlAction::ToggleShadows);
    explorer.apply(ControlAction::ToggleOcclusion);
    explorer.apply(ControlAction::ToggleAutoRotate);
    assert_eq!(explorer.dimension, Dimension::Five);
    assert!(explorer.appearance.soft_shadows);
    assert!(explorer.appearance.ambient_occlusion);
    assert!(!explorer.camera.auto_rotate);

    let before = explorer.camera.angle;
    explorer.tick(1.0, None);
    assert_eq!(explorer.camera.angle, before);
    assert!(explorer.describe().starts_with("5D"));
}

#[test]
fn reset_restores_defaults_but_keeps_time() {
    let mut explorer = Explorer::new();
    explorer.tick(1.0, None);
    explorer.apply(ControlAction::AdjustPower(2.0));
    explorer.apply(ControlAction::SetDimension(Dimension::Four));
    explorer.apply(ControlAction::Reset);
    assert_eq!(explorer.params, FractalParams::default());
    assert_eq!(explorer.dimension, Dimension::Three);
    assert_eq!(explorer.time(), 1.0);
    assert!(explorer.describe().starts_with("3D power 8.0 iter 16"));
}

#[test]
fn default_camera_orbits_above_the_equator() {
    let camera = OrbitCamera::default();
    let eye = camera.eye();
    assert!((eye - Vec3::new(3.0, 0.9, 0.0)).length() < 1.0e-6);

    let mut camera = camera;
    for _ in 0..1000 {
        camera.advance(1.0);
        assert!((0.0..TAU).contains(&camera.angle));
        let r = Vec2::new(camera.eye().x, camera.eye().z).length();
        assert!((r - camera.zoom).abs() < 1.0e-4);
    }
}

#[test]
fn camera_basis_is_orthonormal() {
    for angle in [0.0, 1.0, 2.5, 4.0] {
        let camera = OrbitCamera {
            angle,
            ..OrbitCamera::default()
        };
        let (cu, cv, cw) = camera.frame().basis();
        for v in [cu, cv, cw] {
            assert!((v.length() - 1.0).abs() < 1.0e-5);
        }
        assert!(cu.dot(cv).abs() < 1.0e-5);
        assert!(cu.dot(cw).abs() < 1.0e-5);
        assert!(cv.dot(cw).abs() < 1.0e-5);
        assert!(cv.y > 0.0, "up vector points down at angle {angle}");
    }
}

#[test]
fn pixel_uv_is_centred_and_flips_rows() {
    assert_eq!(CameraFrame::pixel_uv(400.0, 300.0, 800, 600), Vec2::ZERO);
    let top_left = CameraFrame::pixel_uv(0.0, 0.0, 800, 600);
    assert!((top_left - Vec2::new(-400.0 / 600.0, 0.5)).length() < 1.0e-6);
    assert!(CameraFrame::pixel_uv(0.0, 0.0, 0, 0).is_finite());
}

#[test]
fn centre_ray_looks_at_the_target() {
    let frame = OrbitCamera::default().frame();
    let ray = frame.ray_for_uv(Vec2::ZERO);
    let expected = (frame.target - frame.eye).normalize();
    assert!((ray.direction - expected).length() < 1.0e-5);
    assert_eq!(ray.origin, frame.eye);
}

#[test]
fn audio_wobble_only_moves_the_eye_with_sound() {
    let frame = OrbitCamera::default().frame();
    assert_eq!(frame.with_audio_wobble(1.3, AudioEnergy::SILENT), frame);
    let loud = AudioEnergy {
        bass: 1.0,
        mid: 1.0,
        treble: 1.0,
        level: 1.0,
    };
    let moved = frame.with_audio_wobble(1.3, loud);
    assert!((moved.eye - frame.eye).length() <= AUDIO_WOBBLE * 2.0_f32.sqrt() + 1.0e-6);
    assert_eq!(moved.target, frame.target);
}
