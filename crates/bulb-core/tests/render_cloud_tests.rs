// Host-side image rendering, uniform layout and point-cloud extraction.

use bulb_core::*;
use glam::{Vec3, Vec4};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn still_frame_renders_bulb_and_background() {
    let frame = FrameInputs::still(FractalParams::default());
    let image = render_image(&frame, 32, 24);
    assert_eq!(image.pixels.len(), 32 * 24 * 4);
    assert!(image.pixels.chunks_exact(4).all(|px| px[3] == 255));
    assert_eq!(image.stats.pixels(), 32 * 24);
    assert!(image.stats.hits > 0, "{:?}", image.stats);
    assert!(image.stats.misses > 0, "{:?}", image.stats);
    assert!(image.stats.mean_steps() >= 1.0);
}

#[test]
fn rendering_is_deterministic() {
    let mut frame = FrameInputs::still(FractalParams::default());
    frame.time = 2.0;
    frame.audio = AudioEnergy::simulated(2.0);
    let a = render_image(&frame, 24, 16);
    let b = render_image(&frame, 24, 16);
    assert_eq!(a.pixels, b.pixels);
    assert_eq!(a.stats, b.stats);
}

#[test]
fn hyperdimensional_frames_render() {
    for dimension in [Dimension::Four, Dimension::Five] {
        let mut frame = FrameInputs::still(FractalParams::default());
        frame.dimension = dimension;
        frame.slice = HyperSlice::new(0.3, -0.2);
        let image = render_image(&frame, 16, 12);
        assert_eq!(image.pixels.len(), 16 * 12 * 4);
        assert_eq!(image.stats.pixels(), 16 * 12);
    }
}

#[test]
fn empty_dimensions_render_a_single_pixel() {
    let image = render_image(&FrameInputs::still(FractalParams::default()), 0, 0);
    assert_eq!((image.width, image.height), (1, 1));
    assert_eq!(image.pixels.len(), 4);
}

#[test]
fn uniform_block_layout() {
    assert_eq!(std::mem::size_of::<FrameUniforms>(), 112);
    assert_eq!(FrameUniforms::SIZE, 112);

    let mut frame = FrameInputs::still(FractalParams::default());
    frame.dimension = Dimension::Four;
    frame.appearance.ambient_occlusion = true;
    let u = frame.uniforms(640, 0);
    assert_eq!(u.resolution, [640.0, 1.0]);
    assert_eq!(u.dimension, 4);
    assert_eq!(u.iterations, 16);
    assert_eq!(u.flags, FLAG_AMBIENT_OCCLUSION);
    assert_eq!(bytemuck::bytes_of(&u).len(), 112);
}

#[test]
fn shell_sweep_finds_interior_points() {
    let sweep = ShellSweep::default();
    let params = FractalParams::default();
    let cloud = sweep_shell::<Vec3>(&sweep, &params, &Projection::default());
    let expected = (sweep.layers * sweep.resolution * sweep.resolution * 2) as usize;
    assert_eq!(cloud.tested, expected);
    assert!(!cloud.points.is_empty());
    assert!(cloud.points.len() < expected);
    assert_eq!(cloud.dropped, 0);
    for p in &cloud.points {
        assert!(p.position.is_finite());
        assert!(p.radius <= sweep.outer_radius + 1.0e-4);
        assert_eq!(p.w, 0.0);
        assert!(member(p.position, &params));
    }
}

#[test]
fn shell_sweep_is_deterministic() {
    let sweep = ShellSweep {
        resolution: 12,
        layers: 4,
        distortion: 0.2,
        time: 1.0,
        ..ShellSweep::default()
    };
    let params = FractalParams::default();
    let a = sweep_shell::<Vec4>(&sweep, &params, &Projection::default());
    let b = sweep_shell::<Vec4>(&sweep, &params, &Projection::default());
    assert_eq!(a.points, b.points);
    assert!(a.points.iter().all(|p| p.position.is_finite()));
}

#[test]
fn five_d_sweep_projects_finitely() {
    let sweep = ShellSweep {
        resolution: 10,
        layers: 3,
        hyper_amplitude: 1.5,
        ..ShellSweep::default()
    };
    let cloud = sweep_shell::<Vec5>(&sweep, &FractalParams::default(), &Projection::new(1.0));
    assert_eq!(cloud.tested, 3 * 10 * 20);
    assert!(cloud.points.iter().all(|p| p.position.is_finite()));
}

#[test]
fn sweep_rings_are_capped() {
    let huge = ShellSweep {
        resolution: u32::MAX,
        ..ShellSweep::default()
    };
    assert_eq!(huge.rings(), constants::MAX_SHELL_RESOLUTION);
    // longitude count stays representable
    assert!(huge.rings().checked_mul(2).is_some());
    let empty = ShellSweep {
        resolution: 0,
        layers: 1,
        ..ShellSweep::default()
    };
    assert_eq!(empty.rings(), 1);
    let cloud = sweep_shell::<Vec3>(&empty, &FractalParams::default(), &Projection::default());
    assert_eq!(cloud.tested, 2);
}

#[test]
fn scatter_is_reproducible_for_a_seed() {
    let params = FractalParams::default();
    let projection = Projection::default();
    let run = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        scatter_shell::<Vec3, _>(&mut rng, 2000, 0.2, 1.4, HyperSlice::ORIGIN, &params, &projection)
    };
    let a = run(42);
    let b = run(42);
    assert_eq!(a.tested, 2000);
    assert_eq!(a.points, b.points);
    assert!(!a.points.is_empty());
    for p in &a.points {
        assert!(p.radius >= 0.2 - 1.0e-4 && p.radius <= 1.4 + 1.0e-4);
    }
}

#[test]
fn swapped_shell_radii_are_reordered() {
    let params = FractalParams::default();
    let mut rng = StdRng::seed_from_u64(1);
    let cloud = scatter_shell::<Vec3, _>(
        &mut rng,
        500,
        1.4,
        0.2,
        HyperSlice::ORIGIN,
        &params,
        &Projection::default(),
    );
    assert_eq!(cloud.tested, 500);
    assert!(cloud.points.iter().all(|p| p.radius <= 1.4 + 1.0e-4));
}
