// Distance estimator: agreement with the membership test, sign and modulation.

use bulb_core::*;
use glam::{Vec3, Vec4};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_point(rng: &mut StdRng, extent: f32) -> Vec3 {
    Vec3::new(
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
    )
}

#[test]
fn estimator_escapes_at_same_iteration_as_membership_test() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..2000 {
        let p = random_point(&mut rng, 1.6);
        let params = FractalParams::clamped(rng.gen_range(2.0..12.0), rng.gen_range(4..=24));
        let escape = escape_time(p, &params);
        let de = estimate(p, &params, &Modulation::NONE);
        assert_eq!(escape.iteration(), de.escape_iteration, "disagreement at {p:?}");
    }
}

#[test]
fn agreement_holds_in_four_and_five_dimensions() {
    let mut rng = StdRng::seed_from_u64(4);
    let params = FractalParams::default();
    for _ in 0..500 {
        let p = random_point(&mut rng, 1.4);
        let w = rng.gen_range(-1.0..1.0);
        let v = rng.gen_range(-1.0..1.0);
        let p4 = Vec4::new(p.x, p.y, p.z, w);
        assert_eq!(
            escape_time(p4, &params).iteration(),
            estimate(p4, &params, &Modulation::NONE).escape_iteration
        );
        let p5 = Vec5::new(p.x, p.y, p.z, w, v);
        assert_eq!(
            escape_time(p5, &params).iteration(),
            estimate(p5, &params, &Modulation::NONE).escape_iteration
        );
    }
}

#[test]
fn estimate_is_always_finite() {
    let mut rng = StdRng::seed_from_u64(5);
    let params = FractalParams::default();
    for _ in 0..1000 {
        let p = random_point(&mut rng, 3.0);
        let d = distance_estimate(p, &params, &Modulation::NONE);
        assert!(d.is_finite(), "non-finite estimate at {p:?}");
    }
    for p in [
        Vec3::ZERO,
        Vec3::new(f32::NAN, 0.0, 0.0),
        Vec3::new(f32::INFINITY, 1.0, 0.0),
        Vec3::splat(1.0e30),
    ] {
        assert!(distance_estimate(p, &params, &Modulation::NONE).is_finite());
    }
}

#[test]
fn origin_estimate_is_zero() {
    let d = distance_estimate(Vec3::ZERO, &FractalParams::default(), &Modulation::NONE);
    assert_eq!(d, 0.0);
}

#[test]
fn estimate_is_positive_outside_and_grows_with_distance() {
    let params = FractalParams::default();
    let mut prev = 0.0;
    for i in 0..10 {
        let p = Vec3::new(0.0, 0.0, -1.5 - i as f32 * 0.5);
        let d = distance_estimate(p, &params, &Modulation::NONE);
        assert!(d > prev, "estimate did not grow at {p:?}: {d} <= {prev}");
        prev = d;
    }
}

#[test]
fn estimate_is_not_positive_deep_inside() {
    let params = FractalParams::default();
    for p in [Vec3::new(0.3, 0.3, 0.3), Vec3::new(0.1, 0.2, 0.3), Vec3::new(0.6, 0.0, 0.0)] {
        assert!(member(p, &params));
        assert!(distance_estimate(p, &params, &Modulation::NONE) <= 0.0);
    }
}

fn assert_bounded_by_known_member<P: BulbPoint>(slice: HyperSlice, seed: u64) {
    let params = FractalParams::default();
    let mut rng = StdRng::seed_from_u64(seed);
    let inside = Vec3::new(0.1, 0.2, 0.3);
    assert!(member(P::embed(inside, slice), &params));
    for extent in [3.0, constants::MAX_ZOOM, constants::DEFAULT_MAX_DIST] {
        for _ in 0..300 {
            let p = random_point(&mut rng, extent);
            let d = distance_estimate(P::embed(p, slice), &params, &Modulation::NONE);
            // the slice offsets cancel, so the 3D distance is the full distance
            assert!(d <= p.distance(inside) + 1.0e-4, "estimate {d} overshoots at {p:?}");
        }
    }
}

#[test]
fn estimate_never_exceeds_distance_to_a_known_member() {
    assert_bounded_by_known_member::<Vec3>(HyperSlice::ORIGIN, 6);
    assert_bounded_by_known_member::<Vec4>(HyperSlice::ORIGIN, 7);
    assert_bounded_by_known_member::<Vec4>(HyperSlice::new(0.3, 0.0), 8);
    assert_bounded_by_known_member::<Vec5>(HyperSlice::ORIGIN, 9);
    assert_bounded_by_known_member::<Vec5>(HyperSlice::new(0.3, -0.2), 10);
}

#[test]
fn far_estimates_stay_below_the_distance_to_the_axis_tip() {
    let params = FractalParams::default();
    let tip = Vec3::new(0.8, 0.0, 0.0);
    assert!(member(tip, &params));
    for x in [2.5, 4.0, 8.0, 10.0, 15.0, 20.0] {
        let d = distance_estimate(Vec3::new(x, 0.0, 0.0), &params, &Modulation::NONE);
        assert!(d > 0.0 && d <= x - tip.x, "estimate {d} at x={x}");
    }
}

#[test]
fn enclosing_radius_shrinks_with_power() {
    let b = constants::BAILOUT_RADIUS;
    let r8 = enclosing_radius(8.0, 16, b);
    assert!((r8 - 4.0_f32.powf(0.125)).abs() < 1.0e-5, "{r8}");
    assert!(enclosing_radius(16.0, 16, b) < r8);
    // low powers and single-iteration orbits fall back to the bailout sphere
    assert_eq!(enclosing_radius(2.0, 16, b), b - constants::ENCLOSING_MARGIN);
    assert_eq!(enclosing_radius(8.0, 1, b), b - constants::ENCLOSING_MARGIN);
}

#[test]
fn nothing_beyond_the_enclosing_radius_is_a_member() {
    let mut rng = StdRng::seed_from_u64(11);
    for power in [3.0, 4.0, 6.0, 8.0, 12.0, 16.0] {
        let params = FractalParams::clamped(power, 16);
        let radius = enclosing_radius(power, params.iterations(), params.bailout());
        for _ in 0..300 {
            let dir = random_point(&mut rng, 1.0).normalize_or_zero();
            if dir == Vec3::ZERO {
                continue;
            }
            let p = dir * rng.gen_range(radius * 1.001..3.0);
            assert!(!member(p, &params), "power {power} member at {p:?} beyond {radius}");
        }
    }
}

#[test]
fn neutral_modulation_changes_nothing() {
    let m = Modulation::NONE;
    assert_eq!(m.power(8.0), 8.0);
    assert_eq!(m.twist(), AngleTwist::NONE);

    // audio with zero reactivity is ignored as well
    let muted = Modulation::new(3.0, AudioEnergy { bass: 1.0, mid: 1.0, treble: 1.0, level: 1.0 }, 0.0);
    assert_eq!(muted.power(8.0), 8.0);
    assert_eq!(muted.twist(), AngleTwist::NONE);
}

#[test]
fn bass_modulated_power_stays_in_range() {
    for i in 0..200 {
        let t = i as f32 * 0.37;
        let audio = AudioEnergy { bass: 1.0, mid: 0.5, treble: 0.5, level: 0.5 };
        let m = Modulation::new(t, audio, 2.0);
        for base in [1.0, 8.0, 16.0] {
            let p = m.power(base);
            assert!((1.0..=16.0).contains(&p), "power {p} at t={t}");
        }
        let tw = m.twist();
        assert!(tw.theta.abs() <= 0.1 + 1.0e-6 && tw.phi.abs() <= 0.1 + 1.0e-6);
    }
}

#[test]
fn modulated_estimate_stays_finite() {
    let params = FractalParams::default();
    let mut rng = StdRng::seed_from_u64(8);
    for i in 0..300 {
        let m = Modulation::new(i as f32 * 0.1, AudioEnergy::simulated(i as f32), 1.0);
        let p = random_point(&mut rng, 2.0);
        assert!(distance_estimate(p, &params, &m).is_finite());
    }
}
