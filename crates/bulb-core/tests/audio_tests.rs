// Band splitting, simulated energies and smoothing.

use bulb_core::*;

#[test]
fn sixty_four_bins_split_into_bass_mid_treble() {
    let mut bins = vec![0.0_f32; 64];
    for b in &mut bins[0..8] {
        *b = 1.0;
    }
    for b in &mut bins[8..32] {
        *b = 0.5;
    }
    for b in &mut bins[32..64] {
        *b = 0.25;
    }
    let e = AudioEnergy::from_spectrum(&bins, 0.3);
    assert_eq!(e.bass, 1.0);
    assert_eq!(e.mid, 0.5);
    assert_eq!(e.treble, 0.25);
    assert_eq!(e.level, 0.3);
}

#[test]
fn tiny_and_empty_spectra_are_handled() {
    assert_eq!(AudioEnergy::from_spectrum(&[], 0.0), AudioEnergy::SILENT);
    let e = AudioEnergy::from_spectrum(&[0.8], 0.1);
    assert_eq!(e.bass, 0.8);
    assert_eq!(e.mid, 0.0);
    assert_eq!(e.treble, 0.0);
}

#[test]
fn out_of_range_values_are_clamped() {
    let e = AudioEnergy::from_spectrum(&[f32::NAN, 2.0, -1.0, 0.5, 0.5, 0.5, 0.5, 0.5], 7.0);
    for v in e.to_array() {
        assert!((0.0..=1.0).contains(&v), "{e:?}");
    }
    let c = AudioEnergy {
        bass: f32::NAN,
        mid: 3.0,
        treble: -2.0,
        level: 0.5,
    }
    .clamped();
    assert_eq!(c.to_array(), [0.0, 1.0, 0.0, 0.5]);
}

#[test]
fn simulated_energies_drift_within_a_gentle_range() {
    for i in 0..1000 {
        let e = AudioEnergy::simulated(i as f32 * 0.05);
        for v in [e.bass, e.mid, e.treble] {
            assert!((0.0..=0.3 + 1.0e-6).contains(&v));
        }
        assert_eq!(e.level, 0.2);
    }
}

#[test]
fn smoother_converges_towards_the_target() {
    let mut s = EnergySmoother::new(0.8);
    let target = AudioEnergy {
        bass: 1.0,
        mid: 0.5,
        treble: 0.25,
        level: 0.75,
    };
    let first = s.update(target);
    assert!((first.bass - 0.2).abs() < 1.0e-6);
    for _ in 0..100 {
        s.update(target);
    }
    let c = s.current();
    assert!((c.bass - 1.0).abs() < 1.0e-3);
    assert!((c.treble - 0.25).abs() < 1.0e-3);
}

#[test]
fn zero_smoothing_follows_immediately() {
    let mut s = EnergySmoother::new(0.0);
    let target = AudioEnergy {
        bass: 0.4,
        mid: 0.3,
        treble: 0.2,
        level: 0.1,
    };
    assert_eq!(s.update(target), target);
}
