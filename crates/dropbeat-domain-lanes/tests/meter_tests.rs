use dropbeat_domain_lanes::Meter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn add_clamps_to_range() {
    let mut meter = Meter::new();
    assert!(!meter.add(-5.0));
    assert_eq!(meter.value(), 0.0);

    assert!(!meter.add(95.0));
    assert!(meter.add(10.0));
    assert_eq!(meter.value(), 100.0);

    meter.add(-5.0);
    assert_eq!(meter.value(), 95.0);
}

#[test]
fn value_never_leaves_range_under_random_sequences() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let mut meter = Meter::new();
        for _ in 0..500 {
            let delta = rng.random_range(-40.0f32..40.0);
            let full = meter.add(delta);
            assert!((0.0..=100.0).contains(&meter.value()));
            assert_eq!(full, meter.value() == 100.0);
        }
    }
}

#[test]
fn non_finite_delta_is_ignored() {
    let mut meter = Meter::new();
    meter.add(20.0);
    meter.add(f32::NAN);
    meter.add(f32::INFINITY);
    assert_eq!(meter.value(), 20.0);
}

#[test]
fn reset_zeroes() {
    let mut meter = Meter::new();
    meter.add(100.0);
    assert!(meter.is_full());
    meter.reset();
    assert_eq!(meter.value(), 0.0);
    assert!(!meter.is_full());
}
