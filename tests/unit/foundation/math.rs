use crate::foundation::math::{XorShift32, deg_to_rad, ellipse_x, ellipse_y};

#[test]
fn degrees_convert_to_radians() {
    assert_eq!(deg_to_rad(0.0), 0.0);
    assert!((deg_to_rad(180.0) - std::f64::consts::PI).abs() < 1e-12);
    assert!((deg_to_rad(-90.0) + std::f64::consts::FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn ellipse_eval_hits_cardinal_points() {
    assert!((ellipse_x(150.0, 0.0) - 150.0).abs() < 1e-9);
    assert!(ellipse_y(60.0, 0.0).abs() < 1e-9);
    assert!(ellipse_x(150.0, 90.0).abs() < 1e-9);
    assert!((ellipse_y(60.0, 90.0) - 60.0).abs() < 1e-9);
    assert!((ellipse_x(150.0, 180.0) + 150.0).abs() < 1e-9);
    assert!((ellipse_y(60.0, 270.0) + 60.0).abs() < 1e-9);
}

#[test]
fn ellipse_eval_is_periodic() {
    for deg in [30.0, 125.0, 200.0] {
        assert!((ellipse_x(80.0, deg) - ellipse_x(80.0, deg + 360.0)).abs() < 1e-9);
        assert!((ellipse_y(32.0, deg) - ellipse_y(32.0, deg + 360.0)).abs() < 1e-9);
    }
}

#[test]
fn same_seed_same_sequence() {
    let mut a = XorShift32::new(42);
    let mut b = XorShift32::new(42);
    for _ in 0..100 {
        assert_eq!(a.next_u32(), b.next_u32());
    }
}

#[test]
fn zero_seed_is_lifted() {
    // An all-zero xorshift state would stay zero forever.
    let mut rng = XorShift32::new(0);
    assert_ne!(rng.next_u32(), 0);
    assert_eq!(XorShift32::new(0).next_u32(), XorShift32::new(1).next_u32());
}

#[test]
fn uniform_stays_in_range() {
    let mut rng = XorShift32::new(7);
    let mut lo_seen = f64::MAX;
    let mut hi_seen = f64::MIN;
    for _ in 0..1000 {
        let v = rng.uniform(-120.0, 120.0);
        assert!((-120.0..120.0).contains(&v));
        lo_seen = lo_seen.min(v);
        hi_seen = hi_seen.max(v);
    }
    // Sanity that the draws actually spread out.
    assert!(lo_seen < -60.0 && hi_seen > 60.0);
}

#[test]
fn pick_covers_short_slices() {
    let mut rng = XorShift32::new(3);
    let items = ["a", "b", "c"];
    let mut seen = [false; 3];
    for _ in 0..64 {
        let v = rng.pick(&items);
        seen[items.iter().position(|i| i == v).unwrap()] = true;
    }
    assert_eq!(seen, [true, true, true]);
}
