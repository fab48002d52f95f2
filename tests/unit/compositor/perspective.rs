use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn fraction_endpoints() {
    assert!(approx(perspective_fraction(1.0, 2.0, 0.0), 0.0));
    assert!(approx(perspective_fraction(1.0, 2.0, 1.0), 1.0));
    assert!(approx(perspective_fraction(3.0, 0.5, 1.0), 1.0));
}

#[test]
fn fraction_matches_reciprocal_interpolation() {
    let (from, to) = (1.0, 2.0);
    for k in 1..10 {
        let u = k as f64 / 10.0;
        let e = lerp_extent(from, to, u);
        let reciprocal = (1.0 / e - 1.0 / from) / (1.0 / to - 1.0 / from);
        assert!(approx(perspective_fraction(from, to, u), reciprocal));
    }
}

#[test]
fn equal_extents_give_identity_ramp() {
    for k in 0..=4 {
        let u = k as f64 / 4.0;
        assert_eq!(perspective_fraction(5.0, 5.0, u), u);
    }
}

#[test]
fn source_offset_wraps_into_range() {
    // base 0 puts u = 0 at column -1 == steps - 1.
    assert!(approx(source_offset(1.0, 1.0, 0.0, 8, 0), 7.0));
    assert!(approx(source_offset(1.0, 1.0, 0.5, 8, 3), 6.0));
    let s = source_offset(1.0, 2.0, 1.0, 8, 0);
    assert!((0.0..8.0).contains(&s));
}

#[test]
fn ten_columns_with_monotone_extent() {
    let cols: Vec<_> = plan_columns(10.0, 1.0, 2.0, 8, 0).collect();
    assert_eq!(cols.len(), 10);
    let mut prev = 1.0;
    for c in &cols {
        assert!(c.near_extent >= prev);
        assert!(c.near_extent >= 1.0 && c.near_extent <= 2.0);
        assert!(c.far_extent <= 2.0 + 1e-12);
        assert!(c.src_end >= c.src_start);
        prev = c.near_extent;
    }
}

#[test]
fn fractional_span_has_partial_last_column() {
    let cols: Vec<_> = plan_columns(2.5, 1.0, 1.0, 4, 1).collect();
    assert_eq!(cols.len(), 3);
    assert_eq!(cols[0].width, 1.0);
    assert_eq!(cols[2].width, 0.5);
    assert_eq!(cols[2].x, 2.0);
}

#[test]
fn wrapping_column_extends_past_steps() {
    // With base 1 the ramp starts at column 0 and reaches 4 == 0 at u = 1.
    let cols: Vec<_> = plan_columns(4.0, 1.0, 1.0, 4, 1).collect();
    let last = cols[3];
    assert!(approx(last.src_start, 3.0));
    assert!(approx(last.src_end, 4.0));
    assert!(approx(last.src_width(), 1.0));
}

#[test]
fn zero_span_plans_nothing() {
    assert_eq!(plan_columns(0.0, 1.0, 2.0, 8, 0).count(), 0);
    assert_eq!(plan_columns(f64::NAN, 1.0, 2.0, 8, 0).count(), 0);
}

#[test]
fn trajectory_validation() {
    let ok = Trajectory::new(Point::new(0.0, 0.0), 1.0, Point::new(3.0, 4.0), 2.0);
    assert!(ok.validate().is_ok());
    assert_eq!(ok.span(), 5.0);

    let zero = Trajectory { to_extent: 0.0, ..ok };
    assert!(zero.validate().is_err());
    let opposite = Trajectory { to_extent: -2.0, ..ok };
    assert!(opposite.validate().is_err());
    let both_negative = Trajectory {
        from_extent: -1.0,
        to_extent: -2.0,
        ..ok
    };
    assert!(both_negative.validate().is_ok());
    let nan = Trajectory {
        from: Point::new(f64::NAN, 0.0),
        ..ok
    };
    assert!(nan.validate().is_err());
}

#[test]
fn trajectory_angle() {
    let t = Trajectory::new(Point::new(1.0, 1.0), 1.0, Point::new(1.0, 5.0), 1.0);
    assert!(approx(t.angle(), std::f64::consts::FRAC_PI_2));
}

#[test]
fn reachable_columns_stop_at_the_farthest_corner() {
    let bounds = Rect::new(0.0, 0.0, 8.0, 6.0);
    assert_eq!(reachable_columns(Point::new(0.0, 0.0), bounds), 11);
    assert_eq!(reachable_columns(Point::new(4.0, 3.0), bounds), 6);
    assert_eq!(
        reachable_columns(Point::new(0.0, 0.0), Rect::new(0.0, 0.0, f64::INFINITY, 1.0)),
        0
    );
}

#[test]
fn huge_span_plans_lazily() {
    let first: Vec<_> = plan_columns(1.0e12, 1.0, 1.0, 8, 0).take(3).collect();
    assert_eq!(first.len(), 3);
    assert_eq!(first[2].x, 2.0);
}
