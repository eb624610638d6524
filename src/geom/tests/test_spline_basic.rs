use crate::geom::{BSplineCurve2, Vec2};

#[test]
fn clamped_curve_interpolates_endpoints() {
    let curve = BSplineCurve2::cubic(vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 2.0),
        Vec2::new(2.0, -1.0),
        Vec2::new(3.0, 0.5),
    ])
    .unwrap();

    assert!((curve.point_at(0.0) - Vec2::new(0.0, 0.0)).length() < 1e-12);
    assert!((curve.point_at(1.0) - Vec2::new(3.0, 0.5)).length() < 1e-12);
}

#[test]
fn closed_control_polygon_yields_closed_samples() {
    // Control polygon of a ventilation hole: first == last.
    let curve = BSplineCurve2::cubic(vec![
        Vec2::new(0.2, 0.5),
        Vec2::new(0.2, 0.15),
        Vec2::new(0.4, 0.15),
        Vec2::new(0.4, 0.85),
        Vec2::new(0.2, 0.85),
        Vec2::new(0.2, 0.5),
    ])
    .unwrap();

    let samples = curve.sample(40);
    assert_eq!(samples.node_count(), 40);
    let first = samples.nodes()[0];
    let last = *samples.nodes().last().unwrap();
    assert!((first - last).length() < 1e-12);
    assert!((first - Vec2::new(0.2, 0.5)).length() < 1e-12);
}

#[test]
fn samples_stay_in_control_polygon_hull() {
    let curve = BSplineCurve2::cubic(vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(0.0, 1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(1.0, 0.0),
    ])
    .unwrap();

    for node in curve.sample(50).nodes() {
        assert!(node.x >= -1e-12 && node.x <= 1.0 + 1e-12);
        assert!(node.y >= -1e-12 && node.y <= 1.0 + 1e-12);
    }
}

#[test]
fn short_control_polygons_fall_back_to_lower_degree() {
    let curve = BSplineCurve2::cubic(vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)]).unwrap();
    assert_eq!(curve.degree(), 1);
    assert!((curve.point_at(0.5) - Vec2::new(0.5, 0.5)).length() < 1e-12);
}

#[test]
fn rejects_invalid_input() {
    assert!(BSplineCurve2::new(vec![Vec2::new(0.0, 0.0)], 1).is_err());
    assert!(
        BSplineCurve2::new(vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)], 2).is_err()
    );
}
