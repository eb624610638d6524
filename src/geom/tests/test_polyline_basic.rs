use crate::geom::{Polyline2, Polyline3, Vec2, Vec3};

fn line2(points: &[(f64, f64)]) -> Polyline2 {
    Polyline2::new(points.iter().map(|&(x, y)| Vec2::new(x, y)).collect()).unwrap()
}

#[test]
fn get_interpolates_and_extrapolates() {
    let line = line2(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);

    assert!((line.get(0.5) - Vec2::new(0.5, 0.0)).length() < 1e-12);
    assert!((line.get(1.5) - Vec2::new(1.0, 0.5)).length() < 1e-12);
    // Past the ends the end segments extend linearly.
    assert!((line.get(-0.5) - Vec2::new(-0.5, 0.0)).length() < 1e-12);
    assert!((line.get(2.5) - Vec2::new(1.0, 1.5)).length() < 1e-12);
}

#[test]
fn walk_by_arclength() {
    let line = line2(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
    assert!((line.length() - 2.0).abs() < 1e-12);

    let ik = line.walk(0.0, 1.5);
    assert!((ik - 1.5).abs() < 1e-12);
    assert!((line.get(ik) - Vec2::new(1.0, 0.5)).length() < 1e-12);

    // Walking backwards from the middle.
    let ik = line.walk(1.5, -1.0);
    assert!((ik - 0.5).abs() < 1e-12);

    // Walking off the end extrapolates.
    let ik = line.walk(0.0, 3.0);
    assert!((line.get(ik) - Vec2::new(1.0, 2.0)).length() < 1e-12);
}

#[test]
fn sub_curve_extracts_and_reverses() {
    let line = line2(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);

    let sub = line.sub_curve(0.5, 2.5);
    let nodes = sub.nodes();
    assert_eq!(nodes.len(), 4);
    assert!((nodes[0] - Vec2::new(0.5, 0.0)).length() < 1e-12);
    assert!((nodes[1] - Vec2::new(1.0, 0.0)).length() < 1e-12);
    assert!((nodes[2] - Vec2::new(2.0, 0.0)).length() < 1e-12);
    assert!((nodes[3] - Vec2::new(2.5, 0.0)).length() < 1e-12);

    let rev = line.sub_curve(2.5, 0.5);
    assert!((rev.nodes()[0] - Vec2::new(2.5, 0.0)).length() < 1e-12);
    assert!((rev.nodes()[3] - Vec2::new(0.5, 0.0)).length() < 1e-12);
}

#[test]
fn sub_curve_on_node_boundaries() {
    let line = line2(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
    let sub = line.sub_curve(0.0, 2.0);
    assert_eq!(sub.nodes().len(), 3);
    assert_eq!(sub.nodes(), line.nodes());
}

#[test]
fn resample_is_uniform_in_arclength() {
    let line = line2(&[(0.0, 0.0), (0.1, 0.0), (2.0, 0.0)]);
    let resampled = line.resample(5);
    assert_eq!(resampled.node_count(), 5);
    for (i, node) in resampled.nodes().iter().enumerate() {
        let expected = 2.0 * i as f64 / 4.0;
        assert!(
            (node.x - expected).abs() < 1e-12,
            "node {i} at {}",
            node.x
        );
    }
}

#[test]
fn reverse_flips_order() {
    let line = line2(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
    let rev = line.reverse();
    assert_eq!(rev.nodes()[0], Vec2::new(1.0, 1.0));
    assert_eq!(rev.nodes()[2], Vec2::new(0.0, 0.0));
    assert!((rev.length() - line.length()).abs() < 1e-12);
}

#[test]
fn offset_shifts_straight_line_sideways() {
    let line = line2(&[(0.0, 0.0), (2.0, 0.0)]);
    let offset = line.offset(0.5);
    // Walking +x, a positive offset goes to the right, i.e. -y.
    assert!((offset.nodes()[0] - Vec2::new(0.0, -0.5)).length() < 1e-12);
    assert!((offset.nodes()[1] - Vec2::new(2.0, -0.5)).length() < 1e-12);
}

#[test]
fn polyline3_blend_matches_midpoints() {
    let a = Polyline3::new(vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)]).unwrap();
    let b = Polyline3::new(vec![Vec3::new(0.0, 2.0, 0.0), Vec3::new(1.0, 2.0, 2.0)]).unwrap();

    let mid = a.blend(&b, 0.5).unwrap();
    assert!((mid.nodes()[0] - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-12);
    assert!((mid.nodes()[1] - Vec3::new(1.0, 1.0, 1.0)).length() < 1e-12);
}

#[test]
fn construction_rejects_short_or_invalid_input() {
    assert!(Polyline2::new(vec![Vec2::new(0.0, 0.0)]).is_err());
    assert!(Polyline2::new(vec![Vec2::new(0.0, 0.0), Vec2::new(f64::NAN, 0.0)]).is_err());
}
