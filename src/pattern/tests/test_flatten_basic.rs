use crate::geom::{Polyline3, Vec3};
use crate::pattern::{Flattener, StripFlattener};

#[test]
fn planar_strip_flattens_isometrically() {
    let left = Polyline3::new(vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 0.5, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ])
    .unwrap();
    let right = Polyline3::new(vec![
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 0.5, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
    ])
    .unwrap();

    let (left_2d, right_2d) = StripFlattener.flatten(&left, &right).unwrap();

    // Node counts are preserved.
    assert_eq!(left_2d.node_count(), 3);
    assert_eq!(right_2d.node_count(), 3);

    // Side lengths are preserved exactly for a planar strip.
    assert!((left_2d.length() - 1.0).abs() < 1e-9);
    assert!((right_2d.length() - 1.0).abs() < 1e-9);

    // So are the rung lengths between matching nodes.
    for (l, r) in left_2d.nodes().iter().zip(right_2d.nodes()) {
        assert!(((*r - *l).length() - 1.0).abs() < 1e-9);
    }
}

#[test]
fn folded_strip_preserves_side_lengths() {
    // A strip bent out of plane along its middle rung.
    let left = Polyline3::new(vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, 1.7, 0.7),
    ])
    .unwrap();
    let right = Polyline3::new(vec![
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(1.0, 1.7, 0.7),
    ])
    .unwrap();

    let (left_2d, right_2d) = StripFlattener.flatten(&left, &right).unwrap();

    let left_len_3d = left.length();
    let right_len_3d = right.length();
    assert!((left_2d.length() - left_len_3d).abs() < 1e-6);
    assert!((right_2d.length() - right_len_3d).abs() < 1e-6);
}

#[test]
fn unequal_node_counts_are_supported() {
    let left = Polyline3::new(vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 0.4, 0.0),
        Vec3::new(0.0, 0.8, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ])
    .unwrap();
    let right = Polyline3::new(vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0)]).unwrap();

    let (left_2d, right_2d) = StripFlattener.flatten(&left, &right).unwrap();
    assert_eq!(left_2d.node_count(), 4);
    assert_eq!(right_2d.node_count(), 2);
}
