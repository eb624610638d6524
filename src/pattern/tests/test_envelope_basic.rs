use crate::geom::{Polyline2, Polyline3, Triangulation, Vec2, Vec3};
use crate::pattern::Envelope;

fn unit_strip() -> (Polyline2, Polyline2, Polyline3, Polyline3) {
    let left_2d = Polyline2::new(vec![Vec2::new(0.0, 0.0), Vec2::new(0.0, 1.0)]).unwrap();
    let right_2d = Polyline2::new(vec![Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)]).unwrap();
    let left_3d =
        Polyline3::new(vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)]).unwrap();
    let right_3d =
        Polyline3::new(vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0)]).unwrap();
    (left_2d, right_2d, left_3d, right_3d)
}

#[test]
fn unit_square_envelope_triangulates_into_two_triangles() {
    let (left_2d, right_2d, left_3d, right_3d) = unit_strip();
    let envelope = Envelope::from_flattened(&left_2d, &right_2d, &left_3d, &right_3d, 0).unwrap();

    assert_eq!(envelope.len(), 4);
    let expected = [
        Vec2::new(0.0, 0.0),
        Vec2::new(0.0, 1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(1.0, 0.0),
    ];
    for (node, expected) in envelope.nodes_2d().iter().zip(expected) {
        assert!((*node - expected).length() < 1e-12);
    }

    let mesh = Triangulation::new(
        envelope.nodes_2d().to_vec(),
        vec![envelope.boundary_loop()],
        Vec::new(),
    )
    .triangulate()
    .unwrap();

    assert_eq!(mesh.triangle_count(), 2);
    // Every output vertex is one of the four envelope vertices.
    for tri in &mesh.triangles {
        for &i in tri {
            assert!((i as usize) < envelope.len());
        }
    }
}

#[test]
fn envelope_closes_back_to_its_first_vertex() {
    let (left_2d, right_2d, left_3d, right_3d) = unit_strip();
    let envelope = Envelope::from_flattened(&left_2d, &right_2d, &left_3d, &right_3d, 3).unwrap();

    let closed = envelope.closed_2d();
    assert_eq!(closed.first(), closed.last());

    let boundary = envelope.boundary_loop();
    assert_eq!(boundary.first(), Some(&0));
    assert_eq!(boundary.last(), Some(&0));
    assert_eq!(boundary.len(), envelope.len() + 1);
}

#[test]
fn bridge_points_are_interpolated_and_aligned() {
    let (left_2d, right_2d, left_3d, right_3d) = unit_strip();
    let insert_points = 3;
    let envelope =
        Envelope::from_flattened(&left_2d, &right_2d, &left_3d, &right_3d, insert_points).unwrap();

    // left(2) + bridge(3) + right(2) + bridge(3)
    assert_eq!(envelope.len(), 10);

    // First bridge runs from the left end (0,1) to the right end (1,1).
    for i in 0..insert_points {
        let t = (i + 1) as f64 / (insert_points + 1) as f64;
        let node = envelope.nodes_2d()[2 + i];
        assert!((node - Vec2::new(t, 1.0)).length() < 1e-12);
    }

    // The 3D side is assembled with the identical ordering and bridge rule,
    // so in this planar setup every pair must agree coordinate for
    // coordinate.
    for (p2, p3) in envelope.nodes_2d().iter().zip(envelope.nodes_3d()) {
        assert!((p3.x - p2.x).abs() < 1e-12);
        assert!((p3.y - p2.y).abs() < 1e-12);
        assert!(p3.z.abs() < 1e-12);
    }
}

#[test]
fn mismatched_2d_3d_node_counts_are_rejected() {
    let (left_2d, right_2d, _, right_3d) = unit_strip();
    let left_3d = Polyline3::new(vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 0.5, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ])
    .unwrap();

    assert!(Envelope::from_flattened(&left_2d, &right_2d, &left_3d, &right_3d, 0).is_err());
}
