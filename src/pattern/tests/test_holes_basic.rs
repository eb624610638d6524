use crate::geom::{Polyline2, Vec2};
use crate::pattern::{HoleLayout, compute_holes};

fn strip() -> (Polyline2, Polyline2) {
    let left = Polyline2::new(vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)]).unwrap();
    let right = Polyline2::new(vec![Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0)]).unwrap();
    (left, right)
}

#[test]
fn two_hole_centers_mirror_about_the_strip_middle() {
    let (left, right) = strip();
    let layout = HoleLayout {
        hole_num: 2,
        ..HoleLayout::default()
    };

    let holes = compute_holes(&left, &right, &layout, 40).unwrap();
    assert_eq!(holes.len(), 2);

    let c1 = holes[0].center;
    let c2 = holes[1].center;
    assert!((c1.x + c2.x - 1.0).abs() < 1e-6, "centers {c1:?} / {c2:?}");
    assert!((c1.y - c2.y).abs() < 1e-6);
    assert!((c1.y - 0.5).abs() < 1e-6);
}

#[test]
fn hole_outlines_are_closed_and_inside_the_strip() {
    let (left, right) = strip();
    let layout = HoleLayout {
        hole_num: 2,
        ..HoleLayout::default()
    };

    let holes = compute_holes(&left, &right, &layout, 40).unwrap();
    for hole in &holes {
        let nodes = hole.curve.nodes();
        assert_eq!(nodes.len(), 40);
        assert!((nodes[0] - *nodes.last().unwrap()).length() < 1e-12);
        for node in nodes {
            assert!(node.x > 0.0 && node.x < 1.0);
            assert!(node.y > 0.0 && node.y < 1.0);
        }
    }
}

#[test]
fn hole_centers_lie_inside_their_outlines() {
    let (left, right) = strip();
    let layout = HoleLayout {
        hole_num: 2,
        ..HoleLayout::default()
    };

    let holes = compute_holes(&left, &right, &layout, 60).unwrap();
    for hole in &holes {
        // Ray cast in +x: an interior point sees an odd crossing count.
        let center = hole.center;
        let nodes = hole.curve.nodes();
        let mut crossings = 0usize;
        for pair in nodes.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if (a.y > center.y) != (b.y > center.y) {
                let t = (center.y - a.y) / (b.y - a.y);
                if a.x + t * (b.x - a.x) > center.x {
                    crossings += 1;
                }
            }
        }
        assert_eq!(crossings % 2, 1, "center {center:?} outside outline");
    }
}

#[test]
fn zero_holes_is_intended_and_silent() {
    let (left, right) = strip();
    let holes = compute_holes(&left, &right, &HoleLayout::default(), 40).unwrap();
    assert!(holes.is_empty());
}

#[test]
fn unsupported_hole_counts_yield_no_holes() {
    let (left, right) = strip();
    let layout = HoleLayout {
        hole_num: 3,
        ..HoleLayout::default()
    };
    let holes = compute_holes(&left, &right, &layout, 40).unwrap();
    assert!(holes.is_empty());
}
