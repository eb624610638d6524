//! Ventilation-hole construction for flattened straps.
//!
//! Holes are laid out in a normalized strip frame: `x` runs 0..1 along the
//! arclength of both flattened sides, `y` blends 0..1 from the left side to
//! the right. The hole outlines are closed B-splines over six control points
//! in that frame, mirrored about the strip's centerline.

use crate::geom::{BSplineCurve2, Polyline2, Vec2};

use super::error::PatternError;

/// A cut-out of a pattern piece: a closed 2D outline and an interior seed
/// point, both in the envelope's frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Hole {
    pub curve: Polyline2,
    pub center: Vec2,
}

/// Hole layout parameters of a diagonal rib.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HoleLayout {
    /// Number of holes. Only 0 and 2 have a defined layout.
    pub hole_num: usize,
    /// Margin between a hole and the strip sides / centerline, as a fraction
    /// of the strip length.
    pub hole_border_side: f64,
    /// Margin between a hole and the strip front/back, as a fraction of the
    /// strip width.
    pub hole_border_front_back: f64,
}

impl Default for HoleLayout {
    fn default() -> Self {
        Self {
            hole_num: 0,
            hole_border_side: 0.2,
            hole_border_front_back: 0.15,
        }
    }
}

/// Compute the hole outlines and seed centers for a flattened strip.
///
/// Only the two-hole layout is implemented; `hole_num == 0` intentionally
/// yields no holes, every other count is unimplemented and yields none with
/// a warning.
pub fn compute_holes(
    left: &Polyline2,
    right: &Polyline2,
    layout: &HoleLayout,
    resolution: usize,
) -> Result<Vec<Hole>, PatternError> {
    match layout.hole_num {
        0 => Ok(Vec::new()),
        2 => two_hole_layout(left, right, layout, resolution),
        other => {
            log::warn!("hole layout for hole_num={other} is not implemented; no holes generated");
            Ok(Vec::new())
        }
    }
}

fn two_hole_layout(
    left: &Polyline2,
    right: &Polyline2,
    layout: &HoleLayout,
    resolution: usize,
) -> Result<Vec<Hole>, PatternError> {
    let len_left = left.length();
    let len_right = right.length();

    // Normalized strip frame: fraction x along either side, blend y across.
    let get_point = |x: f64, y: f64| -> Vec2 {
        let p1 = left.get(left.walk(0.0, len_left * x));
        let p2 = right.get(right.walk(0.0, len_right * x));
        p1.lerp(p2, y)
    };

    let side = layout.hole_border_side;
    let front_back = layout.hole_border_front_back;

    let outlines = [
        [
            get_point(side, 0.5),
            get_point(side, front_back),
            get_point(0.5 - side / 2.0, front_back),
            get_point(0.5 - side / 2.0, 1.0 - front_back),
            get_point(side, 1.0 - front_back),
            get_point(side, 0.5),
        ],
        [
            get_point(0.5 + side / 2.0, 0.5),
            get_point(0.5 + side / 2.0, front_back),
            get_point(1.0 - side, front_back),
            get_point(1.0 - side, 1.0 - front_back),
            get_point(0.5 + side / 2.0, 1.0 - front_back),
            get_point(0.5 + side / 2.0, 0.5),
        ],
    ];

    let centers = [
        get_point(0.25 + side / 4.0, 0.5),
        get_point(0.75 - side / 4.0, 0.5),
    ];

    let mut holes = Vec::with_capacity(2);
    for (outline, center) in outlines.into_iter().zip(centers) {
        let spline = BSplineCurve2::cubic(outline.to_vec()).map_err(PatternError::InvalidInput)?;
        holes.push(Hole {
            curve: spline.sample(resolution),
            center,
        });
    }

    Ok(holes)
}
