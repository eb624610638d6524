//! The developable-flattening seam.
//!
//! Turning two 3D boundary curves into two comparable 2D boundary curves is
//! a concern of the surrounding application; the pattern pipeline only
//! requires the [`Flattener`] contract. [`StripFlattener`] is the stock
//! implementation: it unrolls the strip segment pair by segment pair, which
//! is length-preserving exactly when the strip is developable and a close
//! approximation for the mildly curved strips a canopy produces.

use crate::geom::{Polyline2, Polyline3, Vec2, Vec3};

/// Maps a pair of 3D boundary curves onto the pattern plane.
///
/// Implementations must preserve each curve's node count: node `i` of an
/// output curve is the flattened image of node `i` of the matching input.
pub trait Flattener {
    fn flatten(
        &self,
        left: &Polyline3,
        right: &Polyline3,
    ) -> Result<(Polyline2, Polyline2), String>;
}

/// Strip unrolling via per-point projection onto the last known 3D/2D pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct StripFlattener;

impl StripFlattener {
    /// Place `point` relative to two reference points known in both spaces:
    /// the component along the reference axis keeps its 3D measure, the
    /// remainder is laid out perpendicular to the 2D axis.
    fn place(p1_3d: Vec3, p1_2d: Vec2, p2_3d: Vec3, p2_2d: Vec2, point: Vec3) -> Vec2 {
        let axis_3d = (p2_3d - p1_3d).normalized().unwrap_or(Vec3::new(1.0, 0.0, 0.0));
        let axis_2d = (p2_2d - p1_2d).normalized().unwrap_or(Vec2::new(1.0, 0.0));

        let diff = point - p1_3d;
        let along = axis_3d.dot(diff);
        let in_line = p1_2d + axis_2d * along;

        let rest = diff - axis_3d * along;
        in_line + axis_2d.perp_cw() * rest.length()
    }

    fn flatten_pair(left: &Polyline3, right: &Polyline3) -> (Vec<Vec2>, Vec<Vec2>) {
        let l = left.nodes();
        let r = right.nodes();

        let mut flat_left: Vec<Vec2> = vec![Vec2::new(0.0, 0.0)];
        let mut flat_right: Vec<Vec2> = vec![Vec2::new((l[0] - r[0]).length(), 0.0)];

        let mut index_left = 0usize;
        let mut index_right = 0usize;

        loop {
            if index_left < l.len() - 1 {
                flat_left.push(Self::place(
                    l[index_left],
                    flat_left[index_left],
                    r[index_right],
                    flat_right[index_right],
                    l[index_left + 1],
                ));
                index_left += 1;
            }

            if index_right < r.len() - 1 {
                flat_right.push(Self::place(
                    l[index_left],
                    flat_left[index_left],
                    r[index_right],
                    flat_right[index_right],
                    r[index_right + 1],
                ));
                index_right += 1;
            }

            if index_left == l.len() - 1 && index_right == r.len() - 1 {
                break;
            }
        }

        (flat_left, flat_right)
    }
}

impl Flattener for StripFlattener {
    fn flatten(
        &self,
        left: &Polyline3,
        right: &Polyline3,
    ) -> Result<(Polyline2, Polyline2), String> {
        let (flat_left, flat_right) = Self::flatten_pair(left, right);
        let left_2d = Polyline2::new(flat_left)?;
        let right_2d = Polyline2::new(flat_right)?;
        Ok((left_2d, right_2d))
    }
}
