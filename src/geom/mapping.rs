//! Bilinear quad-patch parameterization and grid surface mappings.
//!
//! A [`SurfaceMapping2`] spans a grid of [`QuadPatch`]es between a stack of
//! boundary curves and converts between parametric `(ik_x, ik_y)` coordinates
//! and plane coordinates in both directions. Its 3D sibling
//! [`SurfaceMapping3`] is only ever evaluated forward (parametric to space),
//! so it stores the curves directly and blends between them.
//!
//! `(ik_x, ik_y)` follows the polyline convention: integer part selects a
//! grid column/row, fractional part is the local coordinate inside it.

use super::core::{Tolerance, Vec2, Vec3};
use super::polyline::{Polyline2, Polyline3};

/// Errors raised by surface mappings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MappingError {
    /// The boundary curves passed into a mapping have unequal node counts.
    #[error("mapping curves must share a node count: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
    /// No quad patch accepts the queried point within tolerance.
    #[error("point ({x}, {y}) lies outside the mapped domain")]
    Miss { x: f64, y: f64 },
    /// Fewer than two boundary curves were supplied.
    #[error("mapping requires at least 2 boundary curves, got {count}")]
    TooFewCurves { count: usize },
}

// ─────────────────────────────────────────────────────────────────────────────
// QuadPatch
// ─────────────────────────────────────────────────────────────────────────────

/// Inverse of the bilinear corner matrix for the basis {1, l, m, l·m} with
/// corners at (0,0), (1,0), (1,1), (0,1). Row k holds the weights of the
/// corner values in coefficient k.
const CORNER_MATRIX_INVERSE: [[f64; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [-1.0, 1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0, 1.0],
    [1.0, -1.0, 1.0, -1.0],
];

/// Threshold below which the quadratic coefficient of the inverse mapping is
/// treated as zero and the linear fallback is used.
const QUAD_LINEAR_EPS: f64 = 1e-10;

/// An arbitrary quadrilateral with a bilinear parameterization
/// `p(l, m) = a0 + a1·l + a2·m + a3·l·m` per coordinate.
///
/// Corners are stored in the fixed winding (0,0), (1,0), (1,1), (0,1); the
/// bilinear coefficients are solved once at construction via the precomputed
/// corner-matrix inverse and reused for every evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadPatch {
    nodes: [Vec2; 4],
    a: [f64; 4],
    b: [f64; 4],
}

impl QuadPatch {
    #[must_use]
    pub fn new(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> Self {
        let nodes = [p1, p2, p3, p4];
        let xs = [p1.x, p2.x, p3.x, p4.x];
        let ys = [p1.y, p2.y, p3.y, p4.y];

        let mut a = [0.0; 4];
        let mut b = [0.0; 4];
        for k in 0..4 {
            for j in 0..4 {
                a[k] += CORNER_MATRIX_INVERSE[k][j] * xs[j];
                b[k] += CORNER_MATRIX_INVERSE[k][j] * ys[j];
            }
        }

        Self { nodes, a, b }
    }

    #[must_use]
    pub fn nodes(&self) -> &[Vec2; 4] {
        &self.nodes
    }

    /// Evaluate the bilinear map at local coordinates `(l, m)`.
    #[must_use]
    pub fn to_global(&self, l: f64, m: f64) -> Vec2 {
        Vec2::new(
            self.a[0] + self.a[1] * l + self.a[2] * m + self.a[3] * l * m,
            self.b[0] + self.b[1] * l + self.b[2] * m + self.b[3] * l * m,
        )
    }

    /// Invert the bilinear map for `point`.
    ///
    /// Eliminating `l` yields a quadratic `a·m² + b·m + c = 0` in `m`; when
    /// the quadratic coefficient is negligible the linear solution `-c/b` is
    /// used instead. `l` is then back-substituted through whichever divisor
    /// is numerically larger.
    ///
    /// The result may legitimately lie outside the unit square, and is
    /// non-finite when the point has no real preimage; callers decide what
    /// either means.
    #[must_use]
    pub fn to_local(&self, point: Vec2) -> (f64, f64) {
        if (point.x - self.nodes[0].x).abs() < QUAD_LINEAR_EPS
            && (point.y - self.nodes[0].y).abs() < QUAD_LINEAR_EPS
        {
            return (0.0, 0.0);
        }

        let a = self.a[3] * self.b[2] - self.a[2] * self.b[3];
        let b = self.a[3] * self.b[0] - self.a[0] * self.b[3] + self.a[1] * self.b[2]
            - self.a[2] * self.b[1]
            + self.b[3] * point.x
            - self.a[3] * point.y;
        let c = self.a[1] * self.b[0] - self.a[0] * self.b[1] + self.b[1] * point.x
            - self.a[1] * point.y;

        let m = if a.abs() < QUAD_LINEAR_EPS {
            -c / b
        } else {
            // Citardauq-stable solve: both roots without cancellation, then
            // keep the one closer to the unit interval.
            let disc = (b * b - 4.0 * a * c).sqrt();
            let q = -0.5 * (b + b.signum() * disc);
            let m1 = q / a;
            let m2 = c / q;
            let deviation = |m: f64| (-m).max(m - 1.0).max(0.0);
            if deviation(m1) <= deviation(m2) { m1 } else { m2 }
        };

        let divisor_x = self.a[1] + self.a[3] * m;
        let divisor_y = self.b[1] + self.b[3] * m;

        // Back-substitute through the numerically larger divisor.
        let l = if divisor_x.abs() < divisor_y.abs() {
            (point.y - self.b[0] - self.b[2] * m) / divisor_y
        } else {
            (point.x - self.a[0] - self.a[2] * m) / divisor_x
        };

        (l, m)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SurfaceMapping2
// ─────────────────────────────────────────────────────────────────────────────

/// A rectangular grid of quad patches spanned between boundary curves in the
/// pattern plane. Curve `r` and curve `r + 1` bound patch row `r`.
#[derive(Debug, Clone)]
pub struct SurfaceMapping2 {
    curves: Vec<Polyline2>,
    rows: Vec<Vec<QuadPatch>>,
}

impl SurfaceMapping2 {
    pub fn new(curves: Vec<Polyline2>) -> Result<Self, MappingError> {
        let node_count = check_node_counts(curves.iter().map(Polyline2::node_count))?;

        let mut rows = Vec::with_capacity(curves.len() - 1);
        for pair in curves.windows(2) {
            let lower = pair[0].nodes();
            let upper = pair[1].nodes();
            let mut row = Vec::with_capacity(node_count - 1);
            for i in 0..node_count - 1 {
                row.push(QuadPatch::new(
                    lower[i],
                    lower[i + 1],
                    upper[i + 1],
                    upper[i],
                ));
            }
            rows.push(row);
        }

        Ok(Self { curves, rows })
    }

    #[must_use]
    pub fn curves(&self) -> &[Polyline2] {
        &self.curves
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Evaluate the grid at the parametric position `(ik_x, ik_y)`.
    /// Integer parts are clamped to the valid patch range.
    #[must_use]
    pub fn get_point(&self, ik_x: f64, ik_y: f64) -> Vec2 {
        let (row, m) = split_ik(ik_y, self.row_count());
        let (column, l) = split_ik(ik_x, self.column_count());
        self.rows[row][column].to_global(l, m)
    }

    /// Find the parametric position of `point` by scanning every patch and
    /// accepting the first whose local coordinates fall into the unit square
    /// within [`Tolerance::MAPPING`].
    ///
    /// A point outside the mapped domain is an explicit [`MappingError::Miss`].
    pub fn get_iks(&self, point: Vec2) -> Result<(f64, f64), MappingError> {
        let tol = Tolerance::MAPPING.eps;

        for (row_index, row) in self.rows.iter().enumerate() {
            for (column_index, patch) in row.iter().enumerate() {
                let (mut l, mut m) = patch.to_local(point);

                if l.abs() < tol {
                    l = 0.0;
                } else if (l - 1.0).abs() < tol {
                    l = 1.0;
                }
                if m.abs() < tol {
                    m = 0.0;
                } else if (m - 1.0).abs() < tol {
                    m = 1.0;
                }

                if (0.0..=1.0).contains(&l) && (0.0..=1.0).contains(&m) {
                    return Ok((column_index as f64 + l, row_index as f64 + m));
                }
            }
        }

        Err(MappingError::Miss {
            x: point.x,
            y: point.y,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SurfaceMapping3
// ─────────────────────────────────────────────────────────────────────────────

/// The 3D counterpart of [`SurfaceMapping2`]: a stack of space curves
/// evaluated forward by blending neighbouring curves. No inverse exists;
/// parametric positions always originate from the 2D side.
#[derive(Debug, Clone)]
pub struct SurfaceMapping3 {
    curves: Vec<Polyline3>,
}

impl SurfaceMapping3 {
    pub fn new(curves: Vec<Polyline3>) -> Result<Self, MappingError> {
        check_node_counts(curves.iter().map(Polyline3::node_count))?;
        Ok(Self { curves })
    }

    #[must_use]
    pub fn curves(&self) -> &[Polyline3] {
        &self.curves
    }

    /// Evaluate at the parametric position `(ik_x, ik_y)`: the points at
    /// `ik_x` on the two curves bounding row `ik_y` are blended linearly by
    /// the fractional row coordinate.
    #[must_use]
    pub fn get_point(&self, ik_x: f64, ik_y: f64) -> Vec3 {
        let (row, k_y) = split_ik(ik_y, self.curves.len() - 1);
        let p1 = self.curves[row].get(ik_x);
        let p2 = self.curves[row + 1].get(ik_x);
        p1.lerp(p2, k_y)
    }
}

fn check_node_counts(mut counts: impl Iterator<Item = usize>) -> Result<usize, MappingError> {
    let Some(expected) = counts.next() else {
        return Err(MappingError::TooFewCurves { count: 0 });
    };
    let mut total = 1;
    for actual in counts {
        total += 1;
        if actual != expected {
            return Err(MappingError::ShapeMismatch { expected, actual });
        }
    }
    if total < 2 {
        return Err(MappingError::TooFewCurves { count: total });
    }
    Ok(expected)
}

/// Split a parametric coordinate into a cell index clamped to `count` cells
/// and the local fraction within that cell.
fn split_ik(ik: f64, count: usize) -> (usize, f64) {
    debug_assert!(count > 0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = (ik.max(0.0) as usize).min(count - 1);
    (index, ik - index as f64)
}
