use super::core::Vec2;
use super::polyline::Polyline2;

/// A clamped B-spline curve in the pattern plane.
///
/// The knot vector is generated internally: clamped at both ends with
/// uniformly spaced interior knots, domain `[0, 1]`. A control polygon whose
/// first and last points coincide therefore yields a closed curve.
#[derive(Debug, Clone, PartialEq)]
pub struct BSplineCurve2 {
    degree: usize,
    control_points: Vec<Vec2>,
    knots: Vec<f64>,
}

impl BSplineCurve2 {
    /// Default curve degree (cubic).
    pub const DEFAULT_DEGREE: usize = 3;

    pub fn new(control_points: Vec<Vec2>, degree: usize) -> Result<Self, String> {
        if control_points.len() < 2 {
            return Err("bspline curve requires at least 2 control points".to_string());
        }
        if degree == 0 {
            return Err("bspline curve degree must be >= 1".to_string());
        }
        if degree >= control_points.len() {
            return Err("bspline curve degree must be < control point count".to_string());
        }
        if control_points.iter().any(|p| !p.is_finite()) {
            return Err("bspline control points must be finite".to_string());
        }

        let knots = clamped_uniform_knots(control_points.len(), degree);
        Ok(Self {
            degree,
            control_points,
            knots,
        })
    }

    /// Cubic curve, falling back to a lower degree for short control polygons.
    pub fn cubic(control_points: Vec<Vec2>) -> Result<Self, String> {
        let degree = Self::DEFAULT_DEGREE.min(control_points.len().saturating_sub(1).max(1));
        Self::new(control_points, degree)
    }

    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    #[must_use]
    pub fn control_points(&self) -> &[Vec2] {
        &self.control_points
    }

    /// Evaluate the curve at `t` in `[0, 1]`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        let mut point = Vec2::ZERO;
        for (i, cp) in self.control_points.iter().enumerate() {
            let weight = basis_function(i, self.degree, t, &self.knots);
            point = point + *cp * weight;
        }
        point
    }

    /// Sample `count` points uniformly in parameter, both ends included.
    /// For a closed control polygon the first and last samples coincide.
    #[must_use]
    pub fn sample(&self, count: usize) -> Polyline2 {
        let count = count.max(2);
        let nodes: Vec<Vec2> = (0..count)
            .map(|i| self.point_at(i as f64 / (count as f64 - 1.0)))
            .collect();
        Polyline2::new(nodes).expect("sampled bspline always has >= 2 finite nodes")
    }
}

/// Clamped knot vector on `[0, 1]` with uniform interior knots.
fn clamped_uniform_knots(control_count: usize, degree: usize) -> Vec<f64> {
    let knot_count = control_count + degree + 1;
    let interior = knot_count - 2 * (degree + 1);
    let mut knots = Vec::with_capacity(knot_count);
    for _ in 0..=degree {
        knots.push(0.0);
    }
    for i in 0..interior {
        knots.push((i + 1) as f64 / (interior + 1) as f64);
    }
    for _ in 0..=degree {
        knots.push(1.0);
    }
    knots
}

/// Computes the B-spline basis function N_{i,p}(t) using the Cox-de Boor recursion.
fn basis_function(i: usize, p: usize, t: f64, knots: &[f64]) -> f64 {
    // Base case: degree 0
    if p == 0 {
        if i + 1 < knots.len() && t >= knots[i] && t < knots[i + 1] {
            return 1.0;
        }
        // Handle the right endpoint (t == last knot)
        if i + 1 < knots.len() && (t - knots[i + 1]).abs() < 1e-14 && t >= knots[i] {
            return 1.0;
        }
        return 0.0;
    }

    let mut result = 0.0;

    // Left term: (t - t_i) / (t_{i+p} - t_i) * N_{i,p-1}(t)
    if i + p < knots.len() {
        let denom = knots[i + p] - knots[i];
        if denom.abs() > 1e-14 {
            result += (t - knots[i]) / denom * basis_function(i, p - 1, t, knots);
        }
    }

    // Right term: (t_{i+p+1} - t) / (t_{i+p+1} - t_{i+1}) * N_{i+1,p-1}(t)
    if i + p + 1 < knots.len() && i + 1 < knots.len() {
        let denom = knots[i + p + 1] - knots[i + 1];
        if denom.abs() > 1e-14 {
            result += (knots[i + p + 1] - t) / denom * basis_function(i + 1, p - 1, t, knots);
        }
    }

    result
}
