//! Seams to the upstream glider model.
//!
//! The parametric rib/cell geometry lives outside this crate; the pattern
//! pipeline only needs the few lookups below. Chordwise positions follow the
//! profile convention: `x` in `[-1, 1]`, negative on the upper surface,
//! positive on the lower surface, `0` at the nose.

use crate::geom::{Polyline3, Vec2, Vec3};

/// The per-rib geometry the pattern pipeline consumes.
pub trait RibGeometry {
    /// Parametric index on the profile curves for a signed chordwise
    /// position.
    fn profile_ik(&self, x: f64) -> f64;

    /// Walk along the profile outline from the signed chordwise position `x`
    /// by an arclength `distance` (in chord units) and return the signed
    /// chordwise position reached. Used to resolve absolute side widths.
    fn walk_x(&self, x: f64, distance: f64) -> f64;

    /// The rib's 3D profile curve, addressable with [`Self::profile_ik`]
    /// results.
    fn profile_curve(&self) -> &Polyline3;

    /// Align a rib-local `(x, height)` point into 3D space.
    fn align(&self, point: Vec2) -> Vec3;
}

/// The two ribs bounding a cell, in the order the side descriptors refer to
/// them: `left` carries a diagonal's left side, `right` its right side.
pub struct CellRibs<'a, R: RibGeometry> {
    pub left: &'a R,
    pub right: &'a R,
}

impl<R: RibGeometry> Clone for CellRibs<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: RibGeometry> Copy for CellRibs<'_, R> {}

impl<'a, R: RibGeometry> CellRibs<'a, R> {
    #[must_use]
    pub fn new(left: &'a R, right: &'a R) -> Self {
        Self { left, right }
    }
}
