//! Diagonal ribs, tension straps and their meshing pipeline.
//!
//! A diagonal rib spans between two neighbouring ribs of a cell, attached
//! along two sides. Each side either follows the rib's sail surface between
//! two chordwise positions (upper or lower), or runs straight between two
//! explicit `(x, height)` points in the rib's local frame.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geom::{
    Polyline2, Polyline3, SurfaceMapping2, SurfaceMapping3, Triangulation, TriangulationError,
    Vec2, Vec3,
};

use super::cache::{FlattenCache, curve_pair_fingerprint};
use super::envelope::Envelope;
use super::error::PatternError;
use super::holes::{Hole, HoleLayout, compute_holes};
use super::mesh::PatternMesh;
use super::registry::PatternContext;
use super::rib::{CellRibs, RibGeometry};

/// Name of the triangle group and boundary loop a diagonal contributes.
const GROUP_NAME: &str = "diagonals";

/// A side width, either relative to the chord or absolute along the profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Width {
    Fraction(f64),
    Absolute(f64),
}

/// Connection between a diagonal and a rib.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagonalSide {
    /// Chordwise center of the attachment.
    pub center: f64,
    pub width: Width,
    /// Relative height in the rib frame: -1 is the lower sail, +1 the upper
    /// sail, anything between is a free point above the lower surface.
    pub height: f64,
}

impl DiagonalSide {
    #[must_use]
    pub fn new(center: f64, width: Width, height: f64) -> Self {
        Self {
            center,
            width,
            height,
        }
    }

    #[must_use]
    pub fn is_lower(&self) -> bool {
        self.height == -1.0
    }

    #[must_use]
    pub fn is_upper(&self) -> bool {
        self.height == 1.0
    }

    fn half_width(&self, rib: &impl RibGeometry, sign: f64) -> f64 {
        match self.width {
            Width::Fraction(w) => self.center + sign * w / 2.0,
            Width::Absolute(w) => rib.walk_x(self.center, sign * w / 2.0),
        }
    }

    /// Chordwise start of the attachment.
    #[must_use]
    pub fn start_x(&self, rib: &impl RibGeometry) -> f64 {
        self.half_width(rib, -1.0)
    }

    /// Chordwise end of the attachment.
    #[must_use]
    pub fn end_x(&self, rib: &impl RibGeometry) -> f64 {
        self.half_width(rib, 1.0)
    }

    /// The side's 3D curve on its rib.
    ///
    /// Sides on the sail surface are sliced out of the rib's existing 3D
    /// profile by arclength; free sides align their two end points into
    /// space individually.
    pub fn get_curve(&self, rib: &impl RibGeometry) -> Result<Polyline3, PatternError> {
        if self.is_lower() || self.is_upper() {
            let factor = if self.is_upper() { -1.0 } else { 1.0 };
            let front_ik = rib.profile_ik(self.start_x(rib) * factor);
            let back_ik = rib.profile_ik(self.end_x(rib) * factor);
            Ok(rib.profile_curve().sub_curve(front_ik, back_ik))
        } else {
            let start = rib.align(Vec2::new(self.start_x(rib), self.height));
            let end = rib.align(Vec2::new(self.end_x(rib), self.height));
            Polyline3::new(vec![start, end]).map_err(PatternError::InvalidInput)
        }
    }
}

/// A reinforcement patch between the two ribs of a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagonalRib {
    pub left: DiagonalSide,
    pub right: DiagonalSide,

    #[serde(default)]
    pub material_code: String,
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_num_folds")]
    pub num_folds: usize,

    #[serde(flatten)]
    pub holes: HoleLayout,
}

fn default_name() -> String {
    "unnamed".to_string()
}

fn default_num_folds() -> usize {
    1
}

impl DiagonalRib {
    #[must_use]
    pub fn new(left: DiagonalSide, right: DiagonalSide) -> Self {
        Self {
            left,
            right,
            material_code: String::new(),
            name: default_name(),
            num_folds: default_num_folds(),
            holes: HoleLayout::default(),
        }
    }

    /// A strap: both sides on the same sail surface with a shared width.
    #[must_use]
    pub fn tension_strap(left: f64, right: f64, width: Width, height: f64) -> Self {
        Self::new(
            DiagonalSide::new(left, width, height),
            DiagonalSide::new(right, width, height),
        )
    }

    /// A tension line: a strap of fixed 0.01 width on the lower sail.
    #[must_use]
    pub fn tension_line(left: f64, right: f64) -> Self {
        Self::tension_strap(left, right, Width::Absolute(0.01), -1.0)
    }

    #[must_use]
    pub fn is_upper(&self) -> bool {
        self.left.is_upper() && self.right.is_upper()
    }

    #[must_use]
    pub fn is_lower(&self) -> bool {
        self.left.is_lower() && self.right.is_lower()
    }

    /// Swap the two sides in place.
    pub fn mirror(&mut self) {
        std::mem::swap(&mut self.left, &mut self.right);
    }

    /// Average chordwise position, used for sorting diagonals along a cell.
    #[must_use]
    pub fn get_average_x(&self) -> f64 {
        (self.left.center + self.right.center) / 2.0
    }

    /// Straight-line distance between the two side centers.
    #[must_use]
    pub fn get_center_length<R: RibGeometry>(&self, cell: &CellRibs<'_, R>) -> f64 {
        let p1 = cell
            .left
            .profile_curve()
            .get(cell.left.profile_ik(self.left.center));
        let p2 = cell
            .right
            .profile_curve()
            .get(cell.right.profile_ik(self.right.center));
        (p2 - p1).length()
    }

    /// The two 3D side curves of the patch: `(left, right)`.
    pub fn get_3d<R: RibGeometry>(
        &self,
        cell: &CellRibs<'_, R>,
    ) -> Result<(Polyline3, Polyline3), PatternError> {
        let left = self.left.get_curve(cell.left)?;
        let right = self.right.get_curve(cell.right)?;
        Ok((left, right))
    }

    /// The flattened side curves: `(left, right)`, node counts preserved.
    pub fn get_flattened<R: RibGeometry>(
        &self,
        cell: &CellRibs<'_, R>,
        ctx: &PatternContext<'_>,
    ) -> Result<(Polyline2, Polyline2), PatternError> {
        let (left, right) = self.get_3d(cell)?;
        ctx.flattener
            .flatten(&left, &right)
            .map_err(PatternError::Flatten)
    }

    /// Hole outlines and seed centers in the flattened frame.
    pub fn get_holes<R: RibGeometry>(
        &self,
        cell: &CellRibs<'_, R>,
        ctx: &PatternContext<'_>,
    ) -> Result<Vec<Hole>, PatternError> {
        let (left_2d, right_2d) = self.get_flattened(cell, ctx)?;
        compute_holes(&left_2d, &right_2d, &self.holes, ctx.options.hole_resolution)
    }

    /// Mesh the patch: envelope and holes, constrained triangulation, then
    /// re-embedding of every vertex into 3D.
    pub fn get_mesh<R: RibGeometry>(
        &self,
        cell: &CellRibs<'_, R>,
        ctx: &PatternContext<'_>,
    ) -> Result<PatternMesh, PatternError> {
        let (left_3d, right_3d) = self.get_3d(cell)?;
        let (left_2d, right_2d) = ctx
            .flattener
            .flatten(&left_3d, &right_3d)
            .map_err(PatternError::Flatten)?;
        self.build_mesh(ctx, &left_3d, &right_3d, &left_2d, &right_2d)
    }

    /// [`Self::get_mesh`] with the flatten step memoized in `cache`.
    pub fn get_mesh_cached<R: RibGeometry>(
        &self,
        cell: &CellRibs<'_, R>,
        ctx: &PatternContext<'_>,
        cache: &mut FlattenCache,
    ) -> Result<PatternMesh, PatternError> {
        let (left_3d, right_3d) = self.get_3d(cell)?;
        let fingerprint = curve_pair_fingerprint(&left_3d, &right_3d);
        let (left_2d, right_2d) = cache.get_or_insert_with(fingerprint, || {
            ctx.flattener
                .flatten(&left_3d, &right_3d)
                .map_err(PatternError::Flatten)
        })?;
        self.build_mesh(ctx, &left_3d, &right_3d, &left_2d, &right_2d)
    }

    fn build_mesh(
        &self,
        ctx: &PatternContext<'_>,
        left_3d: &Polyline3,
        right_3d: &Polyline3,
        left_2d: &Polyline2,
        right_2d: &Polyline2,
    ) -> Result<PatternMesh, PatternError> {
        let envelope = Envelope::from_flattened(
            left_2d,
            right_2d,
            left_3d,
            right_3d,
            ctx.options.insert_points,
        )?;

        let holes = compute_holes(left_2d, right_2d, &self.holes, ctx.options.hole_resolution)?;

        let mut vertices = envelope.nodes_2d().to_vec();
        let mut loops = vec![envelope.boundary_loop()];
        let mut seeds = Vec::with_capacity(holes.len());

        for hole in &holes {
            let start = vertices.len() as u32;
            // The sampled outline repeats its first point; the loop closure
            // is expressed through indices instead.
            let outline = &hole.curve.nodes()[..hole.curve.node_count() - 1];
            vertices.extend_from_slice(outline);
            let mut indices: Vec<u32> = (start..start + outline.len() as u32).collect();
            indices.push(start);
            loops.push(indices);
            seeds.push(hole.center);
        }

        let triangulation = Triangulation::new(vertices, loops, seeds);
        let flat_mesh = match triangulation.triangulate() {
            Ok(mesh) => mesh,
            Err(TriangulationError::DegenerateBoundary) => {
                return Err(PatternError::GeometryDegenerate {
                    name: self.name.clone(),
                    min_size: 0.0,
                });
            }
            Err(err) => return Err(err.into()),
        };

        // Map the triangulated 2D vertices back onto the strip. Envelope
        // vertices carry their exact 3D position; everything beyond them is
        // resolved through the surface-mapping pair.
        let resolution = ctx.options.mapping_resolution;
        let mapping_2d = SurfaceMapping2::new(vec![
            right_2d.resample(resolution),
            left_2d.resample(resolution),
        ])?;
        let mapping_3d = SurfaceMapping3::new(vec![
            right_3d.resample(resolution),
            left_3d.resample(resolution),
        ])?;

        let mut points_3d: Vec<Vec3> = Vec::with_capacity(flat_mesh.vertices.len());
        points_3d.extend_from_slice(envelope.nodes_3d());
        for &point in &flat_mesh.vertices[envelope.len()..] {
            let (ik_x, ik_y) = mapping_2d.get_iks(point)?;
            points_3d.push(mapping_3d.get_point(ik_x, ik_y));
        }

        let boundary_nodes: Vec<u32> = (0..envelope.len() as u32).collect();
        let mut groups = BTreeMap::new();
        groups.insert(GROUP_NAME.to_string(), flat_mesh.triangles.clone());
        let mut boundaries = BTreeMap::new();
        boundaries.insert(GROUP_NAME.to_string(), boundary_nodes);

        let mesh = PatternMesh::from_indexed(points_3d, groups, boundaries)?;
        mesh.validate_polygon_size(&self.name)?;

        log::debug!(
            "meshed {}: {} vertices, {} triangles, {} holes",
            self.name,
            mesh.vertex_count(),
            mesh.triangle_count(),
            holes.len()
        );

        Ok(mesh)
    }
}

/// A cell element as it appears in a configuration table, decoded by its
/// keyword tag. The sum type replaces any reflection over element classes:
/// each kind declares its schema statically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CellElement {
    Diagonal(DiagonalRib),
    Strap {
        left: f64,
        right: f64,
        width: Width,
        #[serde(default = "default_strap_height")]
        height: f64,
    },
    Line {
        left: f64,
        right: f64,
    },
}

fn default_strap_height() -> f64 {
    -1.0
}

impl CellElement {
    /// The keyword tag of this element kind.
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Diagonal(_) => "diagonal",
            Self::Strap { .. } => "strap",
            Self::Line { .. } => "line",
        }
    }

    /// Resolve the element into the descriptor the pipeline meshes.
    #[must_use]
    pub fn descriptor(&self) -> DiagonalRib {
        match self {
            Self::Diagonal(rib) => rib.clone(),
            Self::Strap {
                left,
                right,
                width,
                height,
            } => DiagonalRib::tension_strap(*left, *right, *width, *height),
            Self::Line { left, right } => DiagonalRib::tension_line(*left, *right),
        }
    }
}
