//! The indexed output mesh of a pattern piece.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::geom::Vec3;

use super::error::PatternError;

/// Minimum area a mesh polygon may have. Anything smaller marks the whole
/// piece as geometrically degenerate.
pub const MIN_POLYGON_SIZE: f64 = 1e-20;

/// An immutable indexed triangle mesh with named element groups and named
/// boundary loops, ready for export and preview rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternMesh {
    vertices: Vec<Vec3>,
    groups: BTreeMap<String, Vec<[u32; 3]>>,
    boundaries: BTreeMap<String, Vec<u32>>,
}

impl PatternMesh {
    pub fn from_indexed(
        vertices: Vec<Vec3>,
        groups: BTreeMap<String, Vec<[u32; 3]>>,
        boundaries: BTreeMap<String, Vec<u32>>,
    ) -> Result<Self, PatternError> {
        let count = vertices.len() as u32;
        if vertices.iter().any(|v| !v.is_finite()) {
            return Err(PatternError::InvalidInput(
                "mesh vertices must be finite".to_string(),
            ));
        }
        for (name, triangles) in &groups {
            if triangles.iter().flatten().any(|&i| i >= count) {
                return Err(PatternError::InvalidInput(format!(
                    "group {name} references out-of-range vertices"
                )));
            }
        }
        for (name, indices) in &boundaries {
            if indices.iter().any(|&i| i >= count) {
                return Err(PatternError::InvalidInput(format!(
                    "boundary {name} references out-of-range vertices"
                )));
            }
        }

        Ok(Self {
            vertices,
            groups,
            boundaries,
        })
    }

    #[must_use]
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn groups(&self) -> &BTreeMap<String, Vec<[u32; 3]>> {
        &self.groups
    }

    #[must_use]
    pub fn boundaries(&self) -> &BTreeMap<String, Vec<u32>> {
        &self.boundaries
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    fn triangle_area(&self, tri: [u32; 3]) -> f64 {
        let a = self.vertices[tri[0] as usize];
        let b = self.vertices[tri[1] as usize];
        let c = self.vertices[tri[2] as usize];
        0.5 * (b - a).cross(c - a).length()
    }

    /// Min / max / average polygon area over all groups, `None` for a mesh
    /// without polygons.
    #[must_use]
    pub fn polygon_size(&self) -> Option<(f64, f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut count = 0usize;

        for triangles in self.groups.values() {
            for &tri in triangles {
                let area = self.triangle_area(tri);
                min = min.min(area);
                max = max.max(area);
                sum += area;
                count += 1;
            }
        }

        if count == 0 {
            None
        } else {
            Some((min, max, sum / count as f64))
        }
    }

    /// Total polygon area of one named group. Hole interiors are absent from
    /// the groups, so this is already the net cloth area of the piece.
    #[must_use]
    pub fn group_area(&self, name: &str) -> Option<f64> {
        self.groups
            .get(name)
            .map(|triangles| triangles.iter().map(|&tri| self.triangle_area(tri)).sum())
    }

    /// Fail with [`PatternError::GeometryDegenerate`] when any polygon falls
    /// below [`MIN_POLYGON_SIZE`] (or the mesh has none at all). `name`
    /// identifies the pattern piece in the error.
    pub fn validate_polygon_size(&self, name: &str) -> Result<(), PatternError> {
        let min_size = self.polygon_size().map_or(0.0, |(min, _, _)| min);
        if min_size < MIN_POLYGON_SIZE {
            return Err(PatternError::GeometryDegenerate {
                name: name.to_string(),
                min_size,
            });
        }
        Ok(())
    }
}
