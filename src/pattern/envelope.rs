//! Envelope assembly for a flattened strip.
//!
//! The envelope is the closed outer boundary of a pattern piece: the left
//! curve walked forward, a run of interpolated bridge points across to the
//! right curve's end, the right curve walked backwards, and bridge points
//! back to the left curve's start. The 2D polygon and its 3D counterpart are
//! assembled with the identical ordering and bridge rule, so index `i` of
//! one is always the image of index `i` of the other.

use crate::geom::{Polyline2, Polyline3, Vec2, Vec3};

use super::error::PatternError;

#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    nodes_2d: Vec<Vec2>,
    nodes_3d: Vec<Vec3>,
}

impl Envelope {
    /// Assemble the envelope from a flattened curve pair and the matching 3D
    /// pair. `insert_points` bridge vertices are interpolated across each of
    /// the two open ends.
    pub fn from_flattened(
        left_2d: &Polyline2,
        right_2d: &Polyline2,
        left_3d: &Polyline3,
        right_3d: &Polyline3,
        insert_points: usize,
    ) -> Result<Self, PatternError> {
        if left_2d.node_count() != left_3d.node_count()
            || right_2d.node_count() != right_3d.node_count()
        {
            return Err(PatternError::InvalidInput(
                "flattened curves must match their 3d curves node for node".to_string(),
            ));
        }

        let mut nodes_2d: Vec<Vec2> = left_2d.nodes().to_vec();
        let mut nodes_3d: Vec<Vec3> = left_3d.nodes().to_vec();

        let left_2d_nodes = left_2d.nodes();
        let right_2d_nodes = right_2d.nodes();
        let left_3d_nodes = left_3d.nodes();
        let right_3d_nodes = right_3d.nodes();

        bridge_2d(
            &mut nodes_2d,
            *left_2d_nodes.last().unwrap(),
            *right_2d_nodes.last().unwrap(),
            insert_points,
        );
        bridge_3d(
            &mut nodes_3d,
            *left_3d_nodes.last().unwrap(),
            *right_3d_nodes.last().unwrap(),
            insert_points,
        );

        nodes_2d.extend(right_2d_nodes.iter().rev());
        nodes_3d.extend(right_3d_nodes.iter().rev());

        bridge_2d(
            &mut nodes_2d,
            right_2d_nodes[0],
            left_2d_nodes[0],
            insert_points,
        );
        bridge_3d(
            &mut nodes_3d,
            right_3d_nodes[0],
            left_3d_nodes[0],
            insert_points,
        );

        Ok(Self { nodes_2d, nodes_3d })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes_2d.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes_2d.is_empty()
    }

    /// The boundary vertices in the pattern plane, unduplicated.
    #[must_use]
    pub fn nodes_2d(&self) -> &[Vec2] {
        &self.nodes_2d
    }

    /// The exact 3D position of every boundary vertex, index-aligned with
    /// [`Self::nodes_2d`].
    #[must_use]
    pub fn nodes_3d(&self) -> &[Vec3] {
        &self.nodes_3d
    }

    /// The boundary as a cyclic index loop, closed back to vertex 0.
    #[must_use]
    pub fn boundary_loop(&self) -> Vec<u32> {
        let mut indices: Vec<u32> = (0..self.nodes_2d.len() as u32).collect();
        indices.push(0);
        indices
    }

    /// The boundary polygon with the closing vertex repeated
    /// (`first == last`).
    #[must_use]
    pub fn closed_2d(&self) -> Vec<Vec2> {
        let mut polygon = self.nodes_2d.clone();
        polygon.push(self.nodes_2d[0]);
        polygon
    }
}

fn bridge_2d(nodes: &mut Vec<Vec2>, from: Vec2, to: Vec2, insert_points: usize) {
    for i in 0..insert_points {
        let t = (i + 1) as f64 / (insert_points + 1) as f64;
        nodes.push(from.lerp(to, t));
    }
}

fn bridge_3d(nodes: &mut Vec<Vec3>, from: Vec3, to: Vec3, insert_points: usize) {
    for i in 0..insert_points {
        let t = (i + 1) as f64 / (insert_points + 1) as f64;
        nodes.push(from.lerp(to, t));
    }
}
