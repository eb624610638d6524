//! Constrained triangulation of a boundary-loop region.
//!
//! The contract mirrors a planar-straight-line-graph triangulator run in
//! boundary-preserving mode:
//! - the output vertex list is the input vertex list, unchanged; no Steiner
//!   points are inserted, on the boundary or anywhere else;
//! - every boundary edge of every loop appears exactly in the output;
//! - the interior of every hole loop is excluded, marked by one interior
//!   seed point per hole;
//! - triangles are emitted counter-clockwise.
//!
//! The triangulation is built by ear clipping with hole bridging, followed
//! by a recovery pass that re-splits edges at collinear boundary vertices
//! (so straight boundary runs keep all their vertices) and a Delaunay
//! edge-flip pass that never crosses a constraint edge.

use std::collections::{HashMap, HashSet, VecDeque};

use super::core::{Tolerance, Vec2};

/// Enclosed area at or below which a boundary is considered degenerate.
const DEGENERATE_AREA: f64 = 1e-20;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TriangulationError {
    #[error("vertex index {index} out of range ({count} vertices)")]
    IndexOutOfRange { index: u32, count: usize },
    #[error("triangulation vertices must be finite")]
    NonFinitePoint,
    #[error("boundary loop {index} has fewer than 3 distinct vertices")]
    LoopTooShort { index: usize },
    #[error("at least one boundary loop is required")]
    NoBoundary,
    #[error("outer boundary encloses no area")]
    DegenerateBoundary,
    #[error("no bridge found from hole loop {index} to the outer boundary")]
    HoleBridge { index: usize },
    #[error("failed to triangulate boundary (self-intersecting input?)")]
    NoEars,
    #[error("triangulation produced no triangles")]
    Empty,
}

/// A triangulated planar region: the input vertices plus CCW index triples.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleMesh {
    pub vertices: Vec<Vec2>,
    pub triangles: Vec<[u32; 3]>,
}

impl TriangleMesh {
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

/// A triangulation problem: vertices, closed boundary loops (loop 0 is the
/// outer boundary, the rest are holes) and one interior seed point per hole.
#[derive(Debug, Clone)]
pub struct Triangulation {
    vertices: Vec<Vec2>,
    loops: Vec<Vec<u32>>,
    seeds: Vec<Vec2>,
}

impl Triangulation {
    /// Loops may repeat their first index at the end; the duplicate is
    /// dropped during normalization.
    #[must_use]
    pub fn new(vertices: Vec<Vec2>, loops: Vec<Vec<u32>>, seeds: Vec<Vec2>) -> Self {
        Self {
            vertices,
            loops,
            seeds,
        }
    }

    pub fn triangulate(&self) -> Result<TriangleMesh, TriangulationError> {
        self.triangulate_with_tolerance(Tolerance::default_geom())
    }

    pub fn triangulate_with_tolerance(
        &self,
        tol: Tolerance,
    ) -> Result<TriangleMesh, TriangulationError> {
        if self.vertices.iter().any(|p| !p.is_finite()) {
            return Err(TriangulationError::NonFinitePoint);
        }

        let loops = self.normalized_loops()?;
        let outer = &loops[0];
        if outer.len() < 3 {
            return Err(TriangulationError::LoopTooShort { index: 0 });
        }
        if signed_loop_area(&self.vertices, outer).abs() <= DEGENERATE_AREA {
            return Err(TriangulationError::DegenerateBoundary);
        }

        let constraints = constraint_edges(&loops);

        let mut nodes: Vec<Node> = Vec::new();
        let outer_start = build_ring_nodes(&mut nodes, outer, &self.vertices);
        let mut outer_start = filter_ring_points(outer_start, &mut nodes, tol)
            .ok_or(TriangulationError::DegenerateBoundary)?;

        let mut hole_lefts: Vec<usize> = Vec::new();
        for (loop_index, hole) in loops.iter().enumerate().skip(1) {
            if hole.len() < 3 {
                return Err(TriangulationError::LoopTooShort { index: loop_index });
            }
            let start = build_ring_nodes(&mut nodes, hole, &self.vertices);
            if let Some(filtered) = filter_ring_points(start, &mut nodes, tol) {
                hole_lefts.push(leftmost_node(filtered, &nodes));
            }
        }
        hole_lefts.sort_by(|&a, &b| {
            let pa = nodes[a].point;
            let pb = nodes[b].point;
            pa.x.total_cmp(&pb.x).then_with(|| pa.y.total_cmp(&pb.y))
        });

        for (hole_index, hole_left) in hole_lefts.into_iter().enumerate() {
            let bridge = find_hole_bridge(hole_left, outer_start, &nodes, tol)
                .ok_or(TriangulationError::HoleBridge { index: hole_index + 1 })?;
            split_polygon(bridge, hole_left, &mut nodes);
            outer_start = filter_ring_points(outer_start, &mut nodes, tol)
                .ok_or(TriangulationError::DegenerateBoundary)?;
        }

        let mut triangles = earclip_polygon(outer_start, &mut nodes, tol)?;
        triangles.retain(|t| t[0] != t[1] && t[1] != t[2] && t[0] != t[2]);
        if triangles.is_empty() {
            return Err(TriangulationError::Empty);
        }

        self.recover_boundary_vertices(&loops, &mut triangles, tol);
        self.delaunay_flip(&mut triangles, &constraints);
        self.exclude_seed_faces(&mut triangles, &constraints, tol);

        if triangles.is_empty() {
            return Err(TriangulationError::Empty);
        }

        // Normalize output winding.
        for tri in &mut triangles {
            let a = self.vertices[tri[0] as usize];
            let b = self.vertices[tri[1] as usize];
            let c = self.vertices[tri[2] as usize];
            if orient2d(a, b, c) < 0.0 {
                tri.swap(1, 2);
            }
        }

        log::debug!(
            "triangulated {} vertices / {} loops into {} triangles",
            self.vertices.len(),
            loops.len(),
            triangles.len()
        );

        Ok(TriangleMesh {
            vertices: self.vertices.clone(),
            triangles,
        })
    }

    fn normalized_loops(&self) -> Result<Vec<Vec<u32>>, TriangulationError> {
        if self.loops.is_empty() {
            return Err(TriangulationError::NoBoundary);
        }
        let count = self.vertices.len();
        let mut loops = Vec::with_capacity(self.loops.len());
        for raw in &self.loops {
            let mut indices = raw.clone();
            if indices.len() > 1 && indices.first() == indices.last() {
                indices.pop();
            }
            for &index in &indices {
                if index as usize >= count {
                    return Err(TriangulationError::IndexOutOfRange { index, count });
                }
            }
            loops.push(indices);
        }

        // Hole rings must wind against the outer ring, or the bridge merge
        // would fold the combined polygon onto itself.
        let outer_sign = signed_loop_area(&self.vertices, &loops[0]).is_sign_positive();
        for hole in loops.iter_mut().skip(1) {
            if signed_loop_area(&self.vertices, hole).is_sign_positive() == outer_sign {
                hole.reverse();
            }
        }
        Ok(loops)
    }

    /// Re-split triangle edges at boundary vertices that ear clipping dropped
    /// as collinear, so every loop vertex and every loop edge survives into
    /// the output.
    fn recover_boundary_vertices(
        &self,
        loops: &[Vec<u32>],
        triangles: &mut Vec<[u32; 3]>,
        tol: Tolerance,
    ) {
        let mut used: HashSet<u32> = triangles.iter().flatten().copied().collect();

        for ring in loops {
            for &vi in ring {
                if used.contains(&vi) {
                    continue;
                }
                let p = self.vertices[vi as usize];
                let Some(edge) = self.find_containing_edge(triangles, p, tol) else {
                    log::debug!("boundary vertex {vi} could not be recovered onto an edge");
                    continue;
                };

                let mut split: Vec<[u32; 3]> = Vec::new();
                triangles.retain(|&tri| {
                    if triangle_edge_position(tri, edge).is_some() {
                        let apex = tri
                            .iter()
                            .copied()
                            .find(|&v| v != edge.0 && v != edge.1)
                            .unwrap_or(tri[0]);
                        // Preserve winding: (a, vi, apex) + (vi, b, apex) keep
                        // the parent's orientation since vi lies on a-b.
                        let (a, b) = oriented_edge(tri, edge);
                        split.push([a, vi, apex]);
                        split.push([vi, b, apex]);
                        false
                    } else {
                        true
                    }
                });
                triangles.extend(split);
                used.insert(vi);
            }
        }
    }

    fn find_containing_edge(
        &self,
        triangles: &[[u32; 3]],
        p: Vec2,
        tol: Tolerance,
    ) -> Option<(u32, u32)> {
        for tri in triangles {
            for k in 0..3 {
                let a = tri[k];
                let b = tri[(k + 1) % 3];
                let pa = self.vertices[a as usize];
                let pb = self.vertices[b as usize];
                if (p - pa).length() <= tol.eps || (p - pb).length() <= tol.eps {
                    continue;
                }
                if distance_point_to_segment(pa, pb, p) <= tol.eps.max(1e-12) {
                    return Some(sort_edge(a, b));
                }
            }
        }
        None
    }

    /// Lawson flip pass: restore the Delaunay criterion on every interior
    /// edge that is not a boundary constraint.
    fn delaunay_flip(&self, triangles: &mut [[u32; 3]], constraints: &HashSet<(u32, u32)>) {
        let max_passes = 3 * triangles.len() + 8;
        for _ in 0..max_passes {
            let mut edge_map: HashMap<(u32, u32), Vec<usize>> = HashMap::new();
            for (ti, tri) in triangles.iter().enumerate() {
                for k in 0..3 {
                    let edge = sort_edge(tri[k], tri[(k + 1) % 3]);
                    edge_map.entry(edge).or_default().push(ti);
                }
            }

            let mut modified: HashSet<usize> = HashSet::new();
            let mut changed = false;

            let mut edges: Vec<(u32, u32)> = edge_map.keys().copied().collect();
            edges.sort_unstable();
            for edge in edges {
                if constraints.contains(&edge) {
                    continue;
                }
                let tris = &edge_map[&edge];
                if tris.len() != 2 || modified.contains(&tris[0]) || modified.contains(&tris[1]) {
                    continue;
                }
                let (t1, t2) = (tris[0], tris[1]);
                let Some(mut p) = opposite_vertex(triangles[t1], edge) else {
                    continue;
                };
                let Some(mut q) = opposite_vertex(triangles[t2], edge) else {
                    continue;
                };
                if p == q {
                    continue;
                }

                let (u, v) = edge;
                let pu = self.vertices[u as usize];
                let pv = self.vertices[v as usize];
                // Keep p on the left of u -> v so the rebuilt pair below is CCW.
                if orient2d(pu, pv, self.vertices[p as usize]) < 0.0 {
                    std::mem::swap(&mut p, &mut q);
                }
                let pp = self.vertices[p as usize];
                let pq = self.vertices[q as usize];

                if !in_circumcircle(pu, pv, pp, pq) {
                    continue;
                }
                // Only flip across a strictly convex quad.
                if orient2d(pu, pq, pp) <= 0.0 || orient2d(pq, pv, pp) <= 0.0 {
                    continue;
                }

                triangles[t1] = [u, q, p];
                triangles[t2] = [q, v, p];
                modified.insert(t1);
                modified.insert(t2);
                changed = true;
            }

            if !changed {
                break;
            }
        }
    }

    /// Remove every face reachable from a seed point without crossing a
    /// constraint edge. Bridged hole loops are already excluded structurally,
    /// so this usually removes nothing, but it is what makes the seed list
    /// authoritative.
    fn exclude_seed_faces(
        &self,
        triangles: &mut Vec<[u32; 3]>,
        constraints: &HashSet<(u32, u32)>,
        tol: Tolerance,
    ) {
        if self.seeds.is_empty() || triangles.is_empty() {
            return;
        }

        let mut edge_map: HashMap<(u32, u32), Vec<usize>> = HashMap::new();
        for (ti, tri) in triangles.iter().enumerate() {
            for k in 0..3 {
                let edge = sort_edge(tri[k], tri[(k + 1) % 3]);
                edge_map.entry(edge).or_default().push(ti);
            }
        }

        let mut removed: HashSet<usize> = HashSet::new();
        for &seed in &self.seeds {
            let Some(start) = triangles.iter().position(|&tri| {
                let a = self.vertices[tri[0] as usize];
                let b = self.vertices[tri[1] as usize];
                let c = self.vertices[tri[2] as usize];
                point_in_triangle(a, b, c, seed, orient2d(a, b, c) > 0.0, tol)
            }) else {
                continue;
            };

            let mut queue = VecDeque::from([start]);
            while let Some(ti) = queue.pop_front() {
                if !removed.insert(ti) {
                    continue;
                }
                let tri = triangles[ti];
                for k in 0..3 {
                    let edge = sort_edge(tri[k], tri[(k + 1) % 3]);
                    if constraints.contains(&edge) {
                        continue;
                    }
                    for &other in &edge_map[&edge] {
                        if !removed.contains(&other) {
                            queue.push_back(other);
                        }
                    }
                }
            }
        }

        if !removed.is_empty() {
            log::debug!("excluded {} seed-marked faces", removed.len());
            let mut index = 0usize;
            triangles.retain(|_| {
                let keep = !removed.contains(&index);
                index += 1;
                keep
            });
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Ring machinery
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct Node {
    idx: u32,
    point: Vec2,
    prev: usize,
    next: usize,
}

fn build_ring_nodes(nodes: &mut Vec<Node>, ring: &[u32], vertices: &[Vec2]) -> usize {
    let start_idx = nodes.len();
    let len = ring.len();
    for &idx in ring {
        nodes.push(Node {
            idx,
            point: vertices[idx as usize],
            prev: 0,
            next: 0,
        });
    }
    for i in 0..len {
        let current = start_idx + i;
        nodes[current].prev = start_idx + (i + len - 1) % len;
        nodes[current].next = start_idx + (i + 1) % len;
    }
    start_idx
}

fn ring_len(start: usize, nodes: &[Node]) -> usize {
    let mut count = 0usize;
    let mut cur = start;
    loop {
        count += 1;
        cur = nodes[cur].next;
        if cur == start || count > nodes.len().saturating_add(1) {
            break;
        }
    }
    count
}

fn filter_ring_points(start: usize, nodes: &mut Vec<Node>, tol: Tolerance) -> Option<usize> {
    if ring_len(start, nodes) < 3 {
        return None;
    }

    let mut start = start;
    let mut cur = start;
    let mut guard = 0usize;

    loop {
        guard += 1;
        if guard > nodes.len().saturating_mul(4).max(16) {
            break;
        }

        let prev = nodes[cur].prev;
        let next = nodes[cur].next;
        if cur == next || cur == prev || prev == next {
            break;
        }

        let p = nodes[prev].point;
        let c = nodes[cur].point;
        let n = nodes[next].point;

        let dup = tol.approx_eq_vec2(p, c) || tol.approx_eq_vec2(c, n);
        let collinear = distance_point_to_line(p, c, n) <= tol.eps;

        if dup || collinear {
            if cur == start {
                start = next;
            }
            remove_node(cur, nodes);
            cur = prev;
            if ring_len(start, nodes) < 3 {
                return None;
            }
        } else {
            cur = next;
        }

        if cur == start {
            break;
        }
    }

    Some(start)
}

fn leftmost_node(start: usize, nodes: &[Node]) -> usize {
    let mut left = start;
    let mut cur = nodes[start].next;
    while cur != start {
        let a = nodes[cur].point;
        let b = nodes[left].point;
        if a.x < b.x || (a.x == b.x && a.y < b.y) {
            left = cur;
        }
        cur = nodes[cur].next;
    }
    left
}

fn find_hole_bridge(hole: usize, outer_start: usize, nodes: &[Node], tol: Tolerance) -> Option<usize> {
    let hole_p = nodes[hole].point;
    let mut best_x = f64::NEG_INFINITY;
    let mut best_edge = None;

    let mut p = outer_start;
    loop {
        let q = nodes[p].next;
        let a = nodes[p].point;
        let b = nodes[q].point;

        if (a.y > hole_p.y) != (b.y > hole_p.y) {
            let denom = b.y - a.y;
            if denom != 0.0 {
                let t = (hole_p.y - a.y) / denom;
                let x = a.x + t * (b.x - a.x);
                if x <= hole_p.x + tol.eps && x > best_x {
                    best_x = x;
                    best_edge = Some((p, q));
                }
            }
        }

        p = q;
        if p == outer_start {
            break;
        }
    }

    let (e0, e1) = best_edge?;
    let candidates = if nodes[e0].point.x < nodes[e1].point.x {
        [e0, e1]
    } else {
        [e1, e0]
    };

    for cand in candidates {
        if is_visible(hole_p, nodes[cand].point, cand, outer_start, nodes, tol) {
            return Some(cand);
        }
    }

    let mut best = None;
    let mut best_dist2 = f64::INFINITY;

    let mut v = outer_start;
    loop {
        let p = nodes[v].point;
        if p.x <= hole_p.x + tol.eps && is_visible(hole_p, p, v, outer_start, nodes, tol) {
            let d2 = (p - hole_p).length_squared();
            if d2 < best_dist2 {
                best_dist2 = d2;
                best = Some(v);
            }
        }

        v = nodes[v].next;
        if v == outer_start {
            break;
        }
    }

    best
}

fn split_polygon(a: usize, b: usize, nodes: &mut Vec<Node>) {
    let a_next = nodes[a].next;
    let b_prev = nodes[b].prev;

    let a2 = nodes.len();
    nodes.push(Node {
        idx: nodes[a].idx,
        point: nodes[a].point,
        prev: 0,
        next: 0,
    });

    let b2 = nodes.len();
    nodes.push(Node {
        idx: nodes[b].idx,
        point: nodes[b].point,
        prev: 0,
        next: 0,
    });

    nodes[a].next = b;
    nodes[b].prev = a;

    nodes[b_prev].next = b2;
    nodes[b2].prev = b_prev;

    nodes[b2].next = a2;
    nodes[a2].prev = b2;

    nodes[a2].next = a_next;
    nodes[a_next].prev = a2;
}

fn earclip_polygon(
    start: usize,
    nodes: &mut Vec<Node>,
    tol: Tolerance,
) -> Result<Vec<[u32; 3]>, TriangulationError> {
    let mut start =
        filter_ring_points(start, nodes, tol).ok_or(TriangulationError::DegenerateBoundary)?;

    let is_ccw = signed_area_ring(start, nodes) > 0.0;
    let mut remaining = ring_len(start, nodes);
    if remaining < 3 {
        return Err(TriangulationError::DegenerateBoundary);
    }

    let mut ear = start;
    let mut stop = start;
    let mut triangles = Vec::with_capacity(remaining.saturating_sub(2));
    let mut passes_without_clip = 0usize;

    while remaining > 2 {
        let prev = nodes[ear].prev;
        let next = nodes[ear].next;
        if is_ear(prev, ear, next, nodes, is_ccw, tol) {
            if is_ccw {
                triangles.push([nodes[prev].idx, nodes[ear].idx, nodes[next].idx]);
            } else {
                triangles.push([nodes[prev].idx, nodes[next].idx, nodes[ear].idx]);
            }

            if ear == start {
                start = next;
            }
            remove_node(ear, nodes);
            remaining -= 1;
            ear = next;
            stop = next;
            passes_without_clip = 0;
            continue;
        }

        ear = next;
        if ear == stop {
            passes_without_clip += 1;
            if passes_without_clip > 2 {
                return Err(TriangulationError::NoEars);
            }
            start = filter_ring_points(start, nodes, tol)
                .ok_or(TriangulationError::DegenerateBoundary)?;
            remaining = ring_len(start, nodes);
            ear = start;
            stop = start;
        }
    }

    Ok(triangles)
}

fn is_ear(prev: usize, ear: usize, next: usize, nodes: &[Node], is_ccw: bool, tol: Tolerance) -> bool {
    let a = nodes[prev].point;
    let b = nodes[ear].point;
    let c = nodes[next].point;

    let cross = orient2d(a, b, c);
    if distance_point_to_line(a, b, c) <= tol.eps {
        return false;
    }

    if is_ccw {
        if cross <= 0.0 {
            return false;
        }
    } else if cross >= 0.0 {
        return false;
    }

    let mut p = nodes[next].next;
    let mut guard = 0usize;
    while p != prev {
        guard += 1;
        if guard > nodes.len().saturating_add(1) {
            break;
        }
        let pt = nodes[p].point;
        if point_in_triangle(a, b, c, pt, is_ccw, tol) {
            let prev_p = nodes[p].prev;
            let next_p = nodes[p].next;
            let cross_p = orient2d(nodes[prev_p].point, pt, nodes[next_p].point);
            let is_reflex = if is_ccw {
                cross_p <= tol.eps
            } else {
                cross_p >= -tol.eps
            };
            if is_reflex {
                return false;
            }
        }
        p = nodes[p].next;
    }

    true
}

fn signed_area_ring(start: usize, nodes: &[Node]) -> f64 {
    let mut area = 0.0;
    let mut p = start;
    loop {
        let q = nodes[p].next;
        let a = nodes[p].point;
        let b = nodes[q].point;
        area += a.x * b.y - b.x * a.y;
        p = q;
        if p == start {
            break;
        }
    }
    0.5 * area
}

fn remove_node(node: usize, nodes: &mut [Node]) {
    let prev = nodes[node].prev;
    let next = nodes[node].next;
    nodes[prev].next = next;
    nodes[next].prev = prev;
}

// ─────────────────────────────────────────────────────────────────────────────
// Predicates
// ─────────────────────────────────────────────────────────────────────────────

fn orient2d(a: Vec2, b: Vec2, c: Vec2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn point_in_triangle(a: Vec2, b: Vec2, c: Vec2, p: Vec2, is_ccw: bool, tol: Tolerance) -> bool {
    let ab = orient2d(a, b, p);
    let bc = orient2d(b, c, p);
    let ca = orient2d(c, a, p);

    if is_ccw {
        ab >= -tol.eps && bc >= -tol.eps && ca >= -tol.eps
    } else {
        ab <= tol.eps && bc <= tol.eps && ca <= tol.eps
    }
}

/// Strict incircle test for a CCW triangle (a, b, c): true when `d` lies
/// inside its circumcircle.
fn in_circumcircle(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> bool {
    let orientation = orient2d(a, b, c);
    if orientation == 0.0 {
        return false;
    }

    let ax = a.x - d.x;
    let ay = a.y - d.y;
    let bx = b.x - d.x;
    let by = b.y - d.y;
    let cx = c.x - d.x;
    let cy = c.y - d.y;

    let det = (ax * ax + ay * ay) * (bx * cy - cx * by)
        - (bx * bx + by * by) * (ax * cy - cx * ay)
        + (cx * cx + cy * cy) * (ax * by - bx * ay);

    if orientation > 0.0 { det > 0.0 } else { det < 0.0 }
}

fn is_visible(
    a: Vec2,
    b: Vec2,
    b_node: usize,
    ring_start: usize,
    nodes: &[Node],
    tol: Tolerance,
) -> bool {
    let mut e = ring_start;
    loop {
        let n = nodes[e].next;
        if e != b_node && n != b_node {
            let c = nodes[e].point;
            let d = nodes[n].point;
            if segments_intersect(a, b, c, d, tol) {
                return false;
            }
        }

        e = n;
        if e == ring_start {
            break;
        }
    }
    true
}

fn segments_intersect(a: Vec2, b: Vec2, c: Vec2, d: Vec2, tol: Tolerance) -> bool {
    let o1 = orient2d(a, b, c);
    let o2 = orient2d(a, b, d);
    let o3 = orient2d(c, d, a);
    let o4 = orient2d(c, d, b);

    if o1.abs() <= tol.eps && on_segment(a, c, b, tol) {
        return true;
    }
    if o2.abs() <= tol.eps && on_segment(a, d, b, tol) {
        return true;
    }
    if o3.abs() <= tol.eps && on_segment(c, a, d, tol) {
        return true;
    }
    if o4.abs() <= tol.eps && on_segment(c, b, d, tol) {
        return true;
    }

    let ab = (o1 > tol.eps && o2 < -tol.eps) || (o1 < -tol.eps && o2 > tol.eps);
    let cd = (o3 > tol.eps && o4 < -tol.eps) || (o3 < -tol.eps && o4 > tol.eps);
    ab && cd
}

fn on_segment(a: Vec2, p: Vec2, b: Vec2, tol: Tolerance) -> bool {
    let min_x = a.x.min(b.x) - tol.eps;
    let max_x = a.x.max(b.x) + tol.eps;
    let min_y = a.y.min(b.y) - tol.eps;
    let max_y = a.y.max(b.y) + tol.eps;
    p.x >= min_x && p.x <= max_x && p.y >= min_y && p.y <= max_y
}

fn distance_point_to_line(a: Vec2, p: Vec2, b: Vec2) -> f64 {
    let ab = b - a;
    let denom2 = ab.length_squared();
    if !denom2.is_finite() || denom2 <= 0.0 {
        return (p - a).length();
    }
    orient2d(a, b, p).abs() / denom2.sqrt()
}

fn distance_point_to_segment(a: Vec2, b: Vec2, p: Vec2) -> f64 {
    let ab = b - a;
    let denom2 = ab.length_squared();
    if denom2 <= 0.0 {
        return (p - a).length();
    }
    let t = ((p - a).dot(ab) / denom2).clamp(0.0, 1.0);
    (p - (a + ab * t)).length()
}

fn sort_edge(a: u32, b: u32) -> (u32, u32) {
    if a < b { (a, b) } else { (b, a) }
}

/// The edge of `tri` matching the sorted pair, in the triangle's own winding.
fn oriented_edge(tri: [u32; 3], edge: (u32, u32)) -> (u32, u32) {
    for k in 0..3 {
        let a = tri[k];
        let b = tri[(k + 1) % 3];
        if sort_edge(a, b) == edge {
            return (a, b);
        }
    }
    edge
}

fn triangle_edge_position(tri: [u32; 3], edge: (u32, u32)) -> Option<usize> {
    (0..3).find(|&k| sort_edge(tri[k], tri[(k + 1) % 3]) == edge)
}

fn opposite_vertex(tri: [u32; 3], edge: (u32, u32)) -> Option<u32> {
    let k = triangle_edge_position(tri, edge)?;
    Some(tri[(k + 2) % 3])
}

fn constraint_edges(loops: &[Vec<u32>]) -> HashSet<(u32, u32)> {
    let mut edges = HashSet::new();
    for ring in loops {
        let len = ring.len();
        if len < 2 {
            continue;
        }
        for i in 0..len {
            edges.insert(sort_edge(ring[i], ring[(i + 1) % len]));
        }
    }
    edges
}

fn signed_loop_area(vertices: &[Vec2], ring: &[u32]) -> f64 {
    let mut area = 0.0;
    let len = ring.len();
    for i in 0..len {
        let a = vertices[ring[i] as usize];
        let b = vertices[ring[(i + 1) % len] as usize];
        area += a.x * b.y - b.x * a.y;
    }
    0.5 * area
}
