//! Index+fraction addressed polylines.
//!
//! Positions on a polyline are expressed as an `ik` value: the integer part
//! selects a segment start node, the fractional part is the position within
//! that segment. Values outside `[0, node_count - 1]` extrapolate linearly
//! along the first/last segment, which is what arclength walks near the curve
//! ends rely on.

use super::core::{Vec2, Vec3};

/// An ordered sequence of 2D nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline2 {
    nodes: Vec<Vec2>,
    cumulative_lengths: Vec<f64>,
}

/// An ordered sequence of 3D nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline3 {
    nodes: Vec<Vec3>,
    cumulative_lengths: Vec<f64>,
}

macro_rules! polyline_impl {
    ($name:ident, $vec:ident) => {
        impl $name {
            pub fn new(nodes: Vec<$vec>) -> Result<Self, String> {
                if nodes.len() < 2 {
                    return Err("polyline requires at least 2 nodes".to_string());
                }
                if nodes.iter().any(|p| !p.is_finite()) {
                    return Err("polyline nodes must be finite".to_string());
                }
                Ok(Self::from_nodes(nodes))
            }

            fn from_nodes(nodes: Vec<$vec>) -> Self {
                let mut cumulative_lengths = Vec::with_capacity(nodes.len());
                cumulative_lengths.push(0.0);
                let mut total = 0.0;
                for window in nodes.windows(2) {
                    total += (window[1] - window[0]).length();
                    cumulative_lengths.push(total);
                }
                Self {
                    nodes,
                    cumulative_lengths,
                }
            }

            #[must_use]
            pub fn nodes(&self) -> &[$vec] {
                &self.nodes
            }

            #[must_use]
            pub fn node_count(&self) -> usize {
                self.nodes.len()
            }

            #[must_use]
            pub fn segment_count(&self) -> usize {
                self.nodes.len() - 1
            }

            /// Total arclength of the polyline.
            #[must_use]
            pub fn length(&self) -> f64 {
                *self.cumulative_lengths.last().unwrap_or(&0.0)
            }

            fn segment_length(&self, i: usize) -> f64 {
                self.cumulative_lengths[i + 1] - self.cumulative_lengths[i]
            }

            /// Point at the parametric position `ik`. Extrapolates linearly
            /// along the end segments for out-of-range values.
            #[must_use]
            pub fn get(&self, ik: f64) -> $vec {
                let last = self.segment_count() as f64;
                if ik <= 0.0 {
                    let dir = self.nodes[1] - self.nodes[0];
                    return self.nodes[0] + dir * ik;
                }
                if ik >= last {
                    let n = self.nodes.len();
                    let dir = self.nodes[n - 1] - self.nodes[n - 2];
                    return self.nodes[n - 1] + dir * (ik - last);
                }
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let i = ik as usize;
                let frac = ik - i as f64;
                self.nodes[i].lerp(self.nodes[i + 1], frac)
            }

            /// Arclength position of the parametric position `ik`.
            #[must_use]
            pub fn arclength_at(&self, ik: f64) -> f64 {
                let last = self.segment_count() as f64;
                if ik <= 0.0 {
                    return ik * self.segment_length(0);
                }
                if ik >= last {
                    return self.length() + (ik - last) * self.segment_length(self.segment_count() - 1);
                }
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let i = ik as usize;
                let frac = ik - i as f64;
                self.cumulative_lengths[i] + frac * self.segment_length(i)
            }

            /// Parametric position at the arclength `s` measured from node 0.
            #[must_use]
            pub fn ik_at_arclength(&self, s: f64) -> f64 {
                if s <= 0.0 {
                    let seg = self.segment_length(0);
                    return if seg > 0.0 { s / seg } else { 0.0 };
                }
                let total = self.length();
                if s >= total {
                    let seg = self.segment_length(self.segment_count() - 1);
                    let last = self.segment_count() as f64;
                    return if seg > 0.0 { last + (s - total) / seg } else { last };
                }
                let i = match self
                    .cumulative_lengths
                    .binary_search_by(|value| value.total_cmp(&s))
                {
                    Ok(i) => i.min(self.segment_count() - 1),
                    Err(i) => i.max(1) - 1,
                };
                let seg = self.segment_length(i);
                if seg <= 0.0 {
                    return i as f64;
                }
                i as f64 + (s - self.cumulative_lengths[i]) / seg
            }

            /// Walk a signed arclength `distance` starting at `start_ik` and
            /// return the parametric position reached.
            #[must_use]
            pub fn walk(&self, start_ik: f64, distance: f64) -> f64 {
                self.ik_at_arclength(self.arclength_at(start_ik) + distance)
            }

            /// Extract the sub-curve between two parametric positions. The
            /// result runs from `start_ik` towards `end_ik`; a descending
            /// range yields the reversed sub-curve.
            #[must_use]
            pub fn sub_curve(&self, start_ik: f64, end_ik: f64) -> Self {
                if start_ik > end_ik {
                    let mut sub = self.sub_curve(end_ik, start_ik);
                    sub.nodes.reverse();
                    return Self::from_nodes(sub.nodes);
                }

                let eps = 1e-9;
                let mut nodes = Vec::new();
                nodes.push(self.get(start_ik));

                let first_inner = (start_ik + 1.0 - eps).floor().max(0.0);
                let last_inner = (end_ik).min(self.segment_count() as f64);
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let mut i = first_inner.max(0.0) as usize;
                while (i as f64) <= last_inner - eps {
                    if (i as f64) > start_ik + eps {
                        nodes.push(self.nodes[i.min(self.nodes.len() - 1)]);
                    }
                    i += 1;
                }

                let end_point = self.get(end_ik);
                if nodes
                    .last()
                    .is_none_or(|p| (*p - end_point).length() > eps)
                {
                    nodes.push(end_point);
                }
                if nodes.len() < 2 {
                    nodes.push(end_point);
                }
                Self::from_nodes(nodes)
            }

            /// Resample to `count` nodes spaced uniformly in arclength.
            #[must_use]
            pub fn resample(&self, count: usize) -> Self {
                let count = count.max(2);
                let total = self.length();
                if total <= 0.0 {
                    return Self::from_nodes(vec![self.nodes[0]; count]);
                }
                let mut nodes = Vec::with_capacity(count);
                nodes.push(self.nodes[0]);
                for step in 1..count - 1 {
                    let s = (step as f64 / (count as f64 - 1.0)) * total;
                    nodes.push(self.get(self.ik_at_arclength(s)));
                }
                nodes.push(*self.nodes.last().unwrap());
                Self::from_nodes(nodes)
            }

            /// The polyline with node order reversed.
            #[must_use]
            pub fn reverse(&self) -> Self {
                let mut nodes = self.nodes.clone();
                nodes.reverse();
                Self::from_nodes(nodes)
            }
        }
    };
}

polyline_impl!(Polyline2, Vec2);
polyline_impl!(Polyline3, Vec3);

impl Polyline2 {
    /// Offset every node perpendicular to the local curve direction by
    /// `amount` (positive offsets to the right of the walking direction).
    /// Uses miter joins; segments of zero length inherit their neighbour's
    /// direction.
    #[must_use]
    pub fn offset(&self, amount: f64) -> Self {
        let n = self.nodes.len();
        let mut directions = Vec::with_capacity(n - 1);
        let mut last_dir = Vec2::new(1.0, 0.0);
        for window in self.nodes.windows(2) {
            let dir = (window[1] - window[0]).normalized().unwrap_or(last_dir);
            directions.push(dir);
            last_dir = dir;
        }

        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            let dir = if i == 0 {
                directions[0]
            } else if i == n - 1 {
                directions[n - 2]
            } else {
                (directions[i - 1] + directions[i])
                    .normalized()
                    .unwrap_or(directions[i])
            };
            nodes.push(self.nodes[i] + dir.perp_cw() * amount);
        }
        Self::from_nodes(nodes)
    }
}

impl Polyline3 {
    /// Node-wise linear blend between two polylines of equal node count.
    #[must_use]
    pub fn blend(&self, other: &Self, t: f64) -> Option<Self> {
        if self.node_count() != other.node_count() {
            return None;
        }
        let nodes = self
            .nodes
            .iter()
            .zip(other.nodes.iter())
            .map(|(a, b)| a.lerp(*b, t))
            .collect();
        Some(Self::from_nodes(nodes))
    }
}
