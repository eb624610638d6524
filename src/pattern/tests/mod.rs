use crate::geom::{Polyline3, Vec2, Vec3};

use super::rib::RibGeometry;

mod test_envelope_basic;
mod test_flatten_basic;
mod test_holes_basic;
mod test_registry_cache;

/// A straight unit-chord rib lying in a plane of constant `y`: the profile
/// runs along the x axis, heights extend in z.
pub(crate) struct TestRib {
    y: f64,
    profile: Polyline3,
}

impl TestRib {
    const PROFILE_SEGMENTS: usize = 10;

    pub(crate) fn at(y: f64) -> Self {
        let nodes = (0..=Self::PROFILE_SEGMENTS)
            .map(|i| Vec3::new(i as f64 / Self::PROFILE_SEGMENTS as f64, y, 0.0))
            .collect();
        Self {
            y,
            profile: Polyline3::new(nodes).unwrap(),
        }
    }

    /// A rib whose profile bows upward in z, for curved-strip scenarios.
    pub(crate) fn arched(y: f64, arch: f64) -> Self {
        let nodes = (0..=Self::PROFILE_SEGMENTS)
            .map(|i| {
                let x = i as f64 / Self::PROFILE_SEGMENTS as f64;
                Vec3::new(x, y, arch * x * (1.0 - x))
            })
            .collect();
        Self {
            y,
            profile: Polyline3::new(nodes).unwrap(),
        }
    }
}

impl RibGeometry for TestRib {
    fn profile_ik(&self, x: f64) -> f64 {
        x.abs() * Self::PROFILE_SEGMENTS as f64
    }

    fn walk_x(&self, x: f64, distance: f64) -> f64 {
        x + distance
    }

    fn profile_curve(&self) -> &Polyline3 {
        &self.profile
    }

    fn align(&self, point: Vec2) -> Vec3 {
        Vec3::new(point.x, self.y, point.y)
    }
}
