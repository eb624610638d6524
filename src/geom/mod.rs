mod core;
mod mapping;
mod polyline;
mod spline;
mod triangulation;

pub use self::core::{Tolerance, Vec2, Vec3};
pub use mapping::{MappingError, QuadPatch, SurfaceMapping2, SurfaceMapping3};
pub use polyline::{Polyline2, Polyline3};
pub use spline::BSplineCurve2;
pub use triangulation::{TriangleMesh, Triangulation, TriangulationError};

#[cfg(test)]
mod tests;
