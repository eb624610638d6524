mod cache;
mod diagonal;
mod envelope;
mod error;
mod flatten;
mod holes;
mod mesh;
mod registry;
mod rib;

pub use cache::{FlattenCache, FlattenCacheStats, curve_pair_fingerprint};
pub use diagonal::{CellElement, DiagonalRib, DiagonalSide, Width};
pub use envelope::Envelope;
pub use error::PatternError;
pub use flatten::{Flattener, StripFlattener};
pub use holes::{Hole, HoleLayout, compute_holes};
pub use mesh::{MIN_POLYGON_SIZE, PatternMesh};
pub use registry::{Material, MaterialRegistry, MeshOptions, PatternContext};
pub use rib::{CellRibs, RibGeometry};

#[cfg(test)]
mod tests;
