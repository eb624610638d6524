use crate::geom::{MappingError, TriangulationError};

/// Errors raised while turning a rib/strap descriptor into a pattern mesh.
///
/// Every variant is terminal for the rib at hand and carries what a caller
/// needs to report it; none of them should abort a batch over other ribs.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// A surface-mapping failure: unequal curve node counts or a point
    /// outside the mapped domain.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// The triangulator rejected the boundary input.
    #[error("failed to triangulate pattern boundary: {0}")]
    Triangulation(#[from] TriangulationError),

    /// The produced (or producible) mesh contains a polygon below the
    /// minimum size. Non-retryable; fix the rib's width or hole parameters.
    #[error("degenerate geometry in {name}: minimum polygon size {min_size:e}")]
    GeometryDegenerate { name: String, min_size: f64 },

    /// The flattening collaborator failed.
    #[error("flattening failed: {0}")]
    Flatten(String),

    /// Malformed descriptor or curve input.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl PatternError {
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::GeometryDegenerate { .. })
    }
}
