#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Surface flattening and pattern-mesh generation for paraglider canopies.
//!
//! A canopy is sewn from flat cloth, but designed as a doubly-curved 3D
//! surface. This crate covers the step in between for the internal
//! reinforcement patches (diagonal ribs, tension straps): mapping a ruled 3D
//! strip onto a flat patch, cutting ventilation holes into it, triangulating
//! the result under exact boundary constraints and re-embedding every
//! triangulated point back onto the original 3D surface.
//!
//! The crate is split into two layers:
//! - [`geom`]: domain-independent primitives, namely vectors, ik-addressed
//!   polylines, B-splines, the bilinear quad-patch surface mapping and the
//!   constrained triangulator.
//! - [`pattern`]: the pattern pipeline, from side descriptors through
//!   envelope and hole construction to mesh assembly and validation.
//!
//! Everything is synchronous and purely CPU-bound. A [`pattern::PatternMesh`]
//! is a pure function of its inputs; independent ribs can be meshed on
//! separate threads without coordination, and a degenerate rib fails with a
//! typed error instead of poisoning the batch.

pub mod geom;
pub mod pattern;

pub use geom::{
    BSplineCurve2, MappingError, Polyline2, Polyline3, QuadPatch, SurfaceMapping2,
    SurfaceMapping3, Tolerance, TriangleMesh, Triangulation, TriangulationError, Vec2, Vec3,
};
pub use pattern::{
    CellElement, CellRibs, DiagonalRib, DiagonalSide, Envelope, FlattenCache, Flattener, Hole,
    HoleLayout, Material, MaterialRegistry, MeshOptions, PatternContext, PatternError,
    PatternMesh, RibGeometry, StripFlattener, Width,
};
