//! Explicit registries and the pipeline context.
//!
//! Materials are looked up through a registry object owned by the caller and
//! passed by reference; there is no ambient global state to populate at
//! import time. A [`PatternContext`] bundles the registry with the
//! flattening collaborator and the meshing knobs and travels through the
//! whole pipeline.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::flatten::Flattener;

/// A cloth material as referenced by `material_code` on the descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub code: String,
    /// Areal weight in g/m².
    pub areal_weight: f64,
}

/// An explicit material lookup, constructed once at process start.
#[derive(Debug, Clone, Default)]
pub struct MaterialRegistry {
    materials: HashMap<String, Material>,
}

impl MaterialRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, material: Material) {
        self.materials.insert(material.code.clone(), material);
    }

    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Material> {
        self.materials.get(code)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Cloth weight for `area` square meters of the given material, if the
    /// material is known.
    #[must_use]
    pub fn usage_weight(&self, code: &str, area: f64) -> Option<f64> {
        self.get(code).map(|material| material.areal_weight * area)
    }
}

/// Meshing knobs of the pattern pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshOptions {
    /// Bridge vertices interpolated across each open end of the envelope.
    pub insert_points: usize,
    /// Sample count per hole outline.
    pub hole_resolution: usize,
    /// Common node count both mapping curves are resampled to.
    pub mapping_resolution: usize,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            insert_points: 10,
            hole_resolution: 40,
            mapping_resolution: 100,
        }
    }
}

/// Everything a descriptor needs to be turned into a mesh, passed by
/// reference through the pipeline.
pub struct PatternContext<'a> {
    pub flattener: &'a dyn Flattener,
    pub materials: &'a MaterialRegistry,
    pub options: MeshOptions,
}

impl<'a> PatternContext<'a> {
    #[must_use]
    pub fn new(flattener: &'a dyn Flattener, materials: &'a MaterialRegistry) -> Self {
        Self {
            flattener,
            materials,
            options: MeshOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: MeshOptions) -> Self {
        self.options = options;
        self
    }
}
