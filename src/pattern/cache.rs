//! Flatten-result memoization.
//!
//! Flattening the same strip is the one sub-result worth reusing between
//! `get_mesh` calls. The cache is explicit: owned by the caller, keyed by a
//! content fingerprint of the input curves and cleared by the caller when
//! the owning geometry changes. Nothing here is global or implicit.

use std::collections::HashMap;

use crate::geom::{Polyline2, Polyline3};

/// FNV-1a over the coordinate bit patterns of a 3D curve pair. Two pairs
/// share a fingerprint exactly when they are bitwise identical.
#[must_use]
pub fn curve_pair_fingerprint(left: &Polyline3, right: &Polyline3) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = OFFSET;
    let mut feed = |value: f64| {
        for byte in value.to_bits().to_le_bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(PRIME);
        }
    };

    for curve in [left, right] {
        feed(curve.node_count() as f64);
        for node in curve.nodes() {
            feed(node.x);
            feed(node.y);
            feed(node.z);
        }
    }
    hash
}

/// Memoized flatten results with hit/miss statistics.
#[derive(Debug, Default)]
pub struct FlattenCache {
    entries: HashMap<u64, (Polyline2, Polyline2)>,
    hits: usize,
    misses: usize,
}

/// Cache statistics for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlattenCacheStats {
    pub entries: usize,
    pub hits: usize,
    pub misses: usize,
}

impl FlattenCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the flatten result for `fingerprint`, computing and storing
    /// it on a miss.
    pub fn get_or_insert_with<E>(
        &mut self,
        fingerprint: u64,
        compute: impl FnOnce() -> Result<(Polyline2, Polyline2), E>,
    ) -> Result<(Polyline2, Polyline2), E> {
        if let Some(cached) = self.entries.get(&fingerprint) {
            self.hits += 1;
            return Ok(cached.clone());
        }
        self.misses += 1;
        let computed = compute()?;
        self.entries.insert(fingerprint, computed.clone());
        Ok(computed)
    }

    /// Drop every entry. Call when the owning geometry changes.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn stats(&self) -> FlattenCacheStats {
        FlattenCacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}
