use crate::geom::{Polyline3, Vec3};
use crate::pattern::{FlattenCache, Material, MaterialRegistry, curve_pair_fingerprint};

fn curve(z: f64) -> Polyline3 {
    Polyline3::new(vec![Vec3::new(0.0, 0.0, z), Vec3::new(1.0, 0.0, z)]).unwrap()
}

#[test]
fn registry_resolves_materials_and_usage() {
    let mut registry = MaterialRegistry::new();
    registry.register(Material {
        code: "sk38".to_string(),
        areal_weight: 38.0,
    });
    registry.register(Material {
        code: "hard".to_string(),
        areal_weight: 170.0,
    });

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.get("sk38").unwrap().areal_weight, 38.0);
    assert!(registry.get("unknown").is_none());

    let weight = registry.usage_weight("sk38", 2.0).unwrap();
    assert!((weight - 76.0).abs() < 1e-12);
    assert!(registry.usage_weight("unknown", 2.0).is_none());
}

#[test]
fn fingerprints_distinguish_different_curve_pairs() {
    let a = curve(0.0);
    let b = curve(1.0);

    assert_eq!(curve_pair_fingerprint(&a, &b), curve_pair_fingerprint(&a, &b));
    assert_ne!(curve_pair_fingerprint(&a, &b), curve_pair_fingerprint(&b, &a));
    assert_ne!(
        curve_pair_fingerprint(&a, &b),
        curve_pair_fingerprint(&a, &curve(2.0))
    );
}

#[test]
fn cache_hits_after_first_compute_and_clears_explicitly() {
    let mut cache = FlattenCache::new();
    let left = curve(0.0);
    let right = curve(1.0);
    let key = curve_pair_fingerprint(&left, &right);

    let mut computed = 0usize;
    for _ in 0..3 {
        let result: Result<_, String> = cache.get_or_insert_with(key, || {
            computed += 1;
            Ok((
                crate::geom::Polyline2::new(vec![
                    crate::geom::Vec2::new(0.0, 0.0),
                    crate::geom::Vec2::new(1.0, 0.0),
                ])
                .unwrap(),
                crate::geom::Polyline2::new(vec![
                    crate::geom::Vec2::new(0.0, 1.0),
                    crate::geom::Vec2::new(1.0, 1.0),
                ])
                .unwrap(),
            ))
        });
        assert!(result.is_ok());
    }

    assert_eq!(computed, 1);
    let stats = cache.stats();
    assert_eq!(stats.entries, 1);
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.misses, 1);

    cache.clear();
    assert_eq!(cache.stats().entries, 0);
}

#[test]
fn failed_computations_are_not_cached() {
    let mut cache = FlattenCache::new();
    let err: Result<_, String> = cache.get_or_insert_with(42, || Err("boom".to_string()));
    assert!(err.is_err());
    assert_eq!(cache.stats().entries, 0);
    assert_eq!(cache.stats().misses, 1);
}
