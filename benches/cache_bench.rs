// ABOUTME: Criterion benchmarks for the analysis cache
// ABOUTME: Measures key hashing, cache hits and misses, and memoized versus direct analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

//! Criterion benchmarks for the analysis cache.

#![allow(clippy::missing_docs_in_private_items, missing_docs, clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use petplates::cache::{AnalysisCache, AnalysisKey, CacheConfig};
use petplates::core::models::{IngredientSelection, PetProfile};
use petplates::intelligence::{MealAnalyzer, ScoringConfig};
use std::sync::Arc;
use std::time::Duration;

fn test_cache_config() -> CacheConfig {
    CacheConfig {
        max_entries: 2000,
        ttl: Duration::from_secs(3600),
    }
}

#[allow(clippy::cast_precision_loss)]
fn recipe(variant: usize) -> Vec<IngredientSelection> {
    vec![
        IngredientSelection::new("chicken_thighs", 100.0 + variant as f64),
        IngredientSelection::new("brown_rice_cooked", 60.0),
        IngredientSelection::new("carrots_raw", 25.0),
    ]
}

fn bench_key_hashing(c: &mut Criterion) {
    let pet = PetProfile::new("dog", 25.0).with_allergies(["beef", "wheat"]);
    let selections = recipe(0);
    c.bench_function("cache_key_sha256", |b| {
        b.iter(|| AnalysisKey::new(black_box(&pet), black_box(&selections)).unwrap());
    });
}

fn bench_cache_get(c: &mut Criterion) {
    let analyzer = MealAnalyzer::with_config(ScoringConfig::default());
    let pet = PetProfile::new("dog", 25.0);
    let cache = AnalysisCache::new(&test_cache_config());
    let keys: Vec<AnalysisKey> = (0..1000)
        .map(|i| {
            let selections = recipe(i);
            let key = AnalysisKey::new(&pet, &selections).unwrap();
            cache.insert(key.clone(), Arc::new(analyzer.analyze(&pet, &selections)));
            key
        })
        .collect();
    let missing: Vec<AnalysisKey> = (10_000..11_000)
        .map(|i| AnalysisKey::new(&pet, &recipe(i)).unwrap())
        .collect();

    let mut group = c.benchmark_group("cache_get");
    group.bench_function("memory_hit", |b| {
        let mut index = 0_usize;
        b.iter(|| {
            let key = &keys[index % keys.len()];
            index = index.wrapping_add(1);
            cache.get(black_box(key))
        });
    });
    group.bench_function("memory_miss", |b| {
        let mut index = 0_usize;
        b.iter(|| {
            let key = &missing[index % missing.len()];
            index = index.wrapping_add(1);
            cache.get(black_box(key))
        });
    });
    group.finish();
}

fn bench_memoized_vs_direct(c: &mut Criterion) {
    let analyzer = MealAnalyzer::with_config(ScoringConfig::default());
    let pet = PetProfile::new("cat", 4.0);
    let selections = recipe(7);
    let cache = AnalysisCache::new(&test_cache_config());

    let mut group = c.benchmark_group("analysis_source");
    group.bench_function("direct", |b| {
        b.iter(|| analyzer.analyze(black_box(&pet), black_box(&selections)));
    });
    group.bench_function("memoized", |b| {
        b.iter(|| {
            cache
                .get_or_analyze(&analyzer, black_box(&pet), black_box(&selections))
                .unwrap()
        });
    });
    group.finish();
}

criterion_group!(benches, bench_key_hashing, bench_cache_get, bench_memoized_vs_direct);
criterion_main!(benches);
