// ABOUTME: In-memory analysis cache with LRU eviction and TTL expiry
// ABOUTME: Mutex-guarded store shared safely across threads; expired entries are evicted on lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

use super::{AnalysisKey, CacheConfig, CacheStats};
use crate::logging::AnalysisLogger;
use lru::LruCache;
use petplates_core::errors::AppResult;
use petplates_core::models::{IngredientSelection, MealAnalysis, PetProfile};
use petplates_intelligence::MealAnalyzer;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone)]
struct CacheEntry {
    analysis: Arc<MealAnalysis>,
    expires_at: Instant,
}

impl CacheEntry {
    fn new(analysis: Arc<MealAnalysis>, ttl: Duration) -> Self {
        Self {
            analysis,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

#[derive(Debug)]
struct Inner {
    store: LruCache<AnalysisKey, CacheEntry>,
    stats: CacheStats,
}

/// Bounded, expiring memo of meal analyses
///
/// `LruCache::get` reorders entries, so every lookup takes the lock
/// exclusively. A poisoned lock is recovered: the store holds only
/// immutable snapshots, so a panic elsewhere cannot leave it inconsistent.
#[derive(Debug)]
pub struct AnalysisCache {
    inner: Mutex<Inner>,
    ttl: Duration,
}

impl Default for AnalysisCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

impl AnalysisCache {
    /// Capacity used when the config asks for zero entries
    const FALLBACK_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1000) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Create a cache from configuration
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_entries).unwrap_or(Self::FALLBACK_CAPACITY);
        Self {
            inner: Mutex::new(Inner {
                store: LruCache::new(capacity),
                stats: CacheStats::default(),
            }),
            ttl: config.ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached analysis for a key; expired entries count as misses and are evicted
    #[must_use]
    pub fn get(&self, key: &AnalysisKey) -> Option<Arc<MealAnalysis>> {
        let mut inner = self.lock();
        let found = inner
            .store
            .get(key)
            .map(|entry| (entry.is_expired(), Arc::clone(&entry.analysis)));

        let result = match found {
            Some((false, analysis)) => {
                inner.stats.hits += 1;
                Some(analysis)
            }
            Some((true, _)) => {
                inner.store.pop(key);
                inner.stats.expired += 1;
                inner.stats.misses += 1;
                None
            }
            None => {
                inner.stats.misses += 1;
                None
            }
        };
        drop(inner);

        AnalysisLogger::log_cache_lookup(key.as_str(), result.is_some());
        result
    }

    /// Store an analysis, evicting the least recently used entry when full
    pub fn insert(&self, key: AnalysisKey, analysis: Arc<MealAnalysis>) {
        let entry = CacheEntry::new(analysis, self.ttl);
        let evicted = self.lock().push(key, entry);
        if let Some((old_key, _)) = evicted {
            debug!(cache.key = %old_key, "Evicted analysis cache entry");
        }
    }

    /// Cached analysis for (pet, recipe), running the analyzer on a miss
    ///
    /// # Errors
    ///
    /// Returns an error only if the inputs cannot be hashed into a key
    pub fn get_or_analyze(
        &self,
        analyzer: &MealAnalyzer,
        pet: &PetProfile,
        recipe: &[IngredientSelection],
    ) -> AppResult<Arc<MealAnalysis>> {
        let key = AnalysisKey::new(pet, recipe)?;
        if let Some(hit) = self.get(&key) {
            return Ok(hit);
        }
        let analysis = Arc::new(analyzer.analyze(pet, recipe));
        self.insert(key, Arc::clone(&analysis));
        Ok(analysis)
    }

    /// Drop one entry
    pub fn invalidate(&self, key: &AnalysisKey) -> bool {
        self.lock().store.pop(key).is_some()
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.lock().store.clear();
    }

    /// Number of stored entries, including any not yet found expired
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().store.len()
    }

    /// Whether the cache holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hit, miss, and expiry counters
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.lock().stats
    }
}

impl Inner {
    fn push(&mut self, key: AnalysisKey, entry: CacheEntry) -> Option<(AnalysisKey, CacheEntry)> {
        // LruCache::push returns the old value on key update too; only report real evictions
        match self.store.push(key, entry) {
            Some((old_key, old)) if !self.store.contains(&old_key) => Some((old_key, old)),
            _ => None,
        }
    }
}
