// ABOUTME: Host-side memoization of meal analyses keyed by a content hash of the inputs
// ABOUTME: Cache configuration, SHA-256 analysis keys, and hit/miss statistics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

//! Analysis cache
//!
//! The engine is a pure function of (pet, recipe), so its results can be
//! memoized by hashing the inputs. The cache lives outside the engine: the
//! analyzer never sees it and behaves identically with or without it.

/// In-memory LRU + TTL store
pub mod memory;

pub use memory::AnalysisCache;

use petplates_core::constants::cache::{
    CACHE_KEY_PREFIX, DEFAULT_CACHE_MAX_ENTRIES, TTL_ANALYSIS_SECS,
};
use petplates_core::errors::{AppError, AppResult};
use petplates_core::models::{IngredientSelection, PetProfile};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::env;
use std::fmt;
use std::time::Duration;

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of cached analyses
    pub max_entries: usize,
    /// Time after which an entry is treated as a miss
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_CACHE_MAX_ENTRIES,
            ttl: Duration::from_secs(TTL_ANALYSIS_SECS),
        }
    }
}

impl CacheConfig {
    /// Defaults overridden by `PETPLATES_CACHE_MAX_ENTRIES` and `PETPLATES_CACHE_TTL_SECS`
    ///
    /// # Errors
    ///
    /// Returns a config error if either variable is set but not a valid integer
    pub fn from_env() -> AppResult<Self> {
        let mut config = Self::default();
        if let Ok(raw) = env::var("PETPLATES_CACHE_MAX_ENTRIES") {
            config.max_entries = raw
                .parse()
                .map_err(|_| AppError::config(format!("Invalid PETPLATES_CACHE_MAX_ENTRIES: {raw}")))?;
        }
        if let Ok(raw) = env::var("PETPLATES_CACHE_TTL_SECS") {
            let secs: u64 = raw
                .parse()
                .map_err(|_| AppError::config(format!("Invalid PETPLATES_CACHE_TTL_SECS: {raw}")))?;
            config.ttl = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

/// Content hash of one (pet, recipe) input
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnalysisKey(String);

#[derive(Serialize)]
struct KeyMaterial<'a> {
    pet: &'a PetProfile,
    recipe: &'a [IngredientSelection],
}

impl AnalysisKey {
    /// Hash the canonical JSON of the inputs
    ///
    /// Object keys are sorted before hashing, so field order in the caller's
    /// data never changes the key.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the inputs cannot be encoded
    pub fn new(pet: &PetProfile, recipe: &[IngredientSelection]) -> AppResult<Self> {
        let canonical = serde_json::to_value(KeyMaterial { pet, recipe })?;
        let bytes = serde_json::to_vec(&canonical)?;
        let digest = Sha256::digest(&bytes);
        Ok(Self(format!("{CACHE_KEY_PREFIX}{}", hex::encode(digest))))
    }

    /// Key as a string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnalysisKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hit and miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Entries dropped because they expired
    pub expired: u64,
}
