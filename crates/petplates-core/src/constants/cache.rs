// ABOUTME: Cache-related constants for analysis memoization capacity and TTL
// ABOUTME: Used by the host-side analysis cache, never by the pure engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

/// Default maximum cached analyses
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 10_000;

/// Meal analysis TTL (15 minutes) - composition data and config can be redeployed
pub const TTL_ANALYSIS_SECS: u64 = 900;

/// Cache key prefix for namespacing
pub const CACHE_KEY_PREFIX: &str = "petplates:analysis:";
