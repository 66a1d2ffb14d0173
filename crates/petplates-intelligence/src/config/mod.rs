// ABOUTME: Configuration root for the meal analysis engine
// ABOUTME: Re-exports the scoring configuration and its error type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

/// Scoring engine tunables
pub mod scoring;

pub use scoring::{ConfigError, ScoringConfig};
