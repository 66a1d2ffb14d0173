// ABOUTME: Meal analysis engine scoring pet recipes for nutrition, safety, and balance
// ABOUTME: Composition lookup, aggregation, safety, coverage, serving, scoring, and suggestions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

#![deny(unsafe_code)]

//! # `PetPlates` Intelligence
//!
//! A deterministic, synchronous pipeline: given a [`PetProfile`] and a list of
//! [`IngredientSelection`]s it returns a complete [`MealAnalysis`]. Nothing in
//! the engine performs I/O or mutates shared state, and nothing fails: unknown
//! ingredients degrade to a zero-valued placeholder, malformed selections are
//! dropped, and safety findings are reported as data.
//!
//! ## Modules
//!
//! - **composition**: Composition table, lookup fallback chain, aliases, display names
//! - **aggregator**: Per-recipe nutrient totals
//! - **safety**: Species compatibility, max inclusion, legacy toxicity, allergies
//! - **serving**: Daily energy targets and recommended serving size
//! - **coverage**: Per-serving nutrient coverage and deficiency/excess warnings
//! - **scoring**: Weighted score composition with capped penalties
//! - **suggestions**: Rule-based remediation text
//! - **analyzer**: The [`MealAnalyzer`] entry point and batch analysis
//! - **config**: Every tunable behind the algorithms
//!
//! [`PetProfile`]: petplates_core::models::PetProfile
//! [`IngredientSelection`]: petplates_core::models::IngredientSelection
//! [`MealAnalysis`]: petplates_core::models::MealAnalysis

/// Nutrient aggregation
pub mod aggregator;
/// Public entry point
pub mod analyzer;
/// Composition lookup
pub mod composition;
/// Scoring configuration
pub mod config;
/// Coverage scoring
pub mod coverage;
/// Safety checks
pub mod safety;
/// Score composition
pub mod scoring;
/// Serving size and energy targets
pub mod serving;
/// Remediation suggestions
pub mod suggestions;

pub use aggregator::RecipeTotals;
pub use analyzer::{generate_analysis, AnalysisRequest, MealAnalyzer};
pub use composition::{
    AliasMap, CompositionSource, CompositionTable, DisplayNameResolver, IngredientResolver,
    LookupStep, MappedDisplayNames, Resolved, TitleCaseDisplayNames,
};
pub use config::{ConfigError, ScoringConfig};
