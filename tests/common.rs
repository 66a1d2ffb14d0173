// ABOUTME: Shared test utilities for integration tests
// ABOUTME: Quiet logging setup plus common pets, recipes, and temp-file fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `petplates`

use petplates::core::models::{IngredientSelection, PetProfile};
use petplates::intelligence::{MealAnalyzer, ScoringConfig};
use std::env;
use std::io::Write;
use std::sync::Once;
use tempfile::NamedTempFile;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Analyzer over the built-in table with default config, unaffected by env overrides
pub fn default_analyzer() -> MealAnalyzer {
    init_test_logging();
    MealAnalyzer::with_config(ScoringConfig::default())
}

/// Shorthand for a selection
pub fn sel(key: &str, grams: f64) -> IngredientSelection {
    IngredientSelection::new(key, grams)
}

/// A 25 kg dog with no allergies
pub fn dog() -> PetProfile {
    PetProfile::new("dog", 25.0)
}

/// A balanced, fully resolvable dog recipe with no safety findings
pub fn balanced_dog_recipe() -> Vec<IngredientSelection> {
    vec![
        sel("chicken_thighs", 200.0),
        sel("brown_rice_cooked", 100.0),
        sel("carrots_raw", 40.0),
        sel("fish_oil", 5.0),
    ]
}

/// Write contents to a temporary file that lives as long as the handle
pub fn temp_json(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}
