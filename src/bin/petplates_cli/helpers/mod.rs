// ABOUTME: Shared helpers for petplates-cli commands
// ABOUTME: Analyzer construction from optional input files and JSON output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

pub mod output;

use petplates::core::errors::AppResult;
use petplates::intelligence::MealAnalyzer;
use petplates::loader;
use std::path::Path;
use std::sync::Arc;

/// Analyzer over the global config, with optional table and alias overrides
pub fn build_analyzer(compositions: Option<&Path>, aliases: Option<&Path>) -> AppResult<MealAnalyzer> {
    let mut analyzer = MealAnalyzer::new();
    if let Some(path) = compositions {
        analyzer = analyzer.with_compositions(Arc::new(loader::load_compositions(path)?));
    }
    if let Some(path) = aliases {
        analyzer = analyzer.with_aliases(loader::load_aliases(path)?);
    }
    Ok(analyzer)
}
