// ABOUTME: Ingredient lookup command for petplates-cli
// ABOUTME: Shows which fallback step resolved a key and the per-100 g composition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

use petplates::core::errors::AppResult;
use petplates::core::models::IngredientComposition;
use petplates::intelligence::LookupStep;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

use crate::helpers::{build_analyzer, output::print_json};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupReport<'a> {
    key: &'a str,
    step: LookupStep,
    matched_key: Option<&'a str>,
    display_name: String,
    composition: &'a IngredientComposition,
}

/// Resolve a key and print the outcome; an unresolved key is reported, not an error
pub fn run(key: &str, compositions: Option<&Path>) -> AppResult<()> {
    let analyzer = build_analyzer(compositions, None)?;
    let resolved = analyzer.resolver().resolve(key);
    debug!(key, step = ?resolved.step, "Resolved ingredient key");

    let report = LookupReport {
        key,
        step: resolved.step,
        matched_key: resolved.matched_key.as_deref(),
        display_name: analyzer.display_name(key),
        composition: resolved.composition,
    };
    print_json(&report, true)
}
