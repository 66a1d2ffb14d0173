// ABOUTME: Recipe analysis commands for petplates-cli
// ABOUTME: Single analysis from pet/recipe files and parallel batch analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

use petplates::core::errors::AppResult;
use petplates::intelligence::MealAnalyzer;
use petplates::loader;
use petplates::logging::AnalysisLogger;
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::helpers::{build_analyzer, output::print_json};

/// Analyze one recipe and print the result
pub fn run(
    pet_path: &Path,
    recipe_path: &Path,
    compositions: Option<&Path>,
    aliases: Option<&Path>,
    pretty: bool,
) -> AppResult<()> {
    let pet = loader::load_pet(pet_path)?;
    let recipe = loader::load_recipe(recipe_path)?;
    let analyzer = build_analyzer(compositions, aliases)?;

    let started = Instant::now();
    let analysis = analyzer.analyze(&pet, &recipe);
    AnalysisLogger::log_analysis(&pet.species, recipe.len(), &analysis, started.elapsed());

    print_json(&analysis, pretty)
}

/// Analyze every request in a file and print the results in input order
pub fn batch(input: &Path, pretty: bool) -> AppResult<()> {
    let requests = loader::load_requests(input)?;
    let analyzer = MealAnalyzer::new();

    let started = Instant::now();
    let analyses = analyzer.analyze_batch(&requests);
    info!(
        batch.requests = requests.len(),
        batch.duration_ms = started.elapsed().as_secs_f64() * 1000.0,
        "Batch analyzed"
    );

    print_json(&analyses, pretty)
}
