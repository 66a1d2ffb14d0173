// ABOUTME: Integration tests for loading pets, recipes, tables, and aliases from JSON files
// ABOUTME: Covers custom composition tables, alias layering, lookup steps, and batch requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

mod common;

use anyhow::Result;
use common::{default_analyzer, temp_json};
use petplates::core::errors::ErrorCode;
use petplates::core::models::{IngredientSelection, PetProfile};
use petplates::intelligence::LookupStep;
use petplates::loader;
use std::sync::Arc;

const DUCK_TABLE: &str = r#"{
    "duck": {
        "name": "Roast Duck",
        "protein": 19.0,
        "fat": 28.0,
        "calcium": 11,
        "phosphorus": 156,
        "kcal": 337,
        "speciesCompatibility": {"reptile": "avoid"}
    },
    "pumpkin": {"name": "Pumpkin", "protein": 1.0, "fiber": 0.5, "kcal": 26, "calcium": 21, "phosphorus": 44}
}"#;

#[test]
fn test_pet_and_recipe_files_analyze() -> Result<()> {
    let pet = temp_json(r#"{"species": "dog", "weightKg": 12, "allergies": ["beef"], "activity": "high"}"#);
    let recipe = temp_json(
        r#"{"selections": [{"key": "chicken_breast", "grams": 150}, {"key": "sweet_potato", "grams": 50}]}"#,
    );

    let pet = loader::load_pet(pet.path())?;
    let recipe = loader::load_recipe(recipe.path())?;
    let analysis = default_analyzer().analyze(&pet, &recipe);

    assert!((analysis.total_recipe_grams - 200.0).abs() < f64::EPSILON);
    assert!(analysis.ingredients_not_found.is_empty());
    assert!(analysis.allergy_warnings.is_empty());
    Ok(())
}

#[test]
fn test_custom_table_replaces_builtin() -> Result<()> {
    let table = temp_json(DUCK_TABLE);
    let table = loader::load_compositions(table.path())?;
    let analyzer = default_analyzer().with_compositions(Arc::new(table));

    let pet = PetProfile::new("bearded dragon", 0.4);
    let analysis = analyzer.analyze(
        &pet,
        &[
            IngredientSelection::new("duck", 80.0),
            IngredientSelection::new("chicken_breast", 20.0),
        ],
    );

    assert_eq!(analysis.ingredients_not_found, vec!["chicken_breast"]);
    assert!(analysis
        .toxicity_warnings
        .iter()
        .any(|w| w.ingredient_key.as_deref() == Some("duck")));
    Ok(())
}

#[test]
fn test_lookup_steps_over_custom_table_and_aliases() -> Result<()> {
    let table = temp_json(DUCK_TABLE);
    let aliases = temp_json(r#"{"duck_neck": "duck", "squash": "pumpkin"}"#);
    let analyzer = default_analyzer()
        .with_compositions(Arc::new(loader::load_compositions(table.path())?))
        .with_aliases(loader::load_aliases(aliases.path())?);
    let resolver = analyzer.resolver();

    assert_eq!(resolver.resolve("duck").step, LookupStep::Exact);
    assert_eq!(resolver.resolve("Pumpkin").step, LookupStep::Slug);
    let by_name = resolver.resolve("roast duck");
    assert_eq!(by_name.step, LookupStep::Name);
    assert_eq!(by_name.matched_key.as_deref(), Some("duck"));
    let alias = resolver.resolve("Duck Neck");
    assert_eq!(alias.step, LookupStep::Alias);
    assert_eq!(alias.matched_key.as_deref(), Some("duck"));
    assert!(resolver.resolve("salmon_oil").is_not_found());
    Ok(())
}

#[test]
fn test_malformed_inputs_are_rejected_at_the_boundary() {
    let bad_json = temp_json("{ not json");
    let err = loader::load_recipe(bad_json.path()).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidFormat);

    let bad_inclusion = temp_json(r#"{"kibble": {"protein": 20, "maxInclusionPercentBySpecies": {"dog": 1.5}}}"#);
    let err = loader::load_compositions(bad_inclusion.path()).unwrap_err();
    assert!(err.message.contains("kibble"));

    let bad_aliases = temp_json(r#"{"duck_neck": 42}"#);
    assert!(loader::load_aliases(bad_aliases.path()).is_err());
}

#[test]
fn test_batch_requests_file() -> Result<()> {
    let requests = temp_json(
        r#"[
            {"pet": {"species": "cat", "weightKg": 4}, "selections": [{"key": "chicken_thighs", "grams": 100}]},
            {"pet": {"species": "dog", "weightKg": 25}, "selections": []},
            {"pet": {"species": "rabbit", "weightKg": 2}, "selections": [{"key": "kale_raw", "grams": 80}]}
        ]"#,
    );
    let requests = loader::load_requests(requests.path())?;
    let analyses = default_analyzer().analyze_batch(&requests);

    assert_eq!(analyses.len(), 3);
    assert_eq!(analyses[1].score, 0);
    assert!(analyses[0].score > 0 && analyses[2].score > 0);
    Ok(())
}
