// ABOUTME: Property-style checks over many pets and recipes
// ABOUTME: Noise idempotence, score bounds, mass accounting, allergy monotonicity, and scale invariance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

mod common;

use common::{balanced_dog_recipe, default_analyzer, sel};
use petplates::core::models::{IngredientSelection, PetProfile};

fn pets() -> Vec<PetProfile> {
    vec![
        PetProfile::new("dog", 25.0),
        PetProfile::new("Cats", 4.0).with_allergies(["fish"]),
        PetProfile::new("bearded dragon", 0.4),
        PetProfile::new("guinea pig", 1.0),
        PetProfile::new("budgie", 0.04),
        PetProfile::new("axolotl", 0.1),
    ]
}

fn recipes() -> Vec<Vec<IngredientSelection>> {
    vec![
        Vec::new(),
        vec![sel("chicken_breast", 100.0)],
        balanced_dog_recipe(),
        vec![sel("beef_liver", 300.0), sel("onion_raw", 50.0), sel("grapes_raw", 40.0)],
        vec![sel("kale_raw", 40.0), sel("carrots_raw", 30.0), sel("mystery", 10.0)],
        vec![sel("Salmon Oil", 5.0), sel("Sweet Potato", 60.0), sel("sardines_water", 90.0)],
    ]
}

#[test]
fn test_noise_entries_do_not_change_analysis() {
    let analyzer = default_analyzer();
    let noise = [sel("", 50.0), sel("   ", 10.0), sel("chicken_breast", 0.0), sel("kale_raw", -20.0)];

    for pet in pets() {
        for recipe in recipes() {
            let mut noisy = recipe.clone();
            noisy.extend(noise.iter().cloned());
            assert_eq!(
                analyzer.analyze(&pet, &recipe),
                analyzer.analyze(&pet, &noisy),
                "noise changed analysis for {} / {recipe:?}",
                pet.species
            );
        }
    }
}

#[test]
fn test_score_is_within_bounds() {
    let analyzer = default_analyzer();
    for pet in pets() {
        for recipe in recipes() {
            let analysis = analyzer.analyze(&pet, &recipe);
            assert!(analysis.score <= 100);
            assert!(analysis.breakdown.toxicity_penalty <= 100.0);
        }
    }
}

#[test]
fn test_total_mass_is_sum_of_valid_grams() {
    let analyzer = default_analyzer();
    let recipe = vec![
        sel("chicken_breast", 120.5),
        sel("not_in_table", 30.0),
        sel("", 99.0),
        sel("kale_raw", 0.0),
        sel("oats", 12.25),
    ];
    let analysis = analyzer.analyze(&PetProfile::new("dog", 10.0), &recipe);
    assert!((analysis.total_recipe_grams - 162.75).abs() < 1e-9);
    assert!((analysis.total_weight_g - analysis.total_recipe_grams).abs() < f64::EPSILON);
}

#[test]
fn test_unknown_key_contributes_nothing() {
    let analyzer = default_analyzer();
    let pet = PetProfile::new("dog", 25.0);
    let known = analyzer.analyze(&pet, &[sel("chicken_breast", 100.0)]);
    let with_unknown = analyzer.analyze(
        &pet,
        &[sel("chicken_breast", 100.0), sel("nonexistent_ingredient", 100.0)],
    );

    assert_eq!(with_unknown.ingredients_not_found, vec!["nonexistent_ingredient"]);
    for (key, value) in &known.nutrients {
        assert!((with_unknown.nutrient(key) - value).abs() < 1e-9, "{key} changed");
    }
}

#[test]
fn test_appending_allergen_never_raises_score() {
    let analyzer = default_analyzer();
    let cases = [
        ("dog", 25.0, "beef", "ground_beef_lean"),
        ("dog", 25.0, "egg", "eggs_whole"),
        ("cat", 4.0, "salmon", "salmon_atlantic"),
        ("rabbit", 2.0, "banana", "bananas_raw"),
    ];

    for (species, weight, allergy, allergen) in cases {
        let pet = PetProfile::new(species, weight).with_allergies([allergy]);
        let base = balanced_dog_recipe();
        let mut with_allergen = base.clone();
        with_allergen.push(sel(allergen, 60.0));

        let before = analyzer.analyze(&pet, &base);
        let after = analyzer.analyze(&pet, &with_allergen);
        assert!(!after.allergy_warnings.is_empty(), "{allergen} not flagged");
        assert!(
            after.score <= before.score,
            "{allergen}: {} -> {}",
            before.score,
            after.score
        );
    }
}

#[test]
fn test_allergen_cannot_lift_a_weak_recipe() {
    let analyzer = default_analyzer();
    let pet = PetProfile::new("dog", 25.0).with_allergies(["chicken"]);
    let cases = [
        (vec![sel("nonexistent_ingredient", 100.0)], sel("chicken_breast", 100.0)),
        (vec![sel("onion_raw", 50.0)], sel("chicken_thighs", 100.0)),
        (
            vec![sel("onion_raw", 50.0), sel("chicken_hearts", 30.0)],
            sel("chicken_breast", 100.0),
        ),
    ];

    for (base, allergen) in cases {
        let mut with_allergen = base.clone();
        with_allergen.push(allergen.clone());

        let before = analyzer.analyze(&pet, &base);
        let after = analyzer.analyze(&pet, &with_allergen);
        assert!(
            after
                .allergy_warnings
                .iter()
                .any(|w| w.ingredient_key.as_deref() == Some(allergen.key.as_str())),
            "{} not flagged",
            allergen.key
        );
        assert!(
            after.score <= before.score,
            "{base:?} + {}: {} -> {}",
            allergen.key,
            before.score,
            after.score
        );
    }
}

#[test]
fn test_allergen_only_recipe_keeps_its_own_score() {
    let analyzer = default_analyzer();
    let pet = PetProfile::new("dog", 25.0).with_allergies(["chicken"]);
    let analysis = analyzer.analyze(&pet, &[sel("chicken_breast", 100.0)]);

    assert!(!analysis.allergy_warnings.is_empty());
    assert!(analysis.score > 0);
}

#[test]
fn test_scaling_grams_keeps_density_based_results() {
    let analyzer = default_analyzer();
    for pet in pets() {
        let base = balanced_dog_recipe();
        let original = analyzer.analyze(&pet, &base);

        for factor in [2.0, 4.0] {
            let scaled: Vec<IngredientSelection> = base
                .iter()
                .map(|s| sel(&s.key, s.grams * factor))
                .collect();
            let analysis = analyzer.analyze(&pet, &scaled);

            assert!(analysis.total_recipe_grams >= original.total_recipe_grams);
            assert!(
                (analysis.breakdown.nutrient_coverage_score
                    - original.breakdown.nutrient_coverage_score)
                    .abs()
                    < 1e-9
            );
            assert!(
                (analysis.energy_density_kcal_per_gram - original.energy_density_kcal_per_gram)
                    .abs()
                    < 1e-9
            );
            assert_eq!(analysis.nutrient_warnings, original.nutrient_warnings);
            assert_eq!(analysis.score, original.score);
        }
    }
}
