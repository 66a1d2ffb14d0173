// ABOUTME: Rule-based remediation suggestions keyed off deficiencies and safety findings
// ABOUTME: Taurine, calcium carbonate dosing, vitamin C, liver rotation, allergen swaps, and variety
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

use crate::aggregator::RecipeTotals;
use crate::config::scoring::{EnergyConfig, SuggestionConfig};
use crate::coverage::{self, CoverageReport};
use crate::serving::{effective_weight_kg, meals_per_day};
use petplates_core::constants::{nutrients, units};
use petplates_core::models::{
    Confidence, PetProfile, Species, Suggestion, SuggestionAction, WarningItem,
};

/// Everything the suggestion rules read
pub struct SuggestionInputs<'a> {
    /// Pet being fed
    pub pet: &'a PetProfile,
    /// Normalized species
    pub species: &'a Species,
    /// Whole-batch totals
    pub totals: &'a RecipeTotals,
    /// Recommended grams per meal
    pub serving_grams: f64,
    /// Per-serving coverage
    pub coverage: &'a CoverageReport,
    /// Toxicity and inclusion warnings
    pub toxicity: &'a [WarningItem],
    /// Allergy warnings
    pub allergy: &'a [WarningItem],
}

/// Generate suggestions; always returns at least one
#[must_use]
pub fn generate_suggestions(
    inputs: &SuggestionInputs<'_>,
    config: &SuggestionConfig,
    energy: &EnergyConfig,
) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();
    let totals = inputs.totals;

    match inputs.species {
        Species::Cat => {
            if inputs
                .coverage
                .ratio(coverage::TAURINE)
                .is_some_and(|r| r < 1.0)
            {
                suggestions.push(Suggestion::new(
                    format!(
                        "Taurine is low: add {} g taurine supplement per 100 g serving or include more heart/liver.",
                        config.taurine_supplement_g_per_100g
                    ),
                    SuggestionAction::AddTaurine,
                    Confidence::High,
                ));
            }
        }
        Species::Reptile => {
            if let Some(suggestion) = calcium_carbonate_suggestion(totals, config) {
                suggestions.push(suggestion);
            }
        }
        Species::PocketPet => {
            let target =
                config.pocket_pet_vitamin_c_mg_per_kg_day * effective_weight_kg(inputs.pet, energy);
            if daily_vitamin_c_mg(inputs, energy) < target {
                suggestions.push(Suggestion::new(
                    format!(
                        "Vitamin C seems low for this {}. Aim to include vitamin C rich greens or a supplement (target ~{target:.0} mg/day).",
                        inputs.pet.species.trim()
                    ),
                    SuggestionAction::AddVitaminC,
                    Confidence::Medium,
                ));
            }
        }
        Species::Dog | Species::Bird | Species::Other(_) => {}
    }

    if totals.get(nutrients::VITAMIN_A_IU) > config.vitamin_a_batch_iu {
        suggestions.push(Suggestion::new(
            "Batch contains large amounts of vitamin A (from liver). Rotate liver less frequently to avoid excess vitamin A.",
            SuggestionAction::ReduceLiverFrequency,
            Confidence::High,
        ));
    }

    for warning in inputs.toxicity {
        let name = warning
            .ingredient_name
            .as_deref()
            .or(warning.ingredient_key.as_deref())
            .unwrap_or("this ingredient");
        let confidence = if warning.severity.is_serious() {
            Confidence::High
        } else {
            Confidence::Medium
        };
        suggestions.push(Suggestion::new(
            format!("Consider removing or reducing {name}: {}", warning.message),
            SuggestionAction::RemoveToxic,
            confidence,
        ));
    }

    for warning in inputs.allergy {
        suggestions.push(Suggestion::new(
            format!(
                "Ingredient flagged for allergy: {}. Replace with hypoallergenic alternative (duck, rabbit, or novel protein).",
                warning.message
            ),
            SuggestionAction::ReplaceAllergen,
            Confidence::High,
        ));
    }

    if totals.category_count() <= 1 {
        suggestions.push(Suggestion::new(
            "This batch is dominated by a single category. Add a vegetable or healthy fat for balance.",
            SuggestionAction::AddVariety,
            Confidence::Low,
        ));
    }

    if suggestions.is_empty() {
        suggestions.push(Suggestion::new(
            "Consider adding more ingredient variety for a more balanced meal.",
            SuggestionAction::AddVariety,
            Confidence::Low,
        ));
    }

    suggestions
}

/// Vitamin C delivered per day at the recommended serving
///
/// A recipe without energy has no serving, so the whole batch counts as one.
fn daily_vitamin_c_mg(inputs: &SuggestionInputs<'_>, energy: &EnergyConfig) -> f64 {
    let totals = inputs.totals;
    if totals.total_grams <= 0.0 {
        return 0.0;
    }
    let basis = if inputs.serving_grams > 0.0 {
        inputs.serving_grams
    } else {
        totals.total_grams
    };
    let per_serving = totals.get(nutrients::VITAMIN_C_MG) / totals.total_grams * basis;
    per_serving * f64::from(meals_per_day(inputs.species, energy))
}

/// Calcium carbonate needed to lift the batch Ca:P ratio to the desired level
fn calcium_carbonate_suggestion(
    totals: &RecipeTotals,
    config: &SuggestionConfig,
) -> Option<Suggestion> {
    let ratio = totals.ca_to_p_ratio()?;
    let desired = config.reptile_desired_ca_p_ratio;
    if ratio >= desired {
        return None;
    }

    let phosphorus = totals.get(nutrients::PHOSPHORUS_MG);
    let missing_mg = (desired * phosphorus - totals.get(nutrients::CALCIUM_MG)).max(0.0);
    let grams = (missing_mg / units::CALCIUM_MG_PER_GRAM_CACO3 * 100.0).round() / 100.0;

    Some(Suggestion::new(
        format!(
            "Ca:P low ({ratio:.2}). Add ~{grams} g calcium carbonate per batch to improve ratio."
        ),
        SuggestionAction::AddCalcium,
        Confidence::High,
    ))
}
