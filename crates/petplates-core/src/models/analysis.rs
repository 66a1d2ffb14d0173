// ABOUTME: Meal analysis result models returned by the scoring engine
// ABOUTME: MealAnalysis, ScoreBreakdown, WarningItem, Suggestion, and legacy compatibility fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

use super::ingredient::Severity;
use crate::constants::messages;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A safety or nutrition finding, always reported as data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarningItem {
    /// Stable identifier for the rule that fired (e.g. `deficiency:protein`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Selection key the warning concerns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredient_key: Option<String>,
    /// Human-readable ingredient name used in the message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredient_name: Option<String>,
    /// User-facing message
    pub message: String,
    /// How serious the finding is
    pub severity: Severity,
}

impl WarningItem {
    /// Warning about a specific ingredient
    #[must_use]
    pub fn for_ingredient(
        id: impl Into<String>,
        key: impl Into<String>,
        name: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            id: Some(id.into()),
            ingredient_key: Some(key.into()),
            ingredient_name: Some(name.into()),
            message: message.into(),
            severity,
        }
    }

    /// Recipe-level warning not tied to one ingredient
    #[must_use]
    pub fn for_recipe(id: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: Some(id.into()),
            ingredient_key: None,
            ingredient_name: None,
            message: message.into(),
            severity,
        }
    }
}

/// Confidence attached to a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Generic advice
    Low,
    /// Likely helpful
    Medium,
    /// Directly addresses a detected problem
    High,
}

/// Machine-readable tag for what a suggestion asks the owner to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionAction {
    /// Supplement taurine or add heart/liver
    AddTaurine,
    /// Add calcium carbonate
    AddCalcium,
    /// Add vitamin C rich greens or a supplement
    AddVitaminC,
    /// Feed liver less often
    ReduceLiverFrequency,
    /// Remove or reduce a flagged ingredient
    RemoveToxic,
    /// Swap an allergen for a novel protein
    ReplaceAllergen,
    /// Broaden the ingredient mix
    AddVariety,
}

/// Advisory, rule-based remediation text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// User-facing text
    pub message: String,
    /// What the suggestion asks for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<SuggestionAction>,
    /// How confident the rule is
    pub confidence: Confidence,
}

impl Suggestion {
    /// Create a suggestion with an action tag
    #[must_use]
    pub fn new(message: impl Into<String>, action: SuggestionAction, confidence: Confidence) -> Self {
        Self {
            message: message.into(),
            action: Some(action),
            confidence,
        }
    }
}

/// The three weighted sub-scores behind the final score
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// Nutrient coverage (0-100)
    pub nutrient_coverage_score: f64,
    /// Raw safety penalty points after the 100-point cap (0-100)
    pub toxicity_penalty: f64,
    /// Category balance (0-100)
    pub balance_variety_score: f64,
}

/// Legacy score breakdown kept for older consumers
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyScoreBreakdown {
    /// Weighted base score before penalties
    pub base_score: f64,
    /// Penalty actually subtracted from the base
    pub nutrition_penalty: f64,
    /// Always zero; retained for shape compatibility
    pub balance_penalty: f64,
}

/// Complete result of analyzing one recipe for one pet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealAnalysis {
    /// Nutrient totals for the whole recipe, keyed by unit-suffixed name
    pub nutrients: BTreeMap<String, f64>,
    /// Total recipe mass in grams
    pub total_recipe_grams: f64,
    /// Energy density (kcal per gram)
    pub energy_density_kcal_per_gram: f64,
    /// Recommended grams per meal
    pub recommended_serving_grams: f64,
    /// Final compatibility score (0-100)
    pub score: u8,
    /// Weighted sub-scores
    pub breakdown: ScoreBreakdown,
    /// Species compatibility, max-inclusion, and legacy toxicity findings
    pub toxicity_warnings: Vec<WarningItem>,
    /// Allergy matches
    pub allergy_warnings: Vec<WarningItem>,
    /// Deficiencies and vitamin excesses
    pub nutrient_warnings: Vec<WarningItem>,
    /// Remediation suggestions
    pub suggestions: Vec<Suggestion>,
    /// Selection keys that resolved to no composition data
    pub ingredients_not_found: Vec<String>,

    /// Legacy: nutrients as a percentage of dry matter
    #[serde(rename = "dmNutrients")]
    pub dm_nutrients: BTreeMap<String, f64>,
    /// Legacy: dry matter as a percentage of total mass
    pub dry_matter_percent: f64,
    /// Legacy: total recipe mass in grams
    #[serde(rename = "totalWeight_g")]
    pub total_weight_g: f64,
    /// Legacy: calcium to phosphorus ratio, absent when there is no phosphorus
    #[serde(rename = "caToPratio", skip_serializing_if = "Option::is_none")]
    pub ca_to_p_ratio: Option<f64>,
    /// Legacy: deficiency messages
    pub deficiencies: Vec<String>,
    /// Legacy: excess messages
    pub excesses: Vec<String>,
    /// Legacy: adequacy messages
    pub adequacies: Vec<String>,
    /// Legacy: base score and applied penalty
    pub score_breakdown: LegacyScoreBreakdown,
}

impl MealAnalysis {
    /// Result for a recipe with no valid selections
    #[must_use]
    pub fn empty() -> Self {
        Self {
            deficiencies: vec![messages::NO_INGREDIENTS_SELECTED.to_owned()],
            ..Self::default()
        }
    }

    /// Nutrient total by output key, zero when absent
    #[must_use]
    pub fn nutrient(&self, key: &str) -> f64 {
        self.nutrients.get(key).copied().unwrap_or(0.0)
    }
}
