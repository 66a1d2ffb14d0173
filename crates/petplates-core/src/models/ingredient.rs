// ABOUTME: Ingredient selection and per-100g composition models with boundary validation
// ABOUTME: IngredientSelection, IngredientComposition, CompatibilityLevel, and Severity definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

use crate::errors::CompositionError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One ingredient in a recipe: a lookup key and an amount in grams
///
/// Selections with an empty key or non-positive grams are dropped before
/// analysis and never affect any output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientSelection {
    /// Composition key (`chicken_breast`) or free-text display name ("Chicken Breast")
    #[serde(default)]
    pub key: String,
    /// Amount in grams
    #[serde(default)]
    pub grams: f64,
}

impl IngredientSelection {
    /// Create a new selection
    #[must_use]
    pub fn new(key: impl Into<String>, grams: f64) -> Self {
        Self {
            key: key.into(),
            grams,
        }
    }

    /// Whether this selection participates in analysis
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.key.trim().is_empty() && self.grams.is_finite() && self.grams > 0.0
    }
}

/// How suitable an ingredient is for a species
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompatibilityLevel {
    /// Fine to feed
    #[default]
    Ok,
    /// Feed with care
    Caution,
    /// Keep to small amounts
    Limit,
    /// Do not feed
    Avoid,
}

/// Warning severity, ordered from least to most serious
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational
    Low,
    /// Worth addressing
    Medium,
    /// Should be addressed
    High,
    /// Must be addressed
    Critical,
}

impl Severity {
    /// Critical or high
    #[must_use]
    pub const fn is_serious(&self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

/// Per-100 g nutrient composition of one ingredient
///
/// Field names follow the web app's data files (camelCase). Units:
/// macronutrients, moisture, fiber and omega-3 in g; minerals, vitamin C and
/// taurine in mg; vitamins A and D in IU; energy in kcal. Numeric fields the
/// engine does not know about are kept in `extra` and pass through
/// aggregation unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientComposition {
    /// Human-readable name, used for name-based lookup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Protein (g)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    /// Fat (g)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    /// Calcium (mg)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calcium: Option<f64>,
    /// Phosphorus (mg)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phosphorus: Option<f64>,
    /// Moisture (g)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moisture: Option<f64>,
    /// Energy (kcal)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kcal: Option<f64>,
    /// Fiber (g)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
    /// Carbohydrates (g)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    /// Omega-3 EPA + DHA (g)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub omega3: Option<f64>,
    /// Vitamin A (IU)
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "vitaminA")]
    pub vitamin_a: Option<f64>,
    /// Vitamin C (mg)
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "vitaminC")]
    pub vitamin_c: Option<f64>,
    /// Vitamin D (IU)
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "vitaminD")]
    pub vitamin_d: Option<f64>,
    /// Taurine (mg)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taurine: Option<f64>,
    /// Per-species suitability flags keyed by species key
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub species_compatibility: BTreeMap<String, CompatibilityLevel>,
    /// Per-species maximum fraction (0-1) of total recipe mass
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub max_inclusion_percent_by_species: BTreeMap<String, f64>,
    /// Legacy toxicity list: species keys or `all`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub toxic_for: Vec<String>,
    /// Severity reported for legacy toxicity matches (defaults to high)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toxic_severity: Option<Severity>,
    /// Per-species free-text feeding notes
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub notes_by_species: BTreeMap<String, String>,
    /// Data source citation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Any other fields from the source data
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl IngredientComposition {
    /// Zero-valued composition used for unresolvable ingredients
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            name: None,
            protein: None,
            fat: None,
            calcium: None,
            phosphorus: None,
            moisture: None,
            kcal: None,
            fiber: None,
            carbs: None,
            omega3: None,
            vitamin_a: None,
            vitamin_c: None,
            vitamin_d: None,
            taurine: None,
            species_compatibility: BTreeMap::new(),
            max_inclusion_percent_by_species: BTreeMap::new(),
            toxic_for: Vec::new(),
            toxic_severity: None,
            notes_by_species: BTreeMap::new(),
            source: None,
            extra: BTreeMap::new(),
        }
    }

    /// Every numeric nutrient field present, by raw field name
    ///
    /// Declared fields come first, followed by numeric pass-through fields
    /// in key order.
    pub fn nutrient_fields(&self) -> impl Iterator<Item = (&str, f64)> {
        let declared = [
            ("protein", self.protein),
            ("fat", self.fat),
            ("calcium", self.calcium),
            ("phosphorus", self.phosphorus),
            ("moisture", self.moisture),
            ("kcal", self.kcal),
            ("fiber", self.fiber),
            ("carbs", self.carbs),
            ("omega3", self.omega3),
            ("vitaminA", self.vitamin_a),
            ("vitaminC", self.vitamin_c),
            ("vitaminD", self.vitamin_d),
            ("taurine", self.taurine),
        ];

        declared
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| (field, v)))
            .chain(
                self.extra
                    .iter()
                    .filter_map(|(field, value)| value.as_f64().map(|v| (field.as_str(), v))),
            )
    }

    /// Compatibility flag for a species key, if declared
    #[must_use]
    pub fn compatibility_for(&self, species_key: &str) -> Option<CompatibilityLevel> {
        self.species_compatibility.get(species_key).copied()
    }

    /// Max-inclusion fraction for a species key, if declared
    #[must_use]
    pub fn max_inclusion_for(&self, species_key: &str) -> Option<f64> {
        self.max_inclusion_percent_by_species.get(species_key).copied()
    }

    /// Feeding note for a species key, or an empty string
    #[must_use]
    pub fn note_for(&self, species_key: &str) -> &str {
        self.notes_by_species
            .get(species_key)
            .map_or("", String::as_str)
    }

    /// Whether the legacy toxicity list names this species (or `all`)
    #[must_use]
    pub fn is_toxic_for(&self, species_key: &str) -> bool {
        self.toxic_for.iter().any(|s| {
            let s = s.trim().to_lowercase();
            s == species_key || s == crate::constants::species::ALL
        })
    }

    /// Validate externally supplied data before it reaches the engine
    ///
    /// # Errors
    ///
    /// Returns an error if a nutrient value is negative or not finite, or a
    /// max-inclusion fraction lies outside (0, 1]
    pub fn validate(&self, key: &str) -> Result<(), CompositionError> {
        if key.trim().is_empty() {
            return Err(CompositionError::EmptyKey);
        }

        for (field, value) in self.nutrient_fields() {
            if !value.is_finite() || value < 0.0 {
                return Err(CompositionError::invalid_nutrient(key, field, value));
            }
        }

        for (species, fraction) in &self.max_inclusion_percent_by_species {
            if !fraction.is_finite() || *fraction <= 0.0 || *fraction > 1.0 {
                return Err(CompositionError::invalid_inclusion(key, species, *fraction));
            }
        }

        Ok(())
    }
}
