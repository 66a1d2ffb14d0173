// ABOUTME: Meal analyzer entry point wiring aggregation, safety, coverage, scoring, and suggestions
// ABOUTME: Pure and infallible; batch analysis runs in parallel over shared read-only tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

//! # Meal Analyzer
//!
//! Pipeline, in order:
//!
//! 1. drop malformed selections and resolve the rest
//! 2. aggregate nutrients into [`RecipeTotals`]
//! 3. compute the recommended serving
//! 4. run the safety checker and the per-serving coverage scorer
//! 5. compose the final score
//! 6. generate suggestions and fill the legacy fields
//!
//! The analyzer holds only read-only state, so one instance can be shared
//! across threads and [`MealAnalyzer::analyze_batch`] fans out with rayon.

use crate::aggregator::{resolve_selections, RecipeTotals, ResolvedSelection};
use crate::composition::{
    AliasMap, CompositionSource, CompositionTable, DisplayNameResolver, IngredientResolver,
    TitleCaseDisplayNames,
};
use crate::config::ScoringConfig;
use crate::coverage::{assess_coverage, CoverageReport};
use crate::safety::check_safety;
use crate::scoring::{
    balance_score, compose_score, coverage_score, raw_penalty, ScoreComponents,
};
use crate::serving::recommended_serving_grams;
use crate::suggestions::{generate_suggestions, SuggestionInputs};
use petplates_core::constants::{messages, nutrients};
use petplates_core::models::{
    IngredientSelection, LegacyScoreBreakdown, MealAnalysis, PetProfile, ScoreBreakdown, Species,
    WarningItem,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::{Arc, LazyLock};
use tracing::{debug, warn};

/// Analyzer over the built-in table with the global configuration
static DEFAULT_ANALYZER: LazyLock<MealAnalyzer> = LazyLock::new(MealAnalyzer::new);

/// Analyze one recipe with the built-in composition table and global config
#[must_use]
pub fn generate_analysis(pet: &PetProfile, selections: &[IngredientSelection]) -> MealAnalysis {
    DEFAULT_ANALYZER.analyze(pet, selections)
}

/// One (pet, recipe) pair for batch analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    /// Pet being fed
    pub pet: PetProfile,
    /// Recipe ingredients
    pub selections: Vec<IngredientSelection>,
}

impl AnalysisRequest {
    /// Create a request
    #[must_use]
    pub const fn new(pet: PetProfile, selections: Vec<IngredientSelection>) -> Self {
        Self { pet, selections }
    }
}

/// Scores recipes for pets
#[derive(Clone)]
pub struct MealAnalyzer {
    config: ScoringConfig<true>,
    source: Arc<dyn CompositionSource>,
    aliases: AliasMap,
    display: Arc<dyn DisplayNameResolver>,
}

impl fmt::Debug for MealAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MealAnalyzer")
            .field("config", &self.config)
            .field("aliases", &self.aliases.len())
            .finish_non_exhaustive()
    }
}

impl Default for MealAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl MealAnalyzer {
    /// Analyzer over the built-in table, default aliases, and the global config
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ScoringConfig::global().clone())
    }

    /// Analyzer over the built-in table with an explicit config
    #[must_use]
    pub fn with_config(config: ScoringConfig<true>) -> Self {
        Self {
            config,
            source: Arc::new(CompositionTable::builtin()),
            aliases: AliasMap::default(),
            display: Arc::new(TitleCaseDisplayNames),
        }
    }

    /// Replace the composition source
    #[must_use]
    pub fn with_compositions(mut self, source: Arc<dyn CompositionSource>) -> Self {
        self.source = source;
        self
    }

    /// Replace the alias map
    #[must_use]
    pub fn with_aliases(mut self, aliases: AliasMap) -> Self {
        self.aliases = aliases;
        self
    }

    /// Replace the display name resolver
    #[must_use]
    pub fn with_display_names(mut self, display: Arc<dyn DisplayNameResolver>) -> Self {
        self.display = display;
        self
    }

    /// Scoring configuration in use
    #[must_use]
    pub const fn config(&self) -> &ScoringConfig<true> {
        &self.config
    }

    /// Resolver over this analyzer's source and aliases
    #[must_use]
    pub fn resolver(&self) -> IngredientResolver<'_> {
        IngredientResolver::new(self.source.as_ref(), &self.aliases)
    }

    /// Display name for a selection key
    #[must_use]
    pub fn display_name(&self, key: &str) -> String {
        self.display.display_name(key)
    }

    /// Analyze one recipe for one pet; never fails
    #[must_use]
    pub fn analyze(&self, pet: &PetProfile, selections: &[IngredientSelection]) -> MealAnalysis {
        let config = &self.config;
        let resolver = self.resolver();
        let resolved = resolve_selections(selections, &resolver);
        if resolved.is_empty() {
            debug!(species = %pet.species, "No valid ingredient selections");
            return MealAnalysis::empty();
        }

        let species = pet.normalized_species();
        if !species.is_known() {
            debug!(species = %pet.species, "Unrecognized species scored against dog targets");
        }
        let Evaluation {
            totals,
            serving,
            coverage,
            toxicity,
            allergy,
            mut components,
        } = self.evaluate(pet, &species, &resolved);
        if !totals.not_found.is_empty() {
            warn!(
                not_found = ?totals.not_found,
                "Ingredients missing from composition table contribute no nutrition"
            );
        }

        if let Some(cap) = self.allergen_free_cap(pet, &species, &resolved, &allergy) {
            if cap < components.final_score {
                debug!(
                    uncapped = components.final_score,
                    cap, "Score capped at the allergen-free recipe score"
                );
                components.final_score = cap;
            }
        }

        let suggestions = generate_suggestions(
            &SuggestionInputs {
                pet,
                species: &species,
                totals: &totals,
                serving_grams: serving,
                coverage: &coverage,
                toxicity: &toxicity,
                allergy: &allergy,
            },
            &config.suggestions,
            &config.energy,
        );

        debug!(
            species = %species,
            total_grams = totals.total_grams,
            serving_grams = serving,
            score = components.final_score,
            toxicity_warnings = toxicity.len(),
            allergy_warnings = allergy.len(),
            nutrient_warnings = coverage.warnings.len(),
            "Meal analysis complete"
        );

        let (dm_nutrients, dry_matter_percent) = dry_matter(&totals);
        let adequacies = if coverage.protein_and_fat_adequate(config.coverage.adequacy_ratio) {
            vec![messages::PROTEIN_FAT_ADEQUATE.to_owned()]
        } else {
            Vec::new()
        };

        MealAnalysis {
            total_recipe_grams: totals.total_grams,
            energy_density_kcal_per_gram: totals.energy_density(),
            recommended_serving_grams: serving,
            score: components.final_score,
            breakdown: ScoreBreakdown {
                nutrient_coverage_score: components.coverage_score,
                toxicity_penalty: components.raw_penalty,
                balance_variety_score: components.balance_score,
            },
            deficiencies: messages_with_prefix(&coverage, "deficiency:"),
            excesses: messages_with_prefix(&coverage, "excess:"),
            adequacies,
            dm_nutrients,
            dry_matter_percent,
            total_weight_g: totals.total_grams,
            ca_to_p_ratio: totals.ca_to_p_ratio(),
            score_breakdown: LegacyScoreBreakdown {
                base_score: components.base,
                nutrition_penalty: components.applied_penalty,
                balance_penalty: 0.0,
            },
            toxicity_warnings: toxicity,
            allergy_warnings: allergy,
            nutrient_warnings: coverage.warnings,
            suggestions,
            ingredients_not_found: totals.not_found,
            nutrients: totals.nutrients,
        }
    }

    /// Aggregate, check, and score one resolved recipe
    fn evaluate(
        &self,
        pet: &PetProfile,
        species: &Species,
        resolved: &[ResolvedSelection<'_>],
    ) -> Evaluation {
        let config = &self.config;
        let totals = RecipeTotals::aggregate(resolved);
        let serving = recommended_serving_grams(
            totals.kcal(),
            totals.total_grams,
            pet,
            species,
            &config.energy,
        );
        let safety = check_safety(
            pet,
            species,
            resolved,
            totals.total_grams,
            self.display.as_ref(),
        );
        let coverage = assess_coverage(
            pet,
            species,
            &totals,
            serving,
            &config.coverage,
            &config.energy,
        );

        let mut toxicity = safety.toxicity;
        toxicity.extend(safety.inclusion);
        let allergy = safety.allergy;

        let raw = raw_penalty(&toxicity, &allergy, &config.penalty);
        let components = compose_score(
            coverage_score(coverage.average(), totals.resolved_count, &config.weights),
            balance_score(totals.category_count(), &config.weights),
            raw,
            &config.weights,
            &config.penalty,
        );

        Evaluation {
            totals,
            serving,
            coverage,
            toxicity,
            allergy,
            components,
        }
    }

    /// Lowest score among the recipe's allergen-trimmed variants
    ///
    /// Allergen selections are dropped from the end one at a time, so each
    /// variant is the recipe as it stood before an allergen was appended.
    /// Variants with no selections left are skipped.
    fn allergen_free_cap(
        &self,
        pet: &PetProfile,
        species: &Species,
        resolved: &[ResolvedSelection<'_>],
        allergy: &[WarningItem],
    ) -> Option<u8> {
        let allergen_keys: HashSet<&str> = allergy
            .iter()
            .filter_map(|w| w.ingredient_key.as_deref())
            .collect();
        if allergen_keys.is_empty() {
            return None;
        }

        let allergen_positions: Vec<usize> = resolved
            .iter()
            .enumerate()
            .filter(|(_, sel)| allergen_keys.contains(sel.key))
            .map(|(idx, _)| idx)
            .collect();

        (0..allergen_positions.len())
            .filter_map(|kept| {
                let dropped = &allergen_positions[kept..];
                let variant: Vec<ResolvedSelection<'_>> = resolved
                    .iter()
                    .enumerate()
                    .filter(|(idx, _)| !dropped.contains(idx))
                    .map(|(_, sel)| sel.clone())
                    .collect();
                (!variant.is_empty())
                    .then(|| self.evaluate(pet, species, &variant).components.final_score)
            })
            .min()
    }

    /// Analyze many recipes in parallel, preserving input order
    #[must_use]
    pub fn analyze_batch(&self, requests: &[AnalysisRequest]) -> Vec<MealAnalysis> {
        requests
            .par_iter()
            .map(|req| self.analyze(&req.pet, &req.selections))
            .collect()
    }
}

/// Intermediate results for one resolved recipe
struct Evaluation {
    totals: RecipeTotals,
    serving: f64,
    coverage: CoverageReport,
    toxicity: Vec<WarningItem>,
    allergy: Vec<WarningItem>,
    components: ScoreComponents,
}

/// Dry-matter percentages (legacy), skipped entirely when there is no dry matter
fn dry_matter(totals: &RecipeTotals) -> (BTreeMap<String, f64>, f64) {
    let dry = totals.total_grams - totals.get(nutrients::MOISTURE_G);
    let dry_percent = if totals.total_grams > 0.0 {
        dry / totals.total_grams * 100.0
    } else {
        0.0
    };
    if dry <= 0.0 {
        return (BTreeMap::new(), dry_percent);
    }

    let dm = totals
        .nutrients
        .iter()
        .filter(|(key, _)| key.as_str() != nutrients::MOISTURE_G)
        .map(|(key, value)| (format!("{key}_percent"), value / dry * 100.0))
        .collect();
    (dm, dry_percent)
}

fn messages_with_prefix(coverage: &CoverageReport, prefix: &str) -> Vec<String> {
    coverage
        .warnings
        .iter()
        .filter(|w| w.id.as_deref().is_some_and(|id| id.starts_with(prefix)))
        .map(|w| w.message.clone())
        .collect()
}
