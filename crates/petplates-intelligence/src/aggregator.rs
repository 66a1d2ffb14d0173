// ABOUTME: Nutrient aggregator summing per-100g compositions into whole-recipe totals
// ABOUTME: Filters malformed selections, resolves keys once, and tracks not-found ingredients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

use crate::composition::{IngredientResolver, Resolved};
use petplates_core::constants::{nutrients, units};
use petplates_core::models::IngredientSelection;
use std::collections::BTreeMap;

/// A valid selection paired with its lookup result
#[derive(Debug, Clone)]
pub struct ResolvedSelection<'a> {
    /// Key as the caller supplied it
    pub key: &'a str,
    /// Amount in grams (always > 0)
    pub grams: f64,
    /// Lookup outcome
    pub resolved: Resolved<'a>,
}

/// Drop malformed selections and resolve the rest
///
/// Selections with a blank key or non-positive grams never reach any later
/// stage.
#[must_use]
pub fn resolve_selections<'a>(
    selections: &'a [IngredientSelection],
    resolver: &IngredientResolver<'a>,
) -> Vec<ResolvedSelection<'a>> {
    selections
        .iter()
        .filter(|s| s.is_valid())
        .map(|s| ResolvedSelection {
            key: &s.key,
            grams: s.grams,
            resolved: resolver.resolve(&s.key),
        })
        .collect()
}

/// Summed nutrients for a whole recipe
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeTotals {
    /// Totals keyed by output nutrient key
    pub nutrients: BTreeMap<String, f64>,
    /// Sum of grams over all valid selections
    pub total_grams: f64,
    /// Keys that resolved only to the placeholder, in input order
    pub not_found: Vec<String>,
    /// Number of selections that resolved to real data
    pub resolved_count: usize,
}

impl RecipeTotals {
    /// Aggregate resolved selections
    #[must_use]
    pub fn aggregate(selections: &[ResolvedSelection<'_>]) -> Self {
        let mut totals = Self::default();

        for sel in selections {
            totals.total_grams += sel.grams;
            if sel.resolved.is_not_found() {
                totals.not_found.push(sel.key.to_owned());
                continue;
            }
            totals.resolved_count += 1;

            let factor = sel.grams / units::GRAMS_PER_COMPOSITION_UNIT;
            for (field, value) in sel.resolved.composition.nutrient_fields() {
                *totals
                    .nutrients
                    .entry(nutrients::output_key(field).to_owned())
                    .or_insert(0.0) += value * factor;
            }
        }

        totals
    }

    /// Total for one output key, zero when absent
    #[must_use]
    pub fn get(&self, key: &str) -> f64 {
        self.nutrients.get(key).copied().unwrap_or(0.0)
    }

    /// Total energy, accepting either energy key
    #[must_use]
    pub fn kcal(&self) -> f64 {
        self.nutrients
            .get(nutrients::CALORIES_KCAL)
            .or_else(|| self.nutrients.get(nutrients::ENERGY_KCAL))
            .copied()
            .unwrap_or(0.0)
    }

    /// Energy density in kcal per gram
    #[must_use]
    pub fn energy_density(&self) -> f64 {
        if self.total_grams > 0.0 {
            self.kcal() / self.total_grams
        } else {
            0.0
        }
    }

    /// Calcium to phosphorus ratio, absent when there is no phosphorus
    #[must_use]
    pub fn ca_to_p_ratio(&self) -> Option<f64> {
        let p = self.get(nutrients::PHOSPHORUS_MG);
        (p > 0.0).then(|| self.get(nutrients::CALCIUM_MG) / p)
    }

    /// Count of food categories with nonzero mass
    ///
    /// Categories: protein, greens (fiber or calcium), carbohydrates, fat.
    #[must_use]
    pub fn category_count(&self) -> u8 {
        let present = [
            self.get(nutrients::PROTEIN_G) > 0.0,
            self.get(nutrients::FIBER_G) > 0.0 || self.get(nutrients::CALCIUM_MG) > 0.0,
            self.get(nutrients::CARBS_G) > 0.0,
            self.get(nutrients::FAT_G) > 0.0,
        ];
        present.iter().fold(0, |count, p| count + u8::from(*p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::{AliasMap, CompositionTable};

    fn totals_for(selections: &[IngredientSelection]) -> RecipeTotals {
        let aliases = AliasMap::default();
        let resolver = IngredientResolver::new(CompositionTable::builtin(), &aliases);
        RecipeTotals::aggregate(&resolve_selections(selections, &resolver))
    }

    #[test]
    fn test_scales_per_100g_and_renames() {
        let totals = totals_for(&[IngredientSelection::new("chicken_breast", 200.0)]);
        assert!((totals.get(nutrients::PROTEIN_G) - 62.0).abs() < 1e-9);
        assert!((totals.get(nutrients::CALCIUM_MG) - 22.0).abs() < 1e-9);
        assert!((totals.kcal() - 330.0).abs() < 1e-9);
        assert!(!totals.nutrients.contains_key("protein"));
    }

    #[test]
    fn test_malformed_selections_are_dropped() {
        let totals = totals_for(&[
            IngredientSelection::new("chicken_breast", 100.0),
            IngredientSelection::new("", 50.0),
            IngredientSelection::new("kale_raw", 0.0),
            IngredientSelection::new("kale_raw", -10.0),
        ]);
        assert!((totals.total_grams - 100.0).abs() < f64::EPSILON);
        assert_eq!(totals.resolved_count, 1);
    }

    #[test]
    fn test_unknown_keys_count_mass_but_no_nutrients() {
        let totals = totals_for(&[
            IngredientSelection::new("nonexistent_ingredient", 100.0),
            IngredientSelection::new("kale_raw", 50.0),
        ]);
        assert_eq!(totals.not_found, vec!["nonexistent_ingredient".to_owned()]);
        assert!((totals.total_grams - 150.0).abs() < f64::EPSILON);
        assert!((totals.get(nutrients::CALCIUM_MG) - 127.0).abs() < 1e-9);
    }

    #[test]
    fn test_category_count() {
        let rice = totals_for(&[IngredientSelection::new("brown_rice_cooked", 100.0)]);
        assert_eq!(rice.category_count(), 4);

        let oil = totals_for(&[IngredientSelection::new("fish_oil", 10.0)]);
        assert_eq!(oil.category_count(), 1);
    }
}
