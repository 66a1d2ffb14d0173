// ABOUTME: Per-serving nutrient coverage ratios against lenient species targets
// ABOUTME: Emits deficiency and vitamin excess warnings scaled to the recommended serving
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

//! # Coverage Scorer
//!
//! Every comparison uses the recommended serving, not the whole batch:
//! aggregate totals are scaled by `serving / total` first. Warnings therefore
//! never contradict the serving recommendation.

use crate::aggregator::RecipeTotals;
use crate::config::scoring::{CoverageConfig, EnergyConfig};
use crate::serving::effective_weight_kg;
use petplates_core::constants::{nutrients, units};
use petplates_core::models::{PetProfile, Severity, Species, WarningItem};
use std::collections::BTreeMap;

/// Protein coverage key
pub const PROTEIN: &str = "protein";
/// Fat coverage key
pub const FAT: &str = "fat";
/// Fiber coverage key
pub const FIBER: &str = "fiber";
/// Taurine coverage key
pub const TAURINE: &str = "taurine";
/// Calcium coverage key
pub const CALCIUM: &str = "calcium";
/// Calcium to phosphorus ratio coverage key
pub const CA_P_RATIO: &str = "ca_p";
/// Vitamin C coverage key
pub const VITAMIN_C: &str = "vitamin_c";

/// Coverage ratios and nutrient warnings for one serving
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageReport {
    /// Ratio of actual to target per tracked nutrient, capped at the ceiling
    pub ratios: BTreeMap<&'static str, f64>,
    /// Deficiency and excess warnings
    pub warnings: Vec<WarningItem>,
    /// Grams the per-serving figures were computed for
    pub serving_basis_grams: f64,
}

impl CoverageReport {
    /// Mean of all coverage ratios, `None` when nothing was tracked
    #[must_use]
    pub fn average(&self) -> Option<f64> {
        if self.ratios.is_empty() {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let count = self.ratios.len() as f64;
        Some(self.ratios.values().sum::<f64>() / count)
    }

    /// Coverage ratio for a key
    #[must_use]
    pub fn ratio(&self, key: &str) -> Option<f64> {
        self.ratios.get(key).copied()
    }

    /// Whether both protein and fat coverage exceed the adequacy ratio
    #[must_use]
    pub fn protein_and_fat_adequate(&self, adequacy_ratio: f64) -> bool {
        matches!(
            (self.ratio(PROTEIN), self.ratio(FAT)),
            (Some(p), Some(f)) if p > adequacy_ratio && f > adequacy_ratio
        )
    }
}

/// One tracked nutrient's per-serving figures
struct Tracked {
    key: &'static str,
    label: &'static str,
    unit: &'static str,
    actual: f64,
    expected: f64,
    floor: f64,
    deficiency_fraction: f64,
}

/// Assess nutrient coverage of the recommended serving
///
/// When the recipe has no energy (serving of 0 g) the whole batch is used
/// as the serving basis.
#[must_use]
pub fn assess_coverage(
    pet: &PetProfile,
    species: &Species,
    totals: &RecipeTotals,
    serving_grams: f64,
    config: &CoverageConfig,
    energy: &EnergyConfig,
) -> CoverageReport {
    let basis = if serving_grams > 0.0 {
        serving_grams
    } else {
        totals.total_grams
    };
    let serving_ratio = if totals.total_grams > 0.0 {
        basis / totals.total_grams
    } else {
        1.0
    };
    let per_serving = |key: &str| totals.get(key) * serving_ratio;
    let grams_per_100 = if basis > 0.0 {
        basis / units::GRAMS_PER_COMPOSITION_UNIT
    } else {
        1.0
    };

    let mut report = CoverageReport {
        serving_basis_grams: basis,
        ..CoverageReport::default()
    };
    let mut tracked = Vec::new();

    if let Some(targets) = config.macro_targets(species) {
        tracked.push(Tracked {
            key: PROTEIN,
            label: "Protein",
            unit: "g",
            actual: per_serving(nutrients::PROTEIN_G),
            expected: targets.protein_g * grams_per_100,
            floor: config.min_expected_protein_g,
            deficiency_fraction: config.deficiency_fraction,
        });
        tracked.push(Tracked {
            key: FAT,
            label: "Fat",
            unit: "g",
            actual: per_serving(nutrients::FAT_G),
            expected: targets.fat_g * grams_per_100,
            floor: config.min_expected_fat_g,
            deficiency_fraction: config.deficiency_fraction,
        });
        if let Some(fiber) = targets.fiber_g {
            tracked.push(Tracked {
                key: FIBER,
                label: "Fiber",
                unit: "g",
                actual: per_serving(nutrients::FIBER_G),
                expected: fiber * grams_per_100,
                floor: config.min_expected_fiber_g,
                deficiency_fraction: config.deficiency_fraction,
            });
        }
        if let Some(taurine) = targets.taurine_mg {
            tracked.push(Tracked {
                key: TAURINE,
                label: "Taurine",
                unit: "mg",
                actual: per_serving(nutrients::TAURINE_MG),
                expected: taurine * grams_per_100,
                floor: config.min_expected_mg,
                deficiency_fraction: config.taurine_deficiency_fraction,
            });
        }
    }

    match species {
        Species::Reptile => {
            tracked.push(Tracked {
                key: CALCIUM,
                label: "Calcium",
                unit: "mg",
                actual: per_serving(nutrients::CALCIUM_MG),
                expected: config.reptile.calcium_mg * grams_per_100,
                floor: config.min_expected_mg,
                deficiency_fraction: config.deficiency_fraction,
            });
            assess_ca_p_ratio(totals, config, &mut report);
        }
        Species::PocketPet => {
            let weight = effective_weight_kg(pet, energy);
            tracked.push(Tracked {
                key: VITAMIN_C,
                label: "Vitamin C",
                unit: "mg",
                actual: per_serving(nutrients::VITAMIN_C_MG),
                expected: config.pocket_pet_vitamin_c_mg_per_kg * weight,
                floor: config.min_expected_mg,
                deficiency_fraction: config.deficiency_fraction,
            });
        }
        _ => {}
    }

    for t in tracked {
        let ratio = t.actual / t.expected.max(t.floor);
        report
            .ratios
            .insert(t.key, ratio.min(config.coverage_ceiling));
        if t.actual < t.expected * t.deficiency_fraction {
            report.warnings.push(WarningItem::for_recipe(
                format!("deficiency:{}", t.key),
                format!(
                    "{} is low: {:.1} {unit} per serving vs a target of {:.1} {unit}",
                    t.label,
                    t.actual,
                    t.expected,
                    unit = t.unit,
                ),
                Severity::Medium,
            ));
        }
    }

    let vitamin_a = per_serving(nutrients::VITAMIN_A_IU);
    if vitamin_a > config.vitamin_a_excess_iu {
        report.warnings.push(WarningItem::for_recipe(
            "excess:vitamin_a",
            format!(
                "Vitamin A is excessive: {vitamin_a:.0} IU per serving exceeds {:.0} IU",
                config.vitamin_a_excess_iu
            ),
            Severity::High,
        ));
    }
    let vitamin_d = per_serving(nutrients::VITAMIN_D_IU);
    if vitamin_d > config.vitamin_d_excess_iu {
        report.warnings.push(WarningItem::for_recipe(
            "excess:vitamin_d",
            format!(
                "Vitamin D is excessive: {vitamin_d:.0} IU per serving exceeds {:.0} IU",
                config.vitamin_d_excess_iu
            ),
            Severity::High,
        ));
    }

    report
}

/// Ca:P is a ratio, so it is the same per serving as per batch
fn assess_ca_p_ratio(totals: &RecipeTotals, config: &CoverageConfig, report: &mut CoverageReport) {
    let Some(ratio) = totals.ca_to_p_ratio() else {
        return;
    };
    let target = config.reptile.ca_p_ratio;
    report
        .ratios
        .insert(CA_P_RATIO, (ratio / target).min(config.coverage_ceiling));
    if ratio < target * config.deficiency_fraction {
        report.warnings.push(WarningItem::for_recipe(
            "deficiency:ca_p",
            format!("Ca:P ratio {ratio:.2}:1 is below target {target:.1}:1"),
            Severity::Medium,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::resolve_selections;
    use crate::composition::{AliasMap, CompositionTable, IngredientResolver};
    use petplates_core::models::IngredientSelection;

    fn totals_for(selections: &[IngredientSelection]) -> RecipeTotals {
        let aliases = AliasMap::default();
        let resolver = IngredientResolver::new(CompositionTable::builtin(), &aliases);
        RecipeTotals::aggregate(&resolve_selections(selections, &resolver))
    }

    fn totals_from_table(json: &str, selections: &[IngredientSelection]) -> RecipeTotals {
        let table = CompositionTable::from_json_str(json).unwrap();
        let aliases = AliasMap::empty();
        let resolver = IngredientResolver::new(&table, &aliases);
        RecipeTotals::aggregate(&resolve_selections(selections, &resolver))
    }

    fn has_warning(report: &CoverageReport, id: &str) -> bool {
        report.warnings.iter().any(|w| w.id.as_deref() == Some(id))
    }

    fn assess(pet: &PetProfile, totals: &RecipeTotals, serving: f64) -> CoverageReport {
        assess_coverage(
            pet,
            &pet.normalized_species(),
            totals,
            serving,
            &CoverageConfig::default(),
            &EnergyConfig::default(),
        )
    }

    #[test]
    fn test_dog_chicken_coverage_is_capped() {
        let pet = PetProfile::new("dog", 25.0);
        let totals = totals_for(&[IngredientSelection::new("chicken_breast", 100.0)]);
        let report = assess(&pet, &totals, 379.0);

        // 31 g protein per 100 g vs a 5 g target
        assert!((report.ratio(PROTEIN).unwrap() - 1.5).abs() < f64::EPSILON);
        // No fiber in chicken: below 40% of target
        assert!(report.ratio(FIBER).unwrap().abs() < f64::EPSILON);
        assert!(report
            .warnings
            .iter()
            .any(|w| w.id.as_deref() == Some("deficiency:fiber")));
        assert!(report.protein_and_fat_adequate(0.8));
    }

    #[test]
    fn test_ratios_are_scale_invariant() {
        let pet = PetProfile::new("cat", 4.0);
        let small = totals_for(&[
            IngredientSelection::new("chicken_thighs", 100.0),
            IngredientSelection::new("chicken_hearts", 20.0),
        ]);
        let large = totals_for(&[
            IngredientSelection::new("chicken_thighs", 300.0),
            IngredientSelection::new("chicken_hearts", 60.0),
        ]);
        let a = assess(&pet, &small, 80.0);
        let b = assess(&pet, &large, 80.0);
        for (key, ratio) in &a.ratios {
            assert!((ratio - b.ratios[key]).abs() < 1e-9, "{key} differs");
        }
    }

    #[test]
    fn test_reptile_ca_p_deficiency() {
        let pet = PetProfile::new("reptiles", 0.4);
        let totals = totals_for(&[IngredientSelection::new("chicken_breast", 100.0)]);
        let report = assess(&pet, &totals, 10.0);
        let warning = report
            .warnings
            .iter()
            .find(|w| w.id.as_deref() == Some("deficiency:ca_p"))
            .unwrap();
        assert_eq!(warning.message, "Ca:P ratio 0.06:1 is below target 1.0:1");
    }

    #[test]
    fn test_pocket_pet_vitamin_c_target_scales_with_weight() {
        let pet = PetProfile::new("guinea pig", 1.0);
        let totals = totals_for(&[IngredientSelection::new("kale_raw", 100.0)]);
        // 10 g serving of kale: 9.34 mg vitamin C vs 5 mg target
        let report = assess(&pet, &totals, 10.0);
        assert!((report.ratio(VITAMIN_C).unwrap() - 1.5).abs() < f64::EPSILON);

        let heavy = PetProfile::new("guinea pig", 10.0);
        let report = assess(&heavy, &totals, 10.0);
        assert!(report.ratio(VITAMIN_C).unwrap() < 1.0);
    }

    #[test]
    fn test_taurine_uses_its_own_deficiency_fraction() {
        // cat target at a 100 g serving is 20 mg; 30% is 6 mg, 40% is 8 mg
        let pet = PetProfile::new("cat", 4.0);
        let table = r#"{
            "taurine_low": {"name": "Low Taurine Mix", "protein": 20.0, "fat": 8.0, "taurine": 5.0, "kcal": 150},
            "taurine_mid": {"name": "Mid Taurine Mix", "protein": 20.0, "fat": 8.0, "taurine": 7.0, "kcal": 150}
        }"#;

        let mid = totals_from_table(table, &[IngredientSelection::new("taurine_mid", 100.0)]);
        let report = assess(&pet, &mid, 100.0);
        assert!(report.ratio(TAURINE).unwrap() < 0.4);
        assert!(!has_warning(&report, "deficiency:taurine"));

        let low = totals_from_table(table, &[IngredientSelection::new("taurine_low", 100.0)]);
        let report = assess(&pet, &low, 100.0);
        let warning = report
            .warnings
            .iter()
            .find(|w| w.id.as_deref() == Some("deficiency:taurine"))
            .unwrap();
        assert_eq!(
            warning.message,
            "Taurine is low: 5.0 mg per serving vs a target of 20.0 mg"
        );
        assert_eq!(warning.severity, Severity::Medium);
    }

    #[test]
    fn test_fiber_floor_is_independent_of_fat_floor() {
        // 10 g serving: expected fiber 0.05 g and fat 0.2 g, so the fiber floor decides
        let pet = PetProfile::new("dog", 25.0);
        let totals = totals_from_table(
            r#"{"fiber_mix": {"name": "Fiber Mix", "protein": 5.0, "fat": 2.0, "fiber": 2.0, "kcal": 50}}"#,
            &[IngredientSelection::new("fiber_mix", 100.0)],
        );
        let species = pet.normalized_species();
        let energy = EnergyConfig::default();

        let default = assess(&pet, &totals, 10.0);
        assert!((default.ratio(FIBER).unwrap() - 1.5).abs() < f64::EPSILON);

        let config = CoverageConfig {
            min_expected_fiber_g: 0.4,
            ..CoverageConfig::default()
        };
        let raised = assess_coverage(&pet, &species, &totals, 10.0, &config, &energy);
        assert!((raised.ratio(FIBER).unwrap() - 0.5).abs() < 1e-9);
        assert!((raised.ratio(FAT).unwrap() - default.ratio(FAT).unwrap()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_vitamin_d_excess_per_serving() {
        let pet = PetProfile::new("dog", 25.0);
        let table = r#"{
            "vitamin_d_premix": {"name": "Vitamin D Premix", "protein": 10.0, "fat": 5.0, "vitaminD": 5000, "kcal": 300}
        }"#;
        let totals =
            totals_from_table(table, &[IngredientSelection::new("vitamin_d_premix", 100.0)]);

        // 500 g serving: 25,000 IU against a 20,000 IU limit
        let report = assess(&pet, &totals, 500.0);
        let warning = report
            .warnings
            .iter()
            .find(|w| w.id.as_deref() == Some("excess:vitamin_d"))
            .unwrap();
        assert_eq!(warning.severity, Severity::High);
        assert_eq!(
            warning.message,
            "Vitamin D is excessive: 25000 IU per serving exceeds 20000 IU"
        );

        // 300 g serving: 15,000 IU
        let report = assess(&pet, &totals, 300.0);
        assert!(!has_warning(&report, "excess:vitamin_d"));
    }

    #[test]
    fn test_vitamin_a_excess_per_serving() {
        let pet = PetProfile::new("dog", 30.0);
        let totals = totals_for(&[IngredientSelection::new("beef_liver", 1000.0)]);
        let report = assess(&pet, &totals, 700.0);
        assert!(report.warnings.iter().any(|w| {
            w.id.as_deref() == Some("excess:vitamin_a") && w.severity == Severity::High
        }));
    }
}
