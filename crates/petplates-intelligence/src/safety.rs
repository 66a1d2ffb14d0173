// ABOUTME: Safety checker for species compatibility, max inclusion, legacy toxicity, and allergies
// ABOUTME: Emits categorized warnings as data; never blocks scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

//! # Safety Checker
//!
//! Each valid selection is checked, in order, against:
//!
//! 1. the species compatibility flag (`avoid` critical, `limit` medium, `caution` low)
//! 2. the per-species max-inclusion fraction of total recipe mass
//! 3. the legacy `toxicFor` list (species key or `all`)
//! 4. the pet's allergy terms, matched against display name and raw key
//!
//! Messages always use the display name of the selection, never the
//! composition key it resolved to.

use crate::aggregator::ResolvedSelection;
use crate::composition::DisplayNameResolver;
use petplates_core::models::{CompatibilityLevel, PetProfile, Severity, Species, WarningItem};

/// Overage beyond which an inclusion warning becomes high severity
const INCLUSION_HIGH_MULTIPLIER: f64 = 1.5;

/// Warnings produced by the safety checker
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SafetyReport {
    /// Compatibility and legacy toxicity findings
    pub toxicity: Vec<WarningItem>,
    /// Allergy matches
    pub allergy: Vec<WarningItem>,
    /// Max-inclusion overages
    pub inclusion: Vec<WarningItem>,
}

/// Run every safety rule over the selections
#[must_use]
pub fn check_safety(
    pet: &PetProfile,
    species: &Species,
    selections: &[ResolvedSelection<'_>],
    total_grams: f64,
    display: &dyn DisplayNameResolver,
) -> SafetyReport {
    let mut report = SafetyReport::default();
    let species_key = species.key();
    let allergies = pet.allergy_terms();

    for sel in selections {
        let comp = sel.resolved.composition;
        let name = display.display_name(sel.key);
        let note = comp.note_for(species_key);

        let level = comp.compatibility_for(species_key);
        if let Some(warning) = compatibility_warning(pet, sel.key, &name, level, note) {
            report.toxicity.push(warning);
        }

        if let Some(max) = comp.max_inclusion_for(species_key) {
            let fraction = if total_grams > 0.0 {
                sel.grams / total_grams
            } else {
                0.0
            };
            if fraction > max {
                report
                    .inclusion
                    .push(inclusion_warning(sel.key, &name, fraction, max, note));
            }
        }

        if comp.is_toxic_for(species_key) {
            report.toxicity.push(WarningItem::for_ingredient(
                format!("toxic:{}", sel.key),
                sel.key,
                &name,
                format!(
                    "{name} flagged as potentially toxic/contraindicated for {}",
                    pet.species
                ),
                comp.toxic_severity.unwrap_or(Severity::High),
            ));
        }

        let name_lower = name.to_lowercase();
        let key_lower = sel.key.to_lowercase();
        for term in &allergies {
            if name_lower.contains(term.as_str()) || key_lower.contains(term.as_str()) {
                report.allergy.push(WarningItem::for_ingredient(
                    format!("allergy:{}:{term}", sel.key),
                    sel.key,
                    &name,
                    format!("{name} matches pet allergy \"{term}\""),
                    Severity::High,
                ));
            }
        }
    }

    report
}

fn compatibility_warning(
    pet: &PetProfile,
    key: &str,
    name: &str,
    level: Option<CompatibilityLevel>,
    note: &str,
) -> Option<WarningItem> {
    let (verb, severity) = match level? {
        CompatibilityLevel::Ok => return None,
        CompatibilityLevel::Caution => ("requires caution for", Severity::Low),
        CompatibilityLevel::Limit => ("should be limited for", Severity::Medium),
        CompatibilityLevel::Avoid => ("should be avoided for", Severity::Critical),
    };
    let message = format!("{name} {verb} {}. {note}", pet.species);
    Some(WarningItem::for_ingredient(
        format!("compatibility:{key}"),
        key,
        name,
        message.trim_end(),
        severity,
    ))
}

fn inclusion_warning(key: &str, name: &str, fraction: f64, max: f64, note: &str) -> WarningItem {
    let overage = (fraction - max) * 100.0;
    let message = format!(
        "{name} exceeds recommended maximum ({:.0}% of meal). Currently {:.1}% (+{overage:.1}%). {note}",
        max * 100.0,
        fraction * 100.0,
    );
    let severity = if fraction > max * INCLUSION_HIGH_MULTIPLIER {
        Severity::High
    } else {
        Severity::Medium
    };
    WarningItem::for_ingredient(
        format!("inclusion:{key}"),
        key,
        name,
        message.trim_end(),
        severity,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::resolve_selections;
    use crate::composition::{
        AliasMap, CompositionTable, IngredientResolver, MappedDisplayNames, TitleCaseDisplayNames,
    };
    use petplates_core::models::IngredientSelection;

    fn check(pet: &PetProfile, selections: &[IngredientSelection]) -> SafetyReport {
        check_with(pet, selections, &TitleCaseDisplayNames)
    }

    fn check_with(
        pet: &PetProfile,
        selections: &[IngredientSelection],
        display: &dyn DisplayNameResolver,
    ) -> SafetyReport {
        let aliases = AliasMap::default();
        let resolver = IngredientResolver::new(CompositionTable::builtin(), &aliases);
        let resolved = resolve_selections(selections, &resolver);
        let total: f64 = resolved.iter().map(|s| s.grams).sum();
        check_safety(pet, &pet.normalized_species(), &resolved, total, display)
    }

    #[test]
    fn test_avoid_flag_is_critical() {
        let pet = PetProfile::new("dogs", 20.0);
        let report = check(&pet, &[IngredientSelection::new("onion_raw", 20.0)]);
        let compat = report
            .toxicity
            .iter()
            .find(|w| w.severity == Severity::Critical && w.message.contains("should be avoided"))
            .unwrap();
        assert!(compat.message.contains("Onion Raw should be avoided for dogs."));
        assert!(compat.message.contains("red blood cells"));
    }

    #[test]
    fn test_limit_flag_is_medium() {
        let pet = PetProfile::new("cat", 4.0);
        let report = check(&pet, &[IngredientSelection::new("tuna_water", 100.0)]);
        assert_eq!(report.toxicity.len(), 1);

        let limit = &report.toxicity[0];
        assert_eq!(limit.id.as_deref(), Some("compatibility:tuna_water"));
        assert_eq!(limit.severity, Severity::Medium);
        assert!(limit.message.starts_with("Tuna Water should be limited for cat."));
        assert!(limit.message.contains("mercury"));
    }

    #[test]
    fn test_legacy_toxic_list_uses_declared_severity() {
        let pet = PetProfile::new("dog", 20.0);
        let report = check(&pet, &[IngredientSelection::new("grapes_raw", 20.0)]);
        assert_eq!(report.toxicity.len(), 1);
        assert_eq!(report.toxicity[0].severity, Severity::Critical);
        assert!(report.toxicity[0].message.contains("potentially toxic"));
    }

    #[test]
    fn test_inclusion_severity_depends_on_overage() {
        let pet = PetProfile::new("dog", 20.0);

        // 12% liver against a 10% limit: medium
        let medium = check(
            &pet,
            &[
                IngredientSelection::new("beef_liver", 12.0),
                IngredientSelection::new("chicken_breast", 88.0),
            ],
        );
        assert_eq!(medium.inclusion.len(), 1);
        assert_eq!(medium.inclusion[0].severity, Severity::Medium);
        assert!(medium.inclusion[0].message.contains("(10% of meal)"));
        assert!(medium.inclusion[0].message.contains("Currently 12.0% (+2.0%)"));

        // 30% liver: high
        let high = check(
            &pet,
            &[
                IngredientSelection::new("beef_liver", 30.0),
                IngredientSelection::new("chicken_breast", 70.0),
            ],
        );
        assert_eq!(high.inclusion[0].severity, Severity::High);
    }

    #[test]
    fn test_allergy_matches_key_and_display_name() {
        let pet = PetProfile::new("dog", 20.0).with_allergies(["Chicken"]);
        let report = check(
            &pet,
            &[
                IngredientSelection::new("chicken_breast", 50.0),
                IngredientSelection::new("kale_raw", 50.0),
            ],
        );
        assert_eq!(report.allergy.len(), 1);
        assert_eq!(
            report.allergy[0].message,
            "Chicken Breast matches pet allergy \"chicken\""
        );
    }

    #[test]
    fn test_messages_use_display_name_not_composition_key() {
        let pet = PetProfile::new("guinea pig", 1.0).with_allergies(["bok"]);
        let names = MappedDisplayNames::new([("spinach_raw", "bok choy")]);
        let report = check_with(&pet, &[IngredientSelection::new("spinach_raw", 40.0)], &names);

        assert!(report.toxicity[0].message.starts_with("bok choy requires caution"));
        assert_eq!(report.allergy.len(), 1);
        assert!(report.all_messages().all(|m| !m.contains("spinach_raw")));
    }

    #[test]
    fn test_unknown_species_matches_no_rules() {
        let pet = PetProfile::new("axolotl", 0.2);
        let report = check(&pet, &[IngredientSelection::new("onion_raw", 10.0)]);
        assert!(report.toxicity.is_empty());
        assert!(report.inclusion.is_empty());
    }

    impl SafetyReport {
        fn all_messages(&self) -> impl Iterator<Item = &str> {
            self.toxicity
                .iter()
                .chain(&self.allergy)
                .chain(&self.inclusion)
                .map(|w| w.message.as_str())
        }
    }
}
