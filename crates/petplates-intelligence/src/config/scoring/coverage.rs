// ABOUTME: Species nutrient target configuration for per-serving coverage scoring
// ABOUTME: Lenient per-100g targets, ratio guards, deficiency fractions, and vitamin excess limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

//! Nutrient Coverage Configuration
//!
//! Targets are deliberately lenient. Whole-food recipes rarely hit textbook
//! values, so a deficiency is only reported well below target and modest
//! excess is rewarded up to the coverage ceiling.

use super::ensure_finite;
use super::error::ConfigError;
use petplates_core::models::Species;
use serde::{Deserialize, Serialize};

/// Per-100 g macronutrient targets for one species
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacroTargets {
    /// Protein (g per 100 g serving)
    pub protein_g: f64,
    /// Fat (g per 100 g serving)
    pub fat_g: f64,
    /// Fiber (g per 100 g serving), if tracked
    pub fiber_g: Option<f64>,
    /// Taurine (mg per 100 g serving), if tracked
    pub taurine_mg: Option<f64>,
}

/// Reptile mineral targets
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReptileTargets {
    /// Minimum calcium to phosphorus ratio
    pub ca_p_ratio: f64,
    /// Calcium (mg per 100 g serving)
    pub calcium_mg: f64,
}

/// Target table and thresholds for coverage scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageConfig {
    /// Dog targets (also used for unrecognized species)
    pub dog: MacroTargets,
    /// Cat targets
    pub cat: MacroTargets,
    /// Bird targets
    pub bird: MacroTargets,
    /// Reptile targets
    pub reptile: ReptileTargets,
    /// Pocket pet vitamin C target (mg per kg body weight per serving)
    pub pocket_pet_vitamin_c_mg_per_kg: f64,
    /// Upper bound on any single coverage ratio
    pub coverage_ceiling: f64,
    /// Floor on expected protein per serving (g)
    pub min_expected_protein_g: f64,
    /// Floor on expected fat per serving (g)
    pub min_expected_fat_g: f64,
    /// Floor on expected fiber per serving (g)
    pub min_expected_fiber_g: f64,
    /// Floor on expected milligram nutrients per serving: taurine, calcium, vitamin C
    pub min_expected_mg: f64,
    /// Deficiency reported when actual falls below this fraction of target
    pub deficiency_fraction: f64,
    /// Deficiency fraction for taurine
    pub taurine_deficiency_fraction: f64,
    /// Per-serving vitamin A excess threshold (IU)
    pub vitamin_a_excess_iu: f64,
    /// Per-serving vitamin D excess threshold (IU)
    pub vitamin_d_excess_iu: f64,
    /// Protein and fat coverage above this ratio counts as adequate
    pub adequacy_ratio: f64,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            dog: MacroTargets {
                protein_g: 5.0,
                fat_g: 2.0,
                fiber_g: Some(0.5),
                taurine_mg: None,
            },
            cat: MacroTargets {
                protein_g: 8.0,
                fat_g: 3.0,
                fiber_g: None,
                taurine_mg: Some(20.0),
            },
            bird: MacroTargets {
                protein_g: 4.0,
                fat_g: 1.5,
                fiber_g: Some(0.8),
                taurine_mg: None,
            },
            reptile: ReptileTargets {
                ca_p_ratio: 1.0,
                calcium_mg: 100.0,
            },
            pocket_pet_vitamin_c_mg_per_kg: 5.0,
            coverage_ceiling: 1.5,
            min_expected_protein_g: 1.0,
            min_expected_fat_g: 0.1,
            min_expected_fiber_g: 0.1,
            min_expected_mg: 1.0,
            deficiency_fraction: 0.4,
            taurine_deficiency_fraction: 0.3,
            vitamin_a_excess_iu: 100_000.0,
            vitamin_d_excess_iu: 20_000.0,
            adequacy_ratio: 0.8,
        }
    }
}

impl CoverageConfig {
    /// Macronutrient targets for a species, if it uses them
    ///
    /// Reptiles and pocket pets are scored on minerals and vitamin C instead.
    #[must_use]
    pub const fn macro_targets(&self, species: &Species) -> Option<&MacroTargets> {
        match species {
            Species::Dog | Species::Other(_) => Some(&self.dog),
            Species::Cat => Some(&self.cat),
            Species::Bird => Some(&self.bird),
            Species::Reptile | Species::PocketPet => None,
        }
    }

    /// Validate coverage configuration
    ///
    /// # Errors
    ///
    /// Returns an error if targets are not positive or fractions lie outside (0, 1]
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite(
            "Coverage targets and thresholds must be finite",
            &[
                self.pocket_pet_vitamin_c_mg_per_kg,
                self.coverage_ceiling,
                self.min_expected_protein_g,
                self.min_expected_fat_g,
                self.min_expected_fiber_g,
                self.min_expected_mg,
                self.deficiency_fraction,
                self.taurine_deficiency_fraction,
                self.vitamin_a_excess_iu,
                self.vitamin_d_excess_iu,
                self.adequacy_ratio,
                self.reptile.ca_p_ratio,
                self.reptile.calcium_mg,
            ],
        )?;
        for targets in [&self.dog, &self.cat, &self.bird] {
            ensure_finite(
                "Macronutrient targets must be finite",
                &[
                    targets.protein_g,
                    targets.fat_g,
                    targets.fiber_g.unwrap_or(0.0),
                    targets.taurine_mg.unwrap_or(0.0),
                ],
            )?;
            if targets.protein_g <= 0.0 || targets.fat_g <= 0.0 {
                return Err(ConfigError::ValueOutOfRange(
                    "Protein and fat targets must be positive",
                ));
            }
        }
        if self.reptile.ca_p_ratio <= 0.0 || self.pocket_pet_vitamin_c_mg_per_kg <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "Ca:P and vitamin C targets must be positive",
            ));
        }
        if self.vitamin_a_excess_iu <= 0.0 || self.vitamin_d_excess_iu <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "Vitamin excess thresholds must be positive",
            ));
        }
        if self.coverage_ceiling < 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "coverage_ceiling must be at least 1.0",
            ));
        }
        if [
            self.min_expected_protein_g,
            self.min_expected_fat_g,
            self.min_expected_fiber_g,
            self.min_expected_mg,
        ]
        .iter()
        .any(|floor| *floor <= 0.0)
        {
            return Err(ConfigError::ValueOutOfRange(
                "Expected amount floors must be positive",
            ));
        }
        for fraction in [
            self.deficiency_fraction,
            self.taurine_deficiency_fraction,
            self.adequacy_ratio,
        ] {
            if fraction <= 0.0 || fraction > 1.0 {
                return Err(ConfigError::InvalidRange(
                    "Deficiency and adequacy fractions must be in (0, 1]",
                ));
            }
        }
        Ok(())
    }
}
