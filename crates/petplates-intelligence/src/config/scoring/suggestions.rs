// ABOUTME: Suggestion generator thresholds for species-specific remediation advice
// ABOUTME: Calcium carbonate dosing, vitamin C daily targets, and vitamin A batch limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

//! Suggestion Threshold Configuration
//!
//! Dosing and trigger levels for the remediation advice attached to an
//! analysis. Pocket pet vitamin C is a daily figure compared against what
//! the recommended serving delivers over a full day of meals.

use super::ensure_finite;
use super::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Thresholds used when generating suggestions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Reptile batches below this Ca:P ratio get a calcium carbonate dose
    pub reptile_desired_ca_p_ratio: f64,
    /// Daily vitamin C recommended for pocket pets (mg per kg body weight)
    pub pocket_pet_vitamin_c_mg_per_kg_day: f64,
    /// Whole-batch vitamin A above which liver rotation is advised (IU)
    pub vitamin_a_batch_iu: f64,
    /// Taurine supplement suggested per 100 g serving (g)
    pub taurine_supplement_g_per_100g: f64,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            reptile_desired_ca_p_ratio: 1.5,
            pocket_pet_vitamin_c_mg_per_kg_day: 10.0,
            vitamin_a_batch_iu: 50_000.0,
            taurine_supplement_g_per_100g: 0.1,
        }
    }
}

impl SuggestionConfig {
    /// Validate suggestion thresholds
    ///
    /// # Errors
    ///
    /// Returns an error if any threshold is not a positive finite number
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite(
            "Suggestion thresholds must be finite",
            &[
                self.reptile_desired_ca_p_ratio,
                self.pocket_pet_vitamin_c_mg_per_kg_day,
                self.vitamin_a_batch_iu,
                self.taurine_supplement_g_per_100g,
            ],
        )?;
        if self.reptile_desired_ca_p_ratio <= 0.0
            || self.pocket_pet_vitamin_c_mg_per_kg_day <= 0.0
            || self.vitamin_a_batch_iu <= 0.0
            || self.taurine_supplement_g_per_100g <= 0.0
        {
            return Err(ConfigError::ValueOutOfRange(
                "Suggestion thresholds must be positive",
            ));
        }
        Ok(())
    }
}
