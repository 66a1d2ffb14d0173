// ABOUTME: Score composition weights and safety penalty configuration
// ABOUTME: Coverage/balance weighting, generosity floors, and capped penalty points
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

//! Score Weight and Penalty Configuration
//!
//! `base = coverage_weight x coverage + balance_weight x balance`, after which
//! safety points are converted to a penalty that can remove at most
//! `max_applied_fraction` of the base.

use super::ensure_finite;
use super::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Weighting of the sub-scores that form the base score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Weight of nutrient coverage (0.8)
    pub coverage_weight: f64,
    /// Weight of category balance (0.2)
    pub balance_weight: f64,
    /// Coverage score when nothing resolved from the composition table
    pub unresolved_coverage_score: f64,
    /// Coverage floor once at least one ingredient resolved
    pub resolved_coverage_floor: f64,
    /// Categories needed for a full balance score
    pub full_balance_categories: u8,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            coverage_weight: 0.8,
            balance_weight: 0.2,
            unresolved_coverage_score: 50.0,
            resolved_coverage_floor: 70.0,
            full_balance_categories: 2,
        }
    }
}

/// Raw penalty points per safety finding and the caps applied to them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenaltyConfig {
    /// Points per critical or high toxicity warning
    pub serious_points: f64,
    /// Points per medium toxicity warning
    pub medium_points: f64,
    /// Points per low toxicity warning
    pub low_points: f64,
    /// Points per allergy match
    pub allergy_points: f64,
    /// Cap on accumulated raw points
    pub raw_cap: f64,
    /// Largest fraction of the base score the penalty may remove
    pub max_applied_fraction: f64,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self {
            serious_points: 30.0,
            medium_points: 15.0,
            low_points: 5.0,
            allergy_points: 40.0,
            raw_cap: 100.0,
            max_applied_fraction: 0.4,
        }
    }
}

impl ScoreWeights {
    /// Validate score weights
    ///
    /// # Errors
    ///
    /// Returns an error if weights are not finite, do not sum to 1.0, or floors exceed 100
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite(
            "Score weights and coverage floors must be finite",
            &[
                self.coverage_weight,
                self.balance_weight,
                self.unresolved_coverage_score,
                self.resolved_coverage_floor,
            ],
        )?;
        if self.coverage_weight < 0.0 || self.balance_weight < 0.0 {
            return Err(ConfigError::InvalidWeights("Score weights must be >= 0"));
        }
        if (self.coverage_weight + self.balance_weight - 1.0).abs() > 0.01 {
            return Err(ConfigError::InvalidWeights(
                "coverage_weight + balance_weight must sum to 1.0",
            ));
        }
        if !(0.0..=100.0).contains(&self.unresolved_coverage_score)
            || !(0.0..=100.0).contains(&self.resolved_coverage_floor)
        {
            return Err(ConfigError::ValueOutOfRange(
                "Coverage floors must be between 0 and 100",
            ));
        }
        if self.full_balance_categories == 0 || self.full_balance_categories > 4 {
            return Err(ConfigError::ValueOutOfRange(
                "full_balance_categories must be between 1 and 4",
            ));
        }
        Ok(())
    }
}

impl PenaltyConfig {
    /// Validate penalty configuration
    ///
    /// # Errors
    ///
    /// Returns an error if points are negative or not finite, or the applied
    /// fraction is outside [0, 1]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let points = [
            self.serious_points,
            self.medium_points,
            self.low_points,
            self.allergy_points,
            self.raw_cap,
        ];
        ensure_finite("Penalty points must be finite", &points)?;
        ensure_finite(
            "max_applied_fraction must be finite",
            &[self.max_applied_fraction],
        )?;
        if points.iter().any(|p| *p < 0.0) {
            return Err(ConfigError::ValueOutOfRange("Penalty points must be >= 0"));
        }
        if !(0.0..=1.0).contains(&self.max_applied_fraction) {
            return Err(ConfigError::InvalidRange(
                "max_applied_fraction must be between 0 and 1",
            ));
        }
        Ok(())
    }
}
