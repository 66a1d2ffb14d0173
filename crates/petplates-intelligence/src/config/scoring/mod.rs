// ABOUTME: Scoring engine configuration with environment overrides and validation
// ABOUTME: Orchestrates energy, coverage, weight, penalty, and suggestion tunables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

//! Scoring Configuration Module
//!
//! Every tunable used by the meal analysis engine lives here rather than as
//! a literal in the algorithms. The generosity constants (coverage floor,
//! penalty cap, coverage ceiling) are empirically tuned and may need
//! revisiting with product owners.
//!
//! # Module Structure
//!
//! - `energy` - Daily energy requirement and serving size
//! - `coverage` - Species nutrient targets and deficiency thresholds
//! - `weights` - Sub-score weights and safety penalty points
//! - `suggestions` - Remediation thresholds

pub mod coverage;
pub mod energy;
pub mod error;
pub mod suggestions;
pub mod weights;

pub use coverage::{CoverageConfig, MacroTargets, ReptileTargets};
pub use energy::{ActivityMultipliers, EnergyConfig};
pub use error::ConfigError;
pub use suggestions::SuggestionConfig;
pub use weights::{PenaltyConfig, ScoreWeights};

use serde::{Deserialize, Serialize};
use std::env;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static SCORING_CONFIG: OnceLock<ScoringConfig<true>> = OnceLock::new();

/// Main scoring configuration container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig<const VALIDATED: bool = false> {
    /// Energy requirement and serving size
    pub energy: EnergyConfig,
    /// Nutrient coverage targets
    pub coverage: CoverageConfig,
    /// Sub-score weights and coverage floors
    pub weights: ScoreWeights,
    /// Safety penalty model
    pub penalty: PenaltyConfig,
    /// Suggestion thresholds
    pub suggestions: SuggestionConfig,
    #[serde(skip)]
    _phantom: PhantomData<()>,
}

impl ScoringConfig<true> {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        SCORING_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load scoring config: {e}, using defaults");
                Self::default()
            })
        })
    }

    /// Load configuration from defaults and environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns the first validation failure across all sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.energy.validate()?;
        self.coverage.validate()?;
        self.weights.validate()?;
        self.penalty.validate()?;
        self.suggestions.validate()
    }

    /// Apply a single environment variable override
    ///
    /// Parsed values are checked by `validate`; `"NaN"` and `"inf"` parse as
    /// `f64` and are rejected there.
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Score weights
        Self::apply_env_var(
            "PETPLATES_SCORING_COVERAGE_WEIGHT",
            &mut self.weights.coverage_weight,
        )?;
        Self::apply_env_var(
            "PETPLATES_SCORING_BALANCE_WEIGHT",
            &mut self.weights.balance_weight,
        )?;
        Self::apply_env_var(
            "PETPLATES_SCORING_COVERAGE_FLOOR",
            &mut self.weights.resolved_coverage_floor,
        )?;
        Self::apply_env_var(
            "PETPLATES_SCORING_UNRESOLVED_COVERAGE",
            &mut self.weights.unresolved_coverage_score,
        )?;

        // Penalty model
        Self::apply_env_var(
            "PETPLATES_SCORING_PENALTY_SERIOUS",
            &mut self.penalty.serious_points,
        )?;
        Self::apply_env_var(
            "PETPLATES_SCORING_PENALTY_MEDIUM",
            &mut self.penalty.medium_points,
        )?;
        Self::apply_env_var("PETPLATES_SCORING_PENALTY_LOW", &mut self.penalty.low_points)?;
        Self::apply_env_var(
            "PETPLATES_SCORING_PENALTY_ALLERGY",
            &mut self.penalty.allergy_points,
        )?;
        Self::apply_env_var(
            "PETPLATES_SCORING_PENALTY_CAP_FRACTION",
            &mut self.penalty.max_applied_fraction,
        )?;

        // Coverage thresholds
        Self::apply_env_var(
            "PETPLATES_SCORING_COVERAGE_CEILING",
            &mut self.coverage.coverage_ceiling,
        )?;
        Self::apply_env_var(
            "PETPLATES_SCORING_DEFICIENCY_FRACTION",
            &mut self.coverage.deficiency_fraction,
        )?;
        Self::apply_env_var(
            "PETPLATES_SCORING_TAURINE_DEFICIENCY_FRACTION",
            &mut self.coverage.taurine_deficiency_fraction,
        )?;
        Self::apply_env_var(
            "PETPLATES_SCORING_VITAMIN_A_EXCESS_IU",
            &mut self.coverage.vitamin_a_excess_iu,
        )?;
        Self::apply_env_var(
            "PETPLATES_SCORING_VITAMIN_D_EXCESS_IU",
            &mut self.coverage.vitamin_d_excess_iu,
        )?;

        // Energy
        Self::apply_env_var(
            "PETPLATES_SCORING_ACTIVITY_LOW",
            &mut self.energy.activity.low,
        )?;
        Self::apply_env_var(
            "PETPLATES_SCORING_ACTIVITY_MODERATE",
            &mut self.energy.activity.moderate,
        )?;
        Self::apply_env_var(
            "PETPLATES_SCORING_ACTIVITY_HIGH",
            &mut self.energy.activity.high,
        )?;
        Self::apply_env_var(
            "PETPLATES_SCORING_DEFAULT_WEIGHT_KG",
            &mut self.energy.default_weight_kg,
        )?;
        Self::apply_env_var(
            "PETPLATES_SCORING_MAX_MEAL_FRACTION",
            &mut self.energy.max_single_meal_fraction,
        )?;

        // Suggestions
        Self::apply_env_var(
            "PETPLATES_SCORING_VITAMIN_A_BATCH_IU",
            &mut self.suggestions.vitamin_a_batch_iu,
        )?;

        Ok(self)
    }
}

/// Reject NaN and infinities, which slip through every range comparison
fn ensure_finite(message: &'static str, values: &[f64]) -> Result<(), ConfigError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ConfigError::NonFinite(message))
    }
}

impl Default for ScoringConfig<true> {
    fn default() -> Self {
        Self {
            energy: EnergyConfig::default(),
            coverage: CoverageConfig::default(),
            weights: ScoreWeights::default(),
            penalty: PenaltyConfig::default(),
            suggestions: SuggestionConfig::default(),
            _phantom: PhantomData,
        }
    }
}
