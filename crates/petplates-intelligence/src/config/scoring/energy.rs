// ABOUTME: Energy requirement configuration for recommended serving sizes
// ABOUTME: Resting energy coefficients per species, activity multipliers, and meal caps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

//! Energy Requirement Configuration
//!
//! Simplified maintenance energy requirement (MER) approximations:
//! `MER = coefficient x weight_kg^0.75 x activity_factor` for dogs and cats,
//! linear per-kilogram estimates for reptiles and pocket pets.
//!
//! # References
//!
//! - Resting energy requirement `70 x BW^0.75`: NRC (2006) Nutrient Requirements
//!   of Dogs and Cats, National Academies Press
//! - Activity multipliers: WSAVA Global Nutrition Committee guidelines (2011)

use super::ensure_finite;
use super::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Activity multipliers applied to resting energy requirement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityMultipliers {
    /// Mostly resting: 1.3
    pub low: f64,
    /// Typical household pet: 1.6
    pub moderate: f64,
    /// Working or very active: 2.0
    pub high: f64,
}

impl Default for ActivityMultipliers {
    fn default() -> Self {
        Self {
            low: 1.3,
            moderate: 1.6,
            high: 2.0,
        }
    }
}

/// Daily energy and serving-size configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyConfig {
    /// Activity multipliers
    pub activity: ActivityMultipliers,
    /// Weight assumed when the profile has none (kg)
    pub default_weight_kg: f64,
    /// Lower bound on body weight (kg)
    pub min_weight_kg: f64,
    /// Metabolic body weight exponent (0.75)
    pub metabolic_exponent: f64,
    /// Dog RER coefficient (70 kcal/kg^0.75)
    pub dog_rer_coef: f64,
    /// Cat RER coefficient (50 kcal/kg^0.75)
    pub cat_rer_coef: f64,
    /// Coefficient for birds and unknown species (60 kcal/kg^0.75, no activity factor)
    pub default_rer_coef: f64,
    /// Reptile linear estimate (30 kcal/kg)
    pub reptile_kcal_per_kg: f64,
    /// Reptile multiplier when activity is high (1.5)
    pub reptile_high_activity_multiplier: f64,
    /// Pocket pet linear estimate (80 kcal/kg)
    pub pocket_pet_kcal_per_kg: f64,
    /// Meals per day for cats
    pub cat_meals_per_day: u8,
    /// Meals per day for every other species
    pub default_meals_per_day: u8,
    /// Minimum calories per meal before capping (kcal)
    pub min_meal_kcal: f64,
    /// Largest fraction of daily calories one meal may provide (0.5)
    pub max_single_meal_fraction: f64,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            activity: ActivityMultipliers::default(),
            default_weight_kg: 5.0,
            min_weight_kg: 0.1,
            metabolic_exponent: 0.75,
            dog_rer_coef: 70.0,
            cat_rer_coef: 50.0,
            default_rer_coef: 60.0,
            reptile_kcal_per_kg: 30.0,
            reptile_high_activity_multiplier: 1.5,
            pocket_pet_kcal_per_kg: 80.0,
            cat_meals_per_day: 3,
            default_meals_per_day: 2,
            min_meal_kcal: 40.0,
            max_single_meal_fraction: 0.5,
        }
    }
}

impl EnergyConfig {
    /// Validate energy configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any coefficient is not finite, multipliers are not
    /// ascending, meals per day is zero, or the single-meal fraction is outside (0, 1]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.activity;
        ensure_finite(
            "Energy coefficients must be finite",
            &[
                a.low,
                a.moderate,
                a.high,
                self.default_weight_kg,
                self.min_weight_kg,
                self.metabolic_exponent,
                self.dog_rer_coef,
                self.cat_rer_coef,
                self.default_rer_coef,
                self.reptile_kcal_per_kg,
                self.reptile_high_activity_multiplier,
                self.pocket_pet_kcal_per_kg,
                self.min_meal_kcal,
                self.max_single_meal_fraction,
            ],
        )?;
        if a.low < 1.0 || a.high > 3.0 {
            return Err(ConfigError::ValueOutOfRange(
                "Activity multipliers must be between 1.0 and 3.0",
            ));
        }
        if a.low >= a.moderate || a.moderate >= a.high {
            return Err(ConfigError::InvalidRange(
                "Activity multipliers must be in ascending order",
            ));
        }
        if self.min_weight_kg <= 0.0 || self.default_weight_kg < self.min_weight_kg {
            return Err(ConfigError::InvalidRange(
                "min_weight_kg must be positive and <= default_weight_kg",
            ));
        }
        if self.cat_meals_per_day == 0 || self.default_meals_per_day == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "Meals per day must be at least 1",
            ));
        }
        if self.max_single_meal_fraction <= 0.0 || self.max_single_meal_fraction > 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "max_single_meal_fraction must be in (0, 1]",
            ));
        }
        Ok(())
    }
}
