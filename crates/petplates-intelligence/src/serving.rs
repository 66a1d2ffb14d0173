// ABOUTME: Daily energy target and recommended per-meal serving size calculation
// ABOUTME: Species RER approximations scaled by activity, meal floors, and a single-meal cap
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

use crate::config::scoring::EnergyConfig;
use petplates_core::models::{ActivityLevel, PetProfile, Species};

/// Body weight used for energy and vitamin C targets (kg)
#[must_use]
pub fn effective_weight_kg(pet: &PetProfile, config: &EnergyConfig) -> f64 {
    pet.weight_kg
        .filter(|w| w.is_finite())
        .unwrap_or(config.default_weight_kg)
        .max(config.min_weight_kg)
}

/// Estimated daily energy requirement in whole kcal
///
/// Dogs and cats use `coef x weight^0.75 x activity`; reptiles and pocket
/// pets use linear per-kg estimates; birds and unknown species use the
/// default coefficient without an activity factor.
#[must_use]
pub fn daily_kcal_target(pet: &PetProfile, species: &Species, config: &EnergyConfig) -> f64 {
    let weight = effective_weight_kg(pet, config);
    let activity = pet.activity_level();
    let factor = match activity {
        ActivityLevel::Low => config.activity.low,
        ActivityLevel::Moderate => config.activity.moderate,
        ActivityLevel::High => config.activity.high,
    };
    let metabolic_weight = weight.powf(config.metabolic_exponent);

    let kcal = match species {
        Species::Dog => config.dog_rer_coef * metabolic_weight * factor,
        Species::Cat => config.cat_rer_coef * metabolic_weight * factor,
        Species::Reptile => {
            let multiplier = if activity == ActivityLevel::High {
                config.reptile_high_activity_multiplier
            } else {
                1.0
            };
            config.reptile_kcal_per_kg * weight * multiplier
        }
        Species::PocketPet => config.pocket_pet_kcal_per_kg * weight,
        Species::Bird | Species::Other(_) => config.default_rer_coef * metabolic_weight,
    };
    kcal.round()
}

/// Meals fed per day; cats get an extra one
#[must_use]
pub fn meals_per_day(species: &Species, config: &EnergyConfig) -> u8 {
    if *species == Species::Cat {
        config.cat_meals_per_day
    } else {
        config.default_meals_per_day
    }
}

/// Recommended grams per meal, or 0 when the recipe has no energy
///
/// The per-meal target is floored at `min_meal_kcal`, then capped so a
/// single serving never exceeds `max_single_meal_fraction` of daily calories.
#[must_use]
pub fn recommended_serving_grams(
    kcal_total: f64,
    total_grams: f64,
    pet: &PetProfile,
    species: &Species,
    config: &EnergyConfig,
) -> f64 {
    if kcal_total <= 0.0 || total_grams <= 0.0 {
        return 0.0;
    }

    let kcal_per_gram = kcal_total / total_grams;
    let daily_kcal = daily_kcal_target(pet, species, config);
    let meal_kcal = (daily_kcal / f64::from(meals_per_day(species, config)))
        .round()
        .max(config.min_meal_kcal);
    let serving = (meal_kcal / kcal_per_gram).round();

    let max_meal_kcal = daily_kcal * config.max_single_meal_fraction;
    if serving * kcal_per_gram > max_meal_kcal {
        return (max_meal_kcal / kcal_per_gram).round().max(0.0);
    }
    serving.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn energy() -> EnergyConfig {
        EnergyConfig::default()
    }

    #[test]
    fn test_dog_daily_kcal() {
        // 70 * 25^0.75 * 1.6 = 70 * 11.1803 * 1.6 = 1252.2
        let pet = PetProfile::new("dog", 25.0);
        let kcal = daily_kcal_target(&pet, &Species::Dog, &energy());
        assert!((kcal - 1252.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reptile_high_activity_multiplier() {
        let pet = PetProfile::new("bearded dragon", 0.5).with_activity(ActivityLevel::High);
        let kcal = daily_kcal_target(&pet, &Species::Reptile, &energy());
        // 30 * 0.5 * 1.5 = 22.5 -> 23
        assert!((kcal - 23.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_weight_defaults_and_floors() {
        let config = energy();
        let mut pet = PetProfile::new("rabbit", 0.0);
        pet.weight_kg = None;
        assert!((effective_weight_kg(&pet, &config) - 5.0).abs() < f64::EPSILON);

        pet.weight_kg = Some(0.01);
        assert!((effective_weight_kg(&pet, &config) - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_serving_zero_without_energy() {
        let pet = PetProfile::new("dog", 25.0);
        assert!(
            recommended_serving_grams(0.0, 100.0, &pet, &Species::Dog, &energy()).abs()
                < f64::EPSILON
        );
    }

    #[test]
    fn test_dog_serving_is_half_daily() {
        // 1252 kcal/day, two meals of 626 kcal at 1.65 kcal/g -> 379 g
        let pet = PetProfile::new("dog", 25.0);
        let grams = recommended_serving_grams(165.0, 100.0, &pet, &Species::Dog, &energy());
        assert!((grams - 379.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_meal_floor_is_capped_by_daily_fraction() {
        // Daily 8 kcal: the 40 kcal meal floor exceeds half of daily
        let pet = PetProfile::new("hamster", 0.1);
        let species = Species::PocketPet;
        let config = energy();
        let daily = daily_kcal_target(&pet, &species, &config);
        let grams = recommended_serving_grams(100.0, 100.0, &pet, &species, &config);
        assert!(grams <= (daily * 0.5).round());
    }
}
