// ABOUTME: Core data models for pets, ingredients, and meal analysis results
// ABOUTME: Re-exports all model types for convenient access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

/// Meal analysis output models
pub mod analysis;
/// Ingredient selection and composition models
pub mod ingredient;
/// Pet profile and species models
pub mod pet;

pub use analysis::{
    Confidence, LegacyScoreBreakdown, MealAnalysis, ScoreBreakdown, Suggestion, SuggestionAction,
    WarningItem,
};
pub use ingredient::{CompatibilityLevel, IngredientComposition, IngredientSelection, Severity};
pub use pet::{ActivityLevel, PetProfile, Species};
