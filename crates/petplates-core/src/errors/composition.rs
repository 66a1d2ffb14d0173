// ABOUTME: Boundary validation errors for externally supplied ingredient composition data
// ABOUTME: Rejects malformed nutrient tables before they reach the pure scoring engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

use thiserror::Error;

/// Errors raised while loading or validating a composition table
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompositionError {
    /// The table source could not be parsed
    #[error("Composition table is not valid JSON: {0}")]
    Malformed(String),

    /// A nutrient value is negative, NaN, or infinite
    #[error("Ingredient '{key}': nutrient '{field}' must be a finite value >= 0 (got {value})")]
    InvalidNutrient {
        /// Composition key of the offending entry
        key: String,
        /// Field name as it appears in the source data
        field: String,
        /// Rejected value
        value: f64,
    },

    /// A max-inclusion fraction lies outside (0, 1]
    #[error("Ingredient '{key}': max inclusion for '{species}' must be in (0, 1] (got {value})")]
    InvalidInclusion {
        /// Composition key of the offending entry
        key: String,
        /// Species key the limit applies to
        species: String,
        /// Rejected fraction
        value: f64,
    },

    /// An entry has an empty key
    #[error("Composition table contains an entry with an empty key")]
    EmptyKey,
}

impl CompositionError {
    /// Create an invalid-nutrient error
    #[must_use]
    pub fn invalid_nutrient(key: impl Into<String>, field: impl Into<String>, value: f64) -> Self {
        Self::InvalidNutrient {
            key: key.into(),
            field: field.into(),
            value,
        }
    }

    /// Create an invalid-inclusion error
    #[must_use]
    pub fn invalid_inclusion(key: impl Into<String>, species: impl Into<String>, value: f64) -> Self {
        Self::InvalidInclusion {
            key: key.into(),
            species: species.into(),
            value,
        }
    }
}

impl From<serde_json::Error> for CompositionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}
