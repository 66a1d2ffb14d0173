// ABOUTME: Configuration error types for scoring config validation
// ABOUTME: Defines error variants for invalid ranges, weights, non-finite values, and parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

//! Configuration error types for scoring config validation.

use petplates_core::errors::AppError;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Value outside acceptable range (e.g., fraction not between 0-1)
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// NaN or infinite value where a number is required
    #[error("Non-finite value: {0}")]
    NonFinite(&'static str),

    /// Failed to parse configuration value
    #[error("Parse error: {0}")]
    Parse(String),

    /// Weights don't sum to required total
    #[error("Invalid weights: {0}")]
    InvalidWeights(&'static str),

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        Self::config(err.to_string())
    }
}
