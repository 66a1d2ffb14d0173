// ABOUTME: Unified error handling for PetPlates host code (CLI, loaders, config)
// ABOUTME: Defines ErrorCode, AppError, and AppResult with conversions from domain errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

//! # Unified Error Handling System
//!
//! The meal analysis engine itself never fails: unknown ingredients, malformed
//! selections, and safety violations are all represented as data. Errors only
//! exist at the edges, where external data (composition tables, configuration,
//! JSON input files) enters the system. Those edges report through `AppError`.

/// Composition table validation errors
pub mod composition;

pub use composition::CompositionError;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Input failed validation
    InvalidInput = 3000,
    /// Input could not be parsed
    InvalidFormat = 3002,
    /// A value is outside its permitted range
    ValueOutOfRange = 3003,

    // Resource Management (4000-4999)
    /// Requested resource does not exist
    ResourceNotFound = 4000,

    // Configuration (6000-6999)
    /// Configuration is invalid
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Reading or writing a file failed
    StorageError = 9002,
    /// Serializing or deserializing data failed
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-facing description of this error class
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::InvalidFormat => "The provided input could not be parsed",
            Self::ValueOutOfRange => "A value is outside its permitted range",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ConfigInvalid => "The configuration is invalid",
            Self::StorageError => "A storage operation failed",
            Self::SerializationError => "Data serialization failed",
        }
    }

    /// Process exit code for command-line tools
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidInput | Self::InvalidFormat | Self::ValueOutOfRange => 2,
            Self::ResourceNotFound => 3,
            Self::ConfigInvalid => 4,
            Self::StorageError | Self::SerializationError => 1,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Application error carrying a stable code and a human-readable message
#[derive(Debug, Clone, Error)]
#[error("{code}: {message}")]
pub struct AppError {
    /// Error classification
    pub code: ErrorCode,
    /// Detailed message
    pub message: String,
}

/// Result alias used across host-side code
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a new error with the given code
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Invalid user input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Missing resource
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceNotFound, message)
    }

    /// Invalid configuration
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        Self::new(ErrorCode::StorageError, err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        let code = if err.is_syntax() || err.is_data() || err.is_eof() {
            ErrorCode::InvalidFormat
        } else {
            ErrorCode::SerializationError
        };
        Self::new(code, err.to_string())
    }
}

impl From<CompositionError> for AppError {
    fn from(err: CompositionError) -> Self {
        let code = match err {
            CompositionError::Malformed(_) => ErrorCode::InvalidFormat,
            CompositionError::InvalidNutrient { .. } | CompositionError::InvalidInclusion { .. } => {
                ErrorCode::ValueOutOfRange
            }
            CompositionError::EmptyKey => ErrorCode::InvalidInput,
        };
        Self::new(code, err.to_string())
    }
}
