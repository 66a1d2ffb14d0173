// ABOUTME: Core types and constants for the PetPlates meal analysis engine
// ABOUTME: Foundation crate with error handling, data models, and nutrient constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

#![deny(unsafe_code)]

//! # `PetPlates` Core
//!
//! Foundation crate providing the shared data model for the `PetPlates` meal
//! analysis engine. It holds no algorithms, so it changes rarely and keeps
//! incremental builds of the engine crate cheap.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and boundary validation errors
//! - **constants**: Nutrient keys, unit conversions, and cache defaults
//! - **models**: Pet profiles, ingredient compositions, and meal analysis results

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`PetProfile`, `IngredientComposition`, `MealAnalysis`, etc.)
pub mod models;
