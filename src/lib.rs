// ABOUTME: Main library entry point for the PetPlates host crate
// ABOUTME: Logging setup, input file loading, and analysis memoization around the engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

#![deny(unsafe_code)]

//! # `PetPlates`
//!
//! Host-side tooling around the pure meal analysis engine in
//! `petplates-intelligence`. The engine scores a recipe for a pet; this crate
//! reads inputs from disk, memoizes results, and configures logging for the
//! `petplates-cli` binary.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use petplates::core::models::{IngredientSelection, PetProfile};
//! use petplates::intelligence::generate_analysis;
//!
//! let pet = PetProfile::new("dog", 25.0).with_allergies(["beef"]);
//! let recipe = vec![
//!     IngredientSelection::new("chicken_breast", 200.0),
//!     IngredientSelection::new("brown_rice_cooked", 100.0),
//! ];
//! let analysis = generate_analysis(&pet, &recipe);
//! println!("score {} / serve {} g", analysis.score, analysis.recommended_serving_grams);
//! ```

/// Analysis memoization keyed by a content hash of the inputs
pub mod cache;

/// JSON input loading for pets, recipes, compositions, and aliases
pub mod loader;

/// Structured logging setup
pub mod logging;

/// Re-export of the core data model crate
pub use petplates_core as core;

/// Re-export of the analysis engine crate
pub use petplates_intelligence as intelligence;
