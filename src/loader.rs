// ABOUTME: Boundary loading of pets, recipes, composition tables, and alias maps from JSON files
// ABOUTME: Malformed external data is rejected here with AppError before reaching the engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

use petplates_core::errors::{AppError, AppResult};
use petplates_core::models::{IngredientSelection, PetProfile};
use petplates_intelligence::{AliasMap, AnalysisRequest, CompositionTable};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// A recipe file: either a bare selection array or an object with `selections`
#[derive(Deserialize)]
#[serde(untagged)]
enum RecipeFile {
    Bare(Vec<IngredientSelection>),
    Wrapped { selections: Vec<IngredientSelection> },
}

fn read_to_string(path: &Path) -> AppResult<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            AppError::not_found(format!("File not found: {}", path.display()))
        } else {
            AppError::from(e)
        }
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let raw = read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|e| {
        let err = AppError::from(e);
        AppError::new(err.code, format!("{}: {}", path.display(), err.message))
    })
}

/// Load a pet profile
///
/// # Errors
///
/// Returns an error if the file is missing or is not a valid profile
pub fn load_pet(path: &Path) -> AppResult<PetProfile> {
    let pet: PetProfile = read_json(path)?;
    if pet.species.trim().is_empty() {
        return Err(AppError::invalid_input(format!(
            "{}: species must not be empty",
            path.display()
        )));
    }
    Ok(pet)
}

/// Load a recipe
///
/// # Errors
///
/// Returns an error if the file is missing or is not a selection list
pub fn load_recipe(path: &Path) -> AppResult<Vec<IngredientSelection>> {
    let selections = match read_json(path)? {
        RecipeFile::Bare(selections) | RecipeFile::Wrapped { selections } => selections,
    };
    debug!(path = %path.display(), selections = selections.len(), "Loaded recipe");
    Ok(selections)
}

/// Load a batch of analysis requests
///
/// # Errors
///
/// Returns an error if the file is missing or malformed
pub fn load_requests(path: &Path) -> AppResult<Vec<AnalysisRequest>> {
    read_json(path)
}

/// Load and validate a composition table
///
/// # Errors
///
/// Returns an error if the file is missing, malformed, or any entry fails validation
pub fn load_compositions(path: &Path) -> AppResult<CompositionTable> {
    let raw = read_to_string(path)?;
    let table = CompositionTable::from_json_str(&raw).map_err(|e| {
        let err = AppError::from(e);
        AppError::new(err.code, format!("{}: {}", path.display(), err.message))
    })?;
    debug!(path = %path.display(), entries = table.len(), "Loaded composition table");
    Ok(table)
}

/// Load an alias map, layered over the defaults
///
/// # Errors
///
/// Returns an error if the file is missing or is not a string-to-string object
pub fn load_aliases(path: &Path) -> AppResult<AliasMap> {
    let extra: AliasMap = read_json(path)?;
    Ok(AliasMap::default().merged(extra))
}
