// ABOUTME: Configurable synonym table mapping missing ingredient keys to close substitutes
// ABOUTME: Default aliases cover common oils, ground meats, rice, and pumpkin
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default substitutions for ingredients without their own composition data
const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("salmon_oil", "fish_oil"),
    ("herring_oil", "fish_oil"),
    ("mackerel_oil", "fish_oil"),
    ("sardine_oil", "fish_oil"),
    ("cod_liver_oil", "fish_oil"),
    ("olive_oil", "fish_oil"),
    ("coconut_oil", "fish_oil"),
    ("avocado_oil", "fish_oil"),
    ("ground_chicken", "chicken_breast"),
    ("ground_turkey", "turkey_breast"),
    ("ground_beef", "ground_beef_lean"),
    ("white_rice", "brown_rice_cooked"),
    ("pumpkin_puree", "sweet_potato"),
];

/// Alias key → composition key substitutions used as the last lookup step
///
/// Aliases only apply when the key is not in the table under its own name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasMap {
    entries: HashMap<String, String>,
}

impl Default for AliasMap {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_ALIASES.iter().copied())
    }
}

impl AliasMap {
    /// An alias map with no entries
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Build from (alias, target) pairs
    #[must_use]
    pub fn from_pairs<I, A, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, T)>,
        A: Into<String>,
        T: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(alias, target)| (alias.into().to_lowercase(), target.into()))
                .collect(),
        }
    }

    /// Add or replace one alias
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>, target: impl Into<String>) -> Self {
        self.entries
            .insert(alias.into().to_lowercase(), target.into());
        self
    }

    /// Layer another map over this one; its entries win on conflict
    #[must_use]
    pub fn merged(mut self, other: Self) -> Self {
        self.entries.extend(other.entries);
        self
    }

    /// Composition key an alias points to
    #[must_use]
    pub fn target(&self, alias: &str) -> Option<&str> {
        self.entries.get(alias).map(String::as_str)
    }

    /// Number of aliases
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no aliases
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
