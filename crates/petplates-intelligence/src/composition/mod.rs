// ABOUTME: Read-only composition table, lookup contract, and the ingredient fallback chain
// ABOUTME: Built-in USDA table, validated JSON loading, aliases, and display names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

//! # Composition Lookup
//!
//! The engine only needs lookup by key and by name over per-100 g data, so any
//! source that implements [`CompositionSource`] can stand in for the built-in
//! table. Lookups never fail: [`IngredientResolver`] walks
//! exact key → slug → name → alias and finally hands back a zero-valued
//! placeholder, recording the miss.

/// Configurable synonym table
pub mod aliases;
/// Human-readable ingredient names
pub mod display;

pub use aliases::AliasMap;
pub use display::{DisplayNameResolver, MappedDisplayNames, TitleCaseDisplayNames};

use petplates_core::errors::CompositionError;
use petplates_core::models::IngredientComposition;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;
use tracing::{error, warn};

/// Embedded USDA per-100 g data for the ingredients the web app offers
const BUILTIN_COMPOSITIONS_JSON: &str = include_str!("../../data/compositions.json");

static BUILTIN_TABLE: LazyLock<CompositionTable> = LazyLock::new(|| {
    CompositionTable::from_json_str(BUILTIN_COMPOSITIONS_JSON).unwrap_or_else(|e| {
        error!("Built-in composition table failed validation: {e}");
        CompositionTable::default()
    })
});

/// Composition returned for keys nothing resolves
static PLACEHOLDER: IngredientComposition = IngredientComposition::empty();

/// Lookup contract the engine needs from a composition data source
pub trait CompositionSource: Send + Sync {
    /// Composition stored under exactly this key
    fn by_key(&self, key: &str) -> Option<&IngredientComposition>;

    /// Composition whose name matches case-insensitively, with its key
    fn by_name(&self, name: &str) -> Option<(&str, &IngredientComposition)>;
}

/// In-memory composition table keyed by ingredient key
#[derive(Debug, Clone, Default)]
pub struct CompositionTable {
    entries: BTreeMap<String, IngredientComposition>,
    names: HashMap<String, String>,
}

impl CompositionTable {
    /// Shared built-in table
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN_TABLE
    }

    /// Load and validate a table from a JSON object keyed by ingredient key
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or any entry fails validation
    pub fn from_json_str(json: &str) -> Result<Self, CompositionError> {
        let entries: BTreeMap<String, IngredientComposition> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// Build a table from already-parsed entries, validating each one
    ///
    /// # Errors
    ///
    /// Returns the first validation failure
    pub fn from_entries<I>(entries: I) -> Result<Self, CompositionError>
    where
        I: IntoIterator<Item = (String, IngredientComposition)>,
    {
        let mut table = Self::default();
        for (key, composition) in entries {
            table.insert(key, composition)?;
        }
        Ok(table)
    }

    /// Add or replace one entry after validating it
    ///
    /// # Errors
    ///
    /// Returns an error if the entry fails validation
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        composition: IngredientComposition,
    ) -> Result<(), CompositionError> {
        let key = key.into();
        composition.validate(&key)?;

        if let Some(name) = &composition.name {
            let lowered = name.trim().to_lowercase();
            if let Some(existing) = self.names.get(&lowered) {
                if existing != &key {
                    warn!("Ingredient name '{name}' is shared by '{existing}' and '{key}'; keeping the first");
                }
            } else {
                self.names.insert(lowered, key.clone());
            }
        }
        self.entries.insert(key, composition);
        Ok(())
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CompositionSource for CompositionTable {
    fn by_key(&self, key: &str) -> Option<&IngredientComposition> {
        self.entries.get(key)
    }

    fn by_name(&self, name: &str) -> Option<(&str, &IngredientComposition)> {
        let key = self.names.get(&name.trim().to_lowercase())?;
        self.entries
            .get_key_value(key)
            .map(|(k, comp)| (k.as_str(), comp))
    }
}

impl<T: CompositionSource + ?Sized> CompositionSource for &T {
    fn by_key(&self, key: &str) -> Option<&IngredientComposition> {
        (**self).by_key(key)
    }

    fn by_name(&self, name: &str) -> Option<(&str, &IngredientComposition)> {
        (**self).by_name(name)
    }
}

/// Which step of the fallback chain produced a composition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStep {
    /// Key matched as given
    Exact,
    /// Slugified key matched
    Slug,
    /// Key matched an ingredient name
    Name,
    /// Key matched an alias
    Alias,
    /// Nothing matched; the placeholder was used
    NotFound,
}

/// Outcome of resolving one selection key
#[derive(Debug, Clone)]
pub struct Resolved<'a> {
    /// Composition key that matched, `None` when not found
    pub matched_key: Option<String>,
    /// Step that matched
    pub step: LookupStep,
    /// Composition data (the zero-valued placeholder when not found)
    pub composition: &'a IngredientComposition,
}

impl Resolved<'_> {
    /// Whether the key fell through to the placeholder
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.step == LookupStep::NotFound
    }
}

/// Lowercase, collapse whitespace runs to `_`, drop anything outside `[a-z0-9_]`
#[must_use]
pub fn slugify(key: &str) -> String {
    let mut slug = String::with_capacity(key.len());
    let mut in_whitespace = false;
    for ch in key.chars().flat_map(char::to_lowercase) {
        if ch.is_whitespace() {
            if !in_whitespace {
                slug.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_' {
            slug.push(ch);
        }
    }
    slug
}

/// Runs the lookup fallback chain over a source and an alias map
#[derive(Clone, Copy)]
pub struct IngredientResolver<'a> {
    source: &'a dyn CompositionSource,
    aliases: &'a AliasMap,
}

impl<'a> IngredientResolver<'a> {
    /// Create a resolver
    #[must_use]
    pub const fn new(source: &'a dyn CompositionSource, aliases: &'a AliasMap) -> Self {
        Self { source, aliases }
    }

    /// Resolve a key; never fails
    #[must_use]
    pub fn resolve(&self, key: &str) -> Resolved<'a> {
        if let Some(composition) = self.source.by_key(key) {
            return Self::found(key, LookupStep::Exact, composition);
        }

        let slug = slugify(key);
        if let Some(composition) = self.source.by_key(&slug) {
            return Self::found(&slug, LookupStep::Slug, composition);
        }

        if let Some((matched, composition)) = self.source.by_name(key) {
            return Self::found(matched, LookupStep::Name, composition);
        }

        let alias_target = self
            .aliases
            .target(&slug)
            .or_else(|| self.aliases.target(&key.to_lowercase()));
        if let Some((target, composition)) =
            alias_target.and_then(|t| self.source.by_key(t).map(|c| (t, c)))
        {
            return Self::found(target, LookupStep::Alias, composition);
        }

        Resolved {
            matched_key: None,
            step: LookupStep::NotFound,
            composition: &PLACEHOLDER,
        }
    }

    fn found(key: &str, step: LookupStep, composition: &'a IngredientComposition) -> Resolved<'a> {
        Resolved {
            matched_key: Some(key.to_owned()),
            step,
            composition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> IngredientResolver<'static> {
        static ALIASES: LazyLock<AliasMap> = LazyLock::new(AliasMap::default);
        IngredientResolver::new(CompositionTable::builtin(), &ALIASES)
    }

    #[test]
    fn test_builtin_table_loads() {
        let table = CompositionTable::builtin();
        assert!(table.len() >= 26);
        let chicken = table.by_key("chicken_breast").unwrap();
        assert_eq!(chicken.calcium, Some(11.0));
        assert_eq!(chicken.phosphorus, Some(196.0));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Chicken Breast"), "chicken_breast");
        assert_eq!(slugify("Sweet  Potato!"), "sweet_potato");
        assert_eq!(slugify("Salmon-Oil"), "salmonoil");
    }

    #[test]
    fn test_fallback_chain_steps() {
        let resolver = resolver();

        let exact = resolver.resolve("kale_raw");
        assert_eq!(exact.step, LookupStep::Exact);

        let slug = resolver.resolve("Chicken Breast");
        assert_eq!(slug.step, LookupStep::Slug);
        assert_eq!(slug.matched_key.as_deref(), Some("chicken_breast"));

        let name = resolver.resolve("Lean Ground Beef");
        assert_eq!(name.step, LookupStep::Name);
        assert_eq!(name.matched_key.as_deref(), Some("ground_beef_lean"));

        let alias = resolver.resolve("Salmon Oil");
        assert_eq!(alias.step, LookupStep::Alias);
        assert_eq!(alias.matched_key.as_deref(), Some("fish_oil"));
    }

    #[test]
    fn test_unknown_key_returns_zero_placeholder() {
        let resolved = resolver().resolve("nonexistent_ingredient");
        assert!(resolved.is_not_found());
        assert_eq!(resolved.matched_key, None);
        assert_eq!(resolved.composition.nutrient_fields().count(), 0);
    }

    #[test]
    fn test_from_json_rejects_negative_values() {
        let err = CompositionTable::from_json_str(r#"{"bad": {"protein": -1}}"#).unwrap_err();
        assert!(matches!(err, CompositionError::InvalidNutrient { .. }));

        let err = CompositionTable::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, CompositionError::Malformed(_)));
    }

    #[test]
    fn test_custom_table_substitutes_for_builtin() {
        let table = CompositionTable::from_json_str(
            r#"{"cricket": {"name": "House Cricket", "protein": 20.5, "calcium": 41}}"#,
        )
        .unwrap();
        let aliases = AliasMap::empty();
        let resolver = IngredientResolver::new(&table, &aliases);

        let resolved = resolver.resolve("house cricket");
        assert_eq!(resolved.step, LookupStep::Name);
        assert!(resolver.resolve("chicken_breast").is_not_found());
    }
}
