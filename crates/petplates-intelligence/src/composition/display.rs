// ABOUTME: Display name resolution for ingredient keys shown in warnings and suggestions
// ABOUTME: Title-case fallback plus an explicit key-to-name overlay
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

use std::collections::HashMap;

/// Maps a selection key to the human-readable name used in user-facing text
///
/// Messages must name the ingredient the owner picked ("bok choy"), never the
/// internal composition key it resolved to (`kale_raw`).
pub trait DisplayNameResolver: Send + Sync {
    /// Human-readable name for a selection key
    fn display_name(&self, key: &str) -> String;
}

/// Converts `chicken_breast` into `Chicken Breast`
///
/// Free-text names without underscores keep their spacing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleCaseDisplayNames;

impl DisplayNameResolver for TitleCaseDisplayNames {
    fn display_name(&self, key: &str) -> String {
        key.split('_')
            .map(|word| {
                let mut chars = word.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars).collect()
                })
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Explicit key → name overrides on top of title casing
#[derive(Debug, Clone, Default)]
pub struct MappedDisplayNames {
    names: HashMap<String, String>,
}

impl MappedDisplayNames {
    /// Build from (key, display name) pairs
    #[must_use]
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            names: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl DisplayNameResolver for MappedDisplayNames {
    fn display_name(&self, key: &str) -> String {
        self.names
            .get(key)
            .cloned()
            .unwrap_or_else(|| TitleCaseDisplayNames.display_name(key))
    }
}
