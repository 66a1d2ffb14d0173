// ABOUTME: Pet profile models with free-text species normalization
// ABOUTME: PetProfile, Species, and ActivityLevel definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

use crate::constants::species;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized species family used by every species-specific rule
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Species {
    /// Dogs
    Dog,
    /// Cats
    Cat,
    /// Birds (parrots, finches, budgies)
    Bird,
    /// Reptiles (bearded dragons, geckos, tortoises)
    Reptile,
    /// Pocket pets (rabbits, guinea pigs, hamsters, gerbils)
    PocketPet,
    /// Unrecognized species, kept as the lowercased input
    Other(String),
}

impl Species {
    /// Normalize a free-text species string by substring detection
    ///
    /// Plural and descriptive forms work ("dogs", "Bearded Dragon",
    /// "guinea pig"). Unmatched input becomes `Species::Other` and simply
    /// fails to match species-specific rules.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let s = raw.trim().to_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|n| s.contains(n));

        if has(&["dog", "puppy"]) {
            Self::Dog
        } else if has(&["cat", "kitten"]) {
            Self::Cat
        } else if has(&["bird", "parrot", "finch", "budgie", "cockatiel", "parakeet"]) {
            Self::Bird
        } else if has(&[
            "reptile", "lizard", "bearded", "dragon", "gecko", "tortoise", "turtle",
        ]) {
            Self::Reptile
        } else if has(&["pocket", "rabbit", "guinea", "hamster", "gerbil", "chinchilla"]) {
            Self::PocketPet
        } else {
            Self::Other(s)
        }
    }

    /// Key used in composition compatibility and inclusion maps
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Dog => species::DOG,
            Self::Cat => species::CAT,
            Self::Bird => species::BIRD,
            Self::Reptile => species::REPTILE,
            Self::PocketPet => species::POCKET_PET,
            Self::Other(raw) => raw,
        }
    }

    /// Whether this is one of the recognized species families
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other(_) => f.write_str("unknown"),
            known => f.write_str(known.key()),
        }
    }
}

impl Serialize for Species {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for Species {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::normalize(&raw))
    }
}

/// Activity level used to scale resting energy requirements
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Mostly resting
    Low,
    /// Typical household pet
    #[default]
    Moderate,
    /// Working or very active animal
    High,
}

impl ActivityLevel {
    /// Parse activity level from string, defaulting to moderate
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "low" => Self::Low,
            "high" => Self::High,
            _ => Self::Moderate,
        }
    }
}

/// Pet the meal is analyzed for
///
/// Immutable input: the engine never modifies a profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetProfile {
    /// Optional caller-side identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Optional pet name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-text species as entered by the owner (e.g. "dogs", "Bearded Dragon")
    pub species: String,
    /// Free-form life stage (e.g. "adult", "juvenile", "pregnant")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub life_stage: Option<String>,
    /// Body weight in kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Allergy terms, matched case-insensitively as substrings
    #[serde(default)]
    pub allergies: Vec<String>,
    /// Activity level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<ActivityLevel>,
}

impl PetProfile {
    /// Create a profile with only a species and weight
    #[must_use]
    pub fn new(species: impl Into<String>, weight_kg: f64) -> Self {
        Self {
            species: species.into(),
            weight_kg: Some(weight_kg),
            ..Self::default()
        }
    }

    /// Add allergy terms
    #[must_use]
    pub fn with_allergies<I, S>(mut self, allergies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allergies = allergies.into_iter().map(Into::into).collect();
        self
    }

    /// Set the activity level
    #[must_use]
    pub const fn with_activity(mut self, activity: ActivityLevel) -> Self {
        self.activity = Some(activity);
        self
    }

    /// Normalized species family
    #[must_use]
    pub fn normalized_species(&self) -> Species {
        Species::normalize(&self.species)
    }

    /// Activity level, defaulting to moderate
    #[must_use]
    pub fn activity_level(&self) -> ActivityLevel {
        self.activity.unwrap_or_default()
    }

    /// Lowercased, trimmed, non-empty allergy terms
    #[must_use]
    pub fn allergy_terms(&self) -> Vec<String> {
        self.allergies
            .iter()
            .map(|a| a.trim().to_lowercase())
            .filter(|a| !a.is_empty())
            .collect()
    }
}
