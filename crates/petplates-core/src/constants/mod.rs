// ABOUTME: Application constants for nutrient keys, unit conversions, and cache defaults
// ABOUTME: Shared by the analysis engine and host-side tooling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

/// Analysis cache capacity and TTL defaults
pub mod cache;

/// Output keys used in aggregated nutrient totals
///
/// Composition tables use camelCase field names (`calcium`, `vitaminA`); the
/// aggregated totals use unit-suffixed keys so consumers never guess units.
pub mod nutrients {
    /// Protein in grams
    pub const PROTEIN_G: &str = "protein_g";
    /// Fat in grams
    pub const FAT_G: &str = "fat_g";
    /// Calcium in milligrams
    pub const CALCIUM_MG: &str = "ca_mg";
    /// Phosphorus in milligrams
    pub const PHOSPHORUS_MG: &str = "p_mg";
    /// Moisture in grams
    pub const MOISTURE_G: &str = "moisture_g";
    /// Energy in kilocalories
    pub const CALORIES_KCAL: &str = "calories_kcal";
    /// Alternate energy key accepted from pass-through data
    pub const ENERGY_KCAL: &str = "energy_kcal";
    /// Omega-3 (EPA + DHA) in grams
    pub const OMEGA3_G: &str = "omega3_g";
    /// Vitamin A in international units
    pub const VITAMIN_A_IU: &str = "vit_a_IU";
    /// Vitamin C in milligrams
    pub const VITAMIN_C_MG: &str = "vit_c_mg";
    /// Vitamin D in international units
    pub const VITAMIN_D_IU: &str = "vit_d_IU";
    /// Taurine in milligrams
    pub const TAURINE_MG: &str = "taurine_mg";
    /// Fiber in grams
    pub const FIBER_G: &str = "fiber_g";
    /// Carbohydrates in grams
    pub const CARBS_G: &str = "carbs_g";

    /// Raw composition field name → aggregated output key
    pub const FIELD_RENAMES: &[(&str, &str)] = &[
        ("protein", PROTEIN_G),
        ("fat", FAT_G),
        ("calcium", CALCIUM_MG),
        ("phosphorus", PHOSPHORUS_MG),
        ("moisture", MOISTURE_G),
        ("kcal", CALORIES_KCAL),
        ("omega3", OMEGA3_G),
        ("vitaminA", VITAMIN_A_IU),
        ("vitaminC", VITAMIN_C_MG),
        ("vitaminD", VITAMIN_D_IU),
        ("taurine", TAURINE_MG),
        ("fiber", FIBER_G),
        ("carbs", CARBS_G),
    ];

    /// Map a raw composition field name to its output key
    ///
    /// Unrecognized fields pass through unchanged.
    #[must_use]
    pub fn output_key(field: &str) -> &str {
        FIELD_RENAMES
            .iter()
            .find(|(raw, _)| *raw == field)
            .map_or(field, |(_, mapped)| *mapped)
    }
}

/// Unit conversion constants
pub mod units {
    /// Composition values are expressed per this many grams
    pub const GRAMS_PER_COMPOSITION_UNIT: f64 = 100.0;

    /// Elemental calcium delivered by one gram of calcium carbonate (mg)
    pub const CALCIUM_MG_PER_GRAM_CACO3: f64 = 400.0;
}

/// Species keys used in composition compatibility and inclusion maps
pub mod species {
    /// Dogs
    pub const DOG: &str = "dog";
    /// Cats
    pub const CAT: &str = "cat";
    /// Birds (parrots, finches, budgies)
    pub const BIRD: &str = "bird";
    /// Reptiles (bearded dragons, geckos, tortoises)
    pub const REPTILE: &str = "reptile";
    /// Pocket pets (rabbits, guinea pigs, hamsters)
    pub const POCKET_PET: &str = "pocket-pet";
    /// Token in legacy `toxicFor` lists meaning every species
    pub const ALL: &str = "all";
}

/// Fixed user-facing messages
pub mod messages {
    /// Legacy deficiency entry for an empty recipe
    pub const NO_INGREDIENTS_SELECTED: &str = "No ingredients selected";
    /// Legacy adequacy entry when protein and fat coverage look fine
    pub const PROTEIN_FAT_ADEQUATE: &str = "Protein and fat levels look adequate";
}
