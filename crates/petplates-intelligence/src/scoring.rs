// ABOUTME: Score composer combining coverage, balance, and capped safety penalties
// ABOUTME: Produces the final 0-100 compatibility score and its breakdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

//! # Score Composer
//!
//! `base = coverage_weight x coverage + balance_weight x balance`.
//! Raw safety points are capped, then the applied penalty is capped at a
//! fraction of the base so safety findings alone never zero out an
//! otherwise sound recipe.

use crate::config::scoring::{PenaltyConfig, ScoreWeights};
use petplates_core::models::{Severity, WarningItem};

/// Sub-scores and penalty figures behind a final score
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreComponents {
    /// Nutrient coverage (0-100)
    pub coverage_score: f64,
    /// Category balance (0-100)
    pub balance_score: f64,
    /// Weighted base before penalties
    pub base: f64,
    /// Raw penalty points after the raw cap
    pub raw_penalty: f64,
    /// Penalty subtracted from the base
    pub applied_penalty: f64,
    /// Final score
    pub final_score: u8,
}

/// Coverage sub-score
///
/// Unresolvable recipes get the unresolved default instead of 0; once any
/// ingredient resolved, coverage is floored.
#[must_use]
pub fn coverage_score(average: Option<f64>, resolved_count: usize, weights: &ScoreWeights) -> f64 {
    if resolved_count == 0 {
        return weights.unresolved_coverage_score;
    }
    (average.unwrap_or(0.0) * 100.0)
        .round()
        .max(weights.resolved_coverage_floor)
        .min(100.0)
}

/// Balance sub-score from the number of food categories present
#[must_use]
pub fn balance_score(categories: u8, weights: &ScoreWeights) -> f64 {
    if categories >= weights.full_balance_categories {
        100.0
    } else {
        (f64::from(categories) / f64::from(weights.full_balance_categories) * 100.0).round()
    }
}

/// Raw penalty points from toxicity and allergy warnings, capped
#[must_use]
pub fn raw_penalty(
    toxicity: &[WarningItem],
    allergy: &[WarningItem],
    penalty: &PenaltyConfig,
) -> f64 {
    let toxic_points: f64 = toxicity
        .iter()
        .map(|w| match w.severity {
            Severity::Critical | Severity::High => penalty.serious_points,
            Severity::Medium => penalty.medium_points,
            Severity::Low => penalty.low_points,
        })
        .sum();
    #[allow(clippy::cast_precision_loss)]
    let allergy_points = allergy.len() as f64 * penalty.allergy_points;
    (toxic_points + allergy_points).min(penalty.raw_cap)
}

/// Combine sub-scores and penalties into the final score
#[must_use]
pub fn compose_score(
    coverage: f64,
    balance: f64,
    raw_penalty: f64,
    weights: &ScoreWeights,
    penalty: &PenaltyConfig,
) -> ScoreComponents {
    let base = weights.coverage_weight * coverage + weights.balance_weight * balance;
    let applied = (raw_penalty / 100.0 * base).min(base * penalty.max_applied_fraction);
    let score = (base - applied).max(0.0).round().clamp(0.0, 100.0);
    // Safe: clamped to 0-100 above
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let final_score = score as u8;

    ScoreComponents {
        coverage_score: coverage,
        balance_score: balance,
        base,
        raw_penalty,
        applied_penalty: applied,
        final_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning(severity: Severity) -> WarningItem {
        WarningItem::for_recipe("test", "test", severity)
    }

    #[test]
    fn test_unresolved_recipe_gets_default_coverage() {
        let weights = ScoreWeights::default();
        assert!((coverage_score(None, 0, &weights) - 50.0).abs() < f64::EPSILON);
        assert!((coverage_score(Some(0.2), 1, &weights) - 70.0).abs() < f64::EPSILON);
        assert!((coverage_score(Some(1.5), 1, &weights) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_balance_full_at_two_categories() {
        let weights = ScoreWeights::default();
        assert!((balance_score(0, &weights)).abs() < f64::EPSILON);
        assert!((balance_score(1, &weights) - 50.0).abs() < f64::EPSILON);
        assert!((balance_score(2, &weights) - 100.0).abs() < f64::EPSILON);
        assert!((balance_score(4, &weights) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_penalty_points_and_raw_cap() {
        let penalty = PenaltyConfig::default();
        let toxicity = vec![
            warning(Severity::Critical),
            warning(Severity::Medium),
            warning(Severity::Low),
        ];
        assert!((raw_penalty(&toxicity, &[], &penalty) - 50.0).abs() < f64::EPSILON);

        let allergies = vec![warning(Severity::High); 3];
        assert!((raw_penalty(&toxicity, &allergies, &penalty) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_applied_penalty_capped_at_forty_percent_of_base() {
        let components = compose_score(
            100.0,
            100.0,
            100.0,
            &ScoreWeights::default(),
            &PenaltyConfig::default(),
        );
        assert!((components.base - 100.0).abs() < 1e-9);
        assert!((components.applied_penalty - 40.0).abs() < 1e-9);
        assert_eq!(components.final_score, 60);
    }

    #[test]
    fn test_single_unknown_ingredient_scores_forty() {
        let weights = ScoreWeights::default();
        let components = compose_score(
            coverage_score(None, 0, &weights),
            balance_score(0, &weights),
            0.0,
            &weights,
            &PenaltyConfig::default(),
        );
        assert_eq!(components.final_score, 40);
    }
}
