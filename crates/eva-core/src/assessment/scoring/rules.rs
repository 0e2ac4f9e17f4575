use std::collections::BTreeMap;

use super::super::domain::{AnswerMap, ChoiceKey, Dimension, Question, QuestionId};
use super::config::ScoringConfig;
use super::DimensionProfile;

/// Running totals collected in the single pass over the bank.
pub(crate) struct Aggregates {
    pub weighted_earned: f64,
    pub weighted_max: f64,
    pub dimensions: DimensionProfile,
    pub picked: BTreeMap<QuestionId, ChoiceKey>,
}

/// Curved alignment for a choice: `(curved ∈ [0,1], curved points ∈ [1,4])`.
pub(crate) fn curve(choice: ChoiceKey, gamma: f64) -> (f64, f64) {
    let curved = choice.unit().powf(gamma);
    (curved, 1.0 + 3.0 * curved)
}

pub(crate) fn aggregate(
    questions: &[Question],
    answers: &AnswerMap,
    config: &ScoringConfig,
) -> Aggregates {
    let mut weighted_earned = 0.0;
    let mut weighted_max = 0.0;
    let mut dim_earned: BTreeMap<Dimension, f64> = BTreeMap::new();
    let mut dim_max: BTreeMap<Dimension, f64> = BTreeMap::new();
    let mut picked = BTreeMap::new();

    for question in questions {
        let weight = config.effective_weight(question);
        // Unanswered questions still count toward the maximum.
        weighted_max += 4.0 * weight;

        let Some(choice) = answers.get(question.id) else {
            continue;
        };
        picked.insert(question.id, choice);

        let (curved, curved_points) = curve(choice, config.curve_gamma);
        weighted_earned += curved_points * weight;

        for dimension in config.dimensions_for(question.id) {
            *dim_earned.entry(*dimension).or_insert(0.0) += curved * weight;
            *dim_max.entry(*dimension).or_insert(0.0) += weight;
        }
    }

    let scores = dim_max
        .into_iter()
        .map(|(dimension, max)| {
            let earned = dim_earned.get(&dimension).copied().unwrap_or(0.0);
            let score = if max == 0.0 { 0.0 } else { earned / max };
            (dimension, score)
        })
        .collect();

    Aggregates {
        weighted_earned,
        weighted_max,
        dimensions: DimensionProfile::new(scores),
        picked,
    }
}

/// Headline index on 0..100, rounded to one decimal.
pub(crate) fn index_from(weighted_earned: f64, weighted_max: f64) -> f64 {
    if weighted_max == 0.0 {
        return 0.0;
    }
    round1(100.0 * weighted_earned / weighted_max)
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
