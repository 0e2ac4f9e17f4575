mod config;
mod flags;
mod policy;
mod rules;

pub use config::{ClassificationBand, ClassificationTable, PercentileCurve, ScoringConfig};
pub use flags::{AnomalyRule, AnswerCondition, ContradictionRule, FlagRules, SingleAnswerRule};
pub use policy::{classify, percentile_for};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{AnswerMap, AssessmentResult, Dimension, Question};

/// Stateless scorer applying a [`ScoringConfig`] to a bank and an answer map.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn reference() -> Self {
        Self::new(ScoringConfig::reference())
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, questions: &[Question], answers: &AnswerMap) -> AssessmentResult {
        self.score_detailed(questions, answers).result
    }

    /// Score and keep the intermediate totals for diagnostics.
    pub fn score_detailed(&self, questions: &[Question], answers: &AnswerMap) -> ScoreBreakdown {
        let aggregates = rules::aggregate(questions, answers, &self.config);

        let index = rules::index_from(aggregates.weighted_earned, aggregates.weighted_max);
        let percentile = percentile_for(&self.config.percentile, index);
        let classification = classify(&self.config.classification, index);
        let flags = flags::detect_flags(
            &self.config.flags,
            &aggregates.picked,
            index,
            &aggregates.dimensions,
        );

        debug!(
            index,
            percentile,
            classification = classification.label(),
            flags = flags.len(),
            answered = aggregates.picked.len(),
            "assessment scored"
        );

        ScoreBreakdown {
            result: AssessmentResult {
                index,
                percentile,
                classification,
                flags,
            },
            dimensions: aggregates.dimensions,
            weighted_earned: aggregates.weighted_earned,
            weighted_max: aggregates.weighted_max,
            answered: aggregates.picked.len(),
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::reference()
    }
}

/// Per-dimension scores on 0..1. Dimensions with no answered question are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionProfile {
    scores: BTreeMap<Dimension, f64>,
}

impl DimensionProfile {
    pub(crate) fn new(scores: BTreeMap<Dimension, f64>) -> Self {
        Self { scores }
    }

    /// Score for `dimension`, 0 when nothing informed it.
    pub fn score(&self, dimension: Dimension) -> f64 {
        self.scores.get(&dimension).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        self.scores.iter().map(|(dimension, score)| (*dimension, *score))
    }
}

/// Result record plus the totals it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub result: AssessmentResult,
    pub dimensions: DimensionProfile,
    pub weighted_earned: f64,
    pub weighted_max: f64,
    pub answered: usize,
}
