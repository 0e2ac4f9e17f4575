use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::super::domain::{ChoiceKey, Classification, Dimension, Question, QuestionId};
use super::flags::{AnomalyRule, AnswerCondition, ContradictionRule, FlagRules, SingleAnswerRule};

/// Constant tables driving the scoring pass. Passed into the engine rather than read from globals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Exponent applied to the unit alignment; values above 1 push mid-range answers apart.
    pub curve_gamma: f64,
    /// Per-question multiplier layered on top of the question weight.
    pub diagnostic_boost: BTreeMap<QuestionId, f64>,
    pub dimension_map: BTreeMap<QuestionId, Vec<Dimension>>,
    pub percentile: PercentileCurve,
    pub classification: ClassificationTable,
    pub flags: FlagRules,
}

impl ScoringConfig {
    pub fn reference() -> Self {
        use Dimension::*;

        let diagnostic_boost = [(4, 1.05), (7, 1.08), (11, 1.08), (12, 1.10), (15, 1.05)]
            .into_iter()
            .map(|(id, boost)| (QuestionId(id), boost))
            .collect();

        let dimension_map = [
            (2, vec![Bureaucratization]),
            (4, vec![Surveillance]),
            (5, vec![Surveillance, AffectHostility]),
            (6, vec![Bureaucratization]),
            (7, vec![Verification]),
            (8, vec![AffectHostility]),
            (11, vec![Surveillance, AffectHostility]),
            (12, vec![Verification]),
            (13, vec![AffectHostility]),
            (14, vec![Bureaucratization]),
            (15, vec![Bureaucratization, Surveillance]),
        ]
        .into_iter()
        .map(|(id, dims)| (QuestionId(id), dims))
        .collect();

        Self {
            curve_gamma: 1.25,
            diagnostic_boost,
            dimension_map,
            percentile: PercentileCurve::default(),
            classification: ClassificationTable::default(),
            flags: reference_flag_rules(),
        }
    }

    /// `base weight × diagnostic boost`, both defaulting to 1.0.
    pub fn effective_weight(&self, question: &Question) -> f64 {
        let boost = self
            .diagnostic_boost
            .get(&question.id)
            .copied()
            .unwrap_or(1.0);
        question.base_weight() * boost
    }

    pub fn dimensions_for(&self, id: QuestionId) -> &[Dimension] {
        self.dimension_map
            .get(&id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::reference()
    }
}

/// Logistic curve mapping the index onto a percentile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileCurve {
    pub center: f64,
    pub steepness: f64,
}

impl Default for PercentileCurve {
    fn default() -> Self {
        Self {
            center: 50.0,
            steepness: 0.085,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationBand {
    pub min_index: f64,
    pub classification: Classification,
}

/// Bands are evaluated in order and the first whose floor is reached wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationTable {
    pub bands: Vec<ClassificationBand>,
    pub below: Classification,
}

impl Default for ClassificationTable {
    fn default() -> Self {
        let band = |min_index, classification| ClassificationBand {
            min_index,
            classification,
        };
        Self {
            bands: vec![
                band(85.0, Classification::CertifiedCompliance),
                band(70.0, Classification::InstitutionalFit),
                band(55.0, Classification::ManagedVariance),
                band(40.0, Classification::UnstableReporting),
            ],
            below: Classification::NonconformingSignal,
        }
    }
}

fn reference_flag_rules() -> FlagRules {
    let when = |id, choice| AnswerCondition {
        question: QuestionId(id),
        choice,
    };
    let single = |id, choice, message: &str| SingleAnswerRule {
        when: when(id, choice),
        message: message.to_string(),
    };
    let contradiction = |first, second, message: &str| ContradictionRule {
        first,
        second,
        message: message.to_string(),
    };

    FlagRules {
        single: vec![
            single(12, ChoiceKey::A, "Legitimacy outsourced (12A)"),
            single(7, ChoiceKey::A, "Private happiness rejected (7A)"),
            single(4, ChoiceKey::A, "Continuous self-monitoring (4A)"),
            single(11, ChoiceKey::A, "Happiness terminated upon awareness (11A)"),
            single(15, ChoiceKey::A, "Status permanently under review (15A)"),
        ],
        contradictions: vec![
            contradiction(
                when(7, ChoiceKey::D),
                when(12, ChoiceKey::A),
                "Contradiction: internal sufficiency vs external legitimacy (7D + 12A)",
            ),
            contradiction(
                when(4, ChoiceKey::D),
                when(11, ChoiceKey::A),
                "Contradiction: low monitoring yet termination trigger (4D + 11A)",
            ),
            contradiction(
                when(8, ChoiceKey::D),
                when(7, ChoiceKey::A),
                "Inconsistent affect policy (8D vs 7A)",
            ),
        ],
        anomaly: Some(AnomalyRule {
            dimension: Dimension::Verification,
            min_index: 80.0,
            max_dimension_score: 0.35,
            message: "Anomaly: high alignment without external verification dependency"
                .to_string(),
        }),
    }
}
