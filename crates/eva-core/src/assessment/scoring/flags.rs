use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::super::domain::{ChoiceKey, Dimension, QuestionId};
use super::DimensionProfile;

/// A single `(question, choice)` test against the answer snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerCondition {
    pub question: QuestionId,
    pub choice: ChoiceKey,
}

impl AnswerCondition {
    fn holds(&self, picked: &BTreeMap<QuestionId, ChoiceKey>) -> bool {
        picked.get(&self.question) == Some(&self.choice)
    }
}

/// Fires when one specific answer was given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleAnswerRule {
    pub when: AnswerCondition,
    pub message: String,
}

/// Fires only when both answers were given together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContradictionRule {
    pub first: AnswerCondition,
    pub second: AnswerCondition,
    pub message: String,
}

/// Fires when the index is high while one dimension stays low.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRule {
    pub dimension: Dimension,
    pub min_index: f64,
    pub max_dimension_score: f64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagRules {
    pub single: Vec<SingleAnswerRule>,
    pub contradictions: Vec<ContradictionRule>,
    #[serde(default)]
    pub anomaly: Option<AnomalyRule>,
}

/// Evaluate every rule table against the final answer snapshot.
///
/// Output order is single-answer rules, then contradictions, then the anomaly, each group in
/// table order. Rules only read the snapshot and never touch the aggregates.
pub(crate) fn detect_flags(
    rules: &FlagRules,
    picked: &BTreeMap<QuestionId, ChoiceKey>,
    index: f64,
    dimensions: &DimensionProfile,
) -> Vec<String> {
    let mut flags = Vec::new();

    for rule in &rules.single {
        if rule.when.holds(picked) {
            flags.push(rule.message.clone());
        }
    }

    for rule in &rules.contradictions {
        if rule.first.holds(picked) && rule.second.holds(picked) {
            flags.push(rule.message.clone());
        }
    }

    if let Some(rule) = &rules.anomaly {
        if index >= rule.min_index && dimensions.score(rule.dimension) < rule.max_dimension_score {
            flags.push(rule.message.clone());
        }
    }

    flags
}
