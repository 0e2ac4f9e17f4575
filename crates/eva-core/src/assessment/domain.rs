use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors raised while interpreting caller supplied answers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("choice key '{0}' is not one of A, B, C, D")]
    InvalidChoiceKey(String),
    #[error("answer token '{0}' is not of the form <question id><choice key>")]
    MalformedAnswerToken(String),
}

/// Identifier of a question in the item bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u32);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the four closed choice keys. `A` is the most aligned response, `D` the least.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChoiceKey {
    A,
    B,
    C,
    D,
}

impl ChoiceKey {
    pub const ALL: [ChoiceKey; 4] = [ChoiceKey::A, ChoiceKey::B, ChoiceKey::C, ChoiceKey::D];

    /// Ordinal alignment value on the 1..4 scale.
    pub fn points(self) -> u8 {
        match self {
            ChoiceKey::A => 4,
            ChoiceKey::B => 3,
            ChoiceKey::C => 2,
            ChoiceKey::D => 1,
        }
    }

    /// Alignment normalized to 0..1 (`A` = 1.0, `D` = 0.0).
    pub fn unit(self) -> f64 {
        (f64::from(self.points()) - 1.0) / 3.0
    }

    pub fn as_char(self) -> char {
        match self {
            ChoiceKey::A => 'A',
            ChoiceKey::B => 'B',
            ChoiceKey::C => 'C',
            ChoiceKey::D => 'D',
        }
    }
}

impl fmt::Display for ChoiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl TryFrom<char> for ChoiceKey {
    type Error = ScoringError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value.to_ascii_uppercase() {
            'A' => Ok(ChoiceKey::A),
            'B' => Ok(ChoiceKey::B),
            'C' => Ok(ChoiceKey::C),
            'D' => Ok(ChoiceKey::D),
            _ => Err(ScoringError::InvalidChoiceKey(value.to_string())),
        }
    }
}

impl FromStr for ChoiceKey {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(key), None) => ChoiceKey::try_from(key),
            _ => Err(ScoringError::InvalidChoiceKey(trimmed.to_string())),
        }
    }
}

/// Display text for each of the four choices of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceSet {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
    #[serde(rename = "C")]
    pub c: String,
    #[serde(rename = "D")]
    pub d: String,
}

impl ChoiceSet {
    pub fn text(&self, key: ChoiceKey) -> &str {
        match key {
            ChoiceKey::A => &self.a,
            ChoiceKey::B => &self.b,
            ChoiceKey::C => &self.c,
            ChoiceKey::D => &self.d,
        }
    }
}

/// Immutable item of the question bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: String,
    pub choices: ChoiceSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl Question {
    pub fn base_weight(&self) -> f64 {
        self.weight.unwrap_or(1.0)
    }
}

/// Answers keyed by question id, kept in ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap(BTreeMap<QuestionId, ChoiceKey>);

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every question in `questions` with the same key.
    pub fn uniform<'a, I>(questions: I, key: ChoiceKey) -> Self
    where
        I: IntoIterator<Item = &'a Question>,
    {
        questions.into_iter().map(|question| (question.id, key)).collect()
    }

    /// Parse the `"1A, 2C, 3B"` form produced by the questionnaire front end.
    ///
    /// Keys are case-insensitive and blank tokens are skipped. A repeated id keeps the last
    /// answer, matching how the form overwrites a selection.
    pub fn parse_raw(raw: &str) -> Result<Self, ScoringError> {
        let mut answers = AnswerMap::new();
        for token in raw.split(',').map(str::trim).filter(|token| !token.is_empty()) {
            let Some(key_char) = token.chars().last() else {
                continue;
            };
            let id_part = token[..token.len() - key_char.len_utf8()].trim();
            let id = id_part
                .parse::<u32>()
                .map_err(|_| ScoringError::MalformedAnswerToken(token.to_string()))?;
            let key = ChoiceKey::try_from(key_char)?;
            answers.insert(QuestionId(id), key);
        }
        Ok(answers)
    }

    /// Serialize as `"{id}{key}"` tokens joined by `", "`, ids ascending.
    pub fn to_submission_string(&self) -> String {
        self.0
            .iter()
            .map(|(id, key)| format!("{id}{key}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn insert(&mut self, id: QuestionId, key: ChoiceKey) -> Option<ChoiceKey> {
        self.0.insert(id, key)
    }

    pub fn get(&self, id: QuestionId) -> Option<ChoiceKey> {
        self.0.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, ChoiceKey)> + '_ {
        self.0.iter().map(|(id, key)| (*id, *key))
    }
}

impl FromIterator<(QuestionId, ChoiceKey)> for AnswerMap {
    fn from_iter<T: IntoIterator<Item = (QuestionId, ChoiceKey)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Latent sub-scores used only to drive anomaly detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Dimension {
    Surveillance,
    Verification,
    Bureaucratization,
    AffectHostility,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Surveillance,
        Dimension::Verification,
        Dimension::Bureaucratization,
        Dimension::AffectHostility,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Surveillance => "SURVEILLANCE",
            Dimension::Verification => "VERIFICATION",
            Dimension::Bureaucratization => "BUREAUCRATIZATION",
            Dimension::AffectHostility => "AFFECT_HOSTILITY",
        }
    }
}

/// Five fixed bands bucketing the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    #[serde(rename = "CERTIFIED COMPLIANCE")]
    CertifiedCompliance,
    #[serde(rename = "INSTITUTIONAL FIT")]
    InstitutionalFit,
    #[serde(rename = "MANAGED VARIANCE")]
    ManagedVariance,
    #[serde(rename = "UNSTABLE REPORTING")]
    UnstableReporting,
    #[serde(rename = "NONCONFORMING SIGNAL")]
    NonconformingSignal,
}

impl Classification {
    pub fn label(self) -> &'static str {
        match self {
            Classification::CertifiedCompliance => "CERTIFIED COMPLIANCE",
            Classification::InstitutionalFit => "INSTITUTIONAL FIT",
            Classification::ManagedVariance => "MANAGED VARIANCE",
            Classification::UnstableReporting => "UNSTABLE REPORTING",
            Classification::NonconformingSignal => "NONCONFORMING SIGNAL",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The engine's sole output record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    /// 0..100, rounded to one decimal.
    pub index: f64,
    /// 1..99.
    pub percentile: u8,
    pub classification: Classification,
    pub flags: Vec<String>,
}
