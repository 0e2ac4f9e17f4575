use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::bank::QuestionBank;
use super::domain::{AnswerMap, AssessmentResult, QuestionId, ScoringError};
use super::scoring::{ScoreBreakdown, ScoringConfig, ScoringEngine};
use super::submission::{Identity, SubmissionPayload, SubmissionRecorder};

/// Service composing the item bank, the scoring engine, and the submission recorder.
pub struct AssessmentService<R> {
    bank: Arc<QuestionBank>,
    engine: Arc<ScoringEngine>,
    recorder: Arc<R>,
}

impl<R> AssessmentService<R>
where
    R: SubmissionRecorder + 'static,
{
    pub fn new(bank: QuestionBank, config: ScoringConfig, recorder: Arc<R>) -> Self {
        Self {
            bank: Arc::new(bank),
            engine: Arc::new(ScoringEngine::new(config)),
            recorder,
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Score a complete answer map. Partial maps are refused rather than under-scored.
    pub fn score(&self, answers: &AnswerMap) -> Result<AssessmentResult, AssessmentError> {
        self.score_detailed(answers).map(|breakdown| breakdown.result)
    }

    pub fn score_detailed(&self, answers: &AnswerMap) -> Result<ScoreBreakdown, AssessmentError> {
        let unknown = self.bank.unknown_answers(answers);
        if let Some(id) = unknown.first() {
            return Err(AssessmentError::UnknownQuestion(*id));
        }

        let missing = self.bank.missing_answers(answers);
        if !missing.is_empty() {
            return Err(AssessmentError::Incomplete { missing });
        }

        Ok(self.engine.score_detailed(self.bank.questions(), answers))
    }

    /// Score and hand the payload to the recorder.
    ///
    /// A recorder failure does not fail the submission; the receipt reports it instead.
    pub fn submit(
        &self,
        identity: &Identity,
        answers: &AnswerMap,
        user_agent: Option<String>,
    ) -> Result<SubmissionReceipt, AssessmentError> {
        let identity = identity
            .normalized()
            .ok_or(AssessmentError::MissingIdentity)?;
        let result = self.score(answers)?;

        let payload = SubmissionPayload::new(&identity, &result, answers, user_agent, Utc::now());
        let submission = payload.submission.clone();

        let status = match self.recorder.record(payload) {
            Ok(()) => {
                info!(
                    index = result.index,
                    classification = result.classification.label(),
                    "submission recorded"
                );
                SubmissionStatus::Processed
            }
            Err(err) => {
                warn!(error = %err, "submission recording failed");
                SubmissionStatus::ProcessedWithWarnings
            }
        };

        Ok(SubmissionReceipt {
            status,
            result,
            submission,
        })
    }
}

/// Outcome reported back to the respondent once a submission is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SubmissionStatus {
    #[serde(rename = "PROCESSED")]
    Processed,
    #[serde(rename = "PROCESSED WITH WARNINGS")]
    ProcessedWithWarnings,
}

impl SubmissionStatus {
    pub fn label(self) -> &'static str {
        match self {
            SubmissionStatus::Processed => "PROCESSED",
            SubmissionStatus::ProcessedWithWarnings => "PROCESSED WITH WARNINGS",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionReceipt {
    pub status: SubmissionStatus,
    pub result: AssessmentResult,
    pub submission: String,
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error("{} question(s) unanswered: {}", .missing.len(), join_ids(.missing))]
    Incomplete { missing: Vec<QuestionId> },
    #[error("question {0} is not part of the item bank")]
    UnknownQuestion(QuestionId),
    #[error("identification required to proceed")]
    MissingIdentity,
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

fn join_ids(ids: &[QuestionId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
