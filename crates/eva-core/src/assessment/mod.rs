//! EVA questionnaire: item bank, scoring engine, and the submission boundary.
//!
//! The scoring engine is a pure function of `(bank, answers)`; everything around it (the
//! completeness gate, identity capture, recording) lives in [`service`] and [`router`].

pub mod bank;
pub mod domain;
pub mod router;
pub mod scoring;
pub mod service;
pub mod submission;

#[cfg(test)]
mod tests;

pub use bank::QuestionBank;
pub use domain::{
    AnswerMap, AssessmentResult, ChoiceKey, ChoiceSet, Classification, Dimension, Question,
    QuestionId, ScoringError,
};
pub use router::{assessment_router, ScoreRequest, SubmissionRequest};
pub use scoring::{DimensionProfile, ScoreBreakdown, ScoringConfig, ScoringEngine};
pub use service::{AssessmentError, AssessmentService, SubmissionReceipt, SubmissionStatus};
pub use submission::{
    CsvSubmissionLog, Identity, RecordError, SubmissionPayload, SubmissionRecorder,
};
