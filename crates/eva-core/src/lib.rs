//! Scoring engine and service plumbing for the EVA self-assessment questionnaire.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
