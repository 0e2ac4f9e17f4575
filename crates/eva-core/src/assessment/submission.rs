use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AnswerMap, AssessmentResult};

/// Respondent identification captured alongside a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub first_name: String,
    pub surname: String,
}

impl Identity {
    pub fn new(first_name: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            surname: surname.into(),
        }
    }

    /// Trimmed copy, or `None` when either field is blank.
    pub fn normalized(&self) -> Option<Identity> {
        let first_name = self.first_name.trim();
        let surname = self.surname.trim();
        if first_name.is_empty() || surname.is_empty() {
            return None;
        }
        Some(Identity::new(first_name, surname))
    }
}

/// Flat record handed to the external recording system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub first_name: String,
    pub surname: String,
    pub index: f64,
    pub percentile: u8,
    pub classification: String,
    pub submission: String,
    pub user_agent: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl SubmissionPayload {
    pub fn new(
        identity: &Identity,
        result: &AssessmentResult,
        answers: &AnswerMap,
        user_agent: Option<String>,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            first_name: identity.first_name.clone(),
            surname: identity.surname.clone(),
            index: result.index,
            percentile: result.percentile,
            classification: result.classification.label().to_string(),
            submission: answers.to_submission_string(),
            user_agent,
            recorded_at,
        }
    }
}

/// Outbound hook for recorded submissions (spreadsheet, CSV log, webhook adapters).
pub trait SubmissionRecorder: Send + Sync {
    fn record(&self, payload: SubmissionPayload) -> Result<(), RecordError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("submission log unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Appends one CSV row per submission, headers written once for a fresh log.
pub struct CsvSubmissionLog<W: Write> {
    writer: Mutex<csv::Writer<W>>,
}

impl<W: Write> CsvSubmissionLog<W> {
    pub fn from_writer(writer: W) -> Self {
        Self::with_headers(writer, true)
    }

    fn with_headers(writer: W, has_headers: bool) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(has_headers)
            .from_writer(writer);
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> Result<W, RecordError> {
        let writer = self
            .writer
            .into_inner()
            .map_err(|_| RecordError::Unavailable("log mutex poisoned".to_string()))?;
        writer
            .into_inner()
            .map_err(|err| RecordError::Unavailable(err.error().to_string()))
    }
}

impl CsvSubmissionLog<std::fs::File> {
    /// Open `path` for appending; headers are only emitted when the file is empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RecordError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        let fresh = file.metadata()?.len() == 0;
        Ok(Self::with_headers(file, fresh))
    }
}

impl<W: Write + Send> SubmissionRecorder for CsvSubmissionLog<W> {
    fn record(&self, payload: SubmissionPayload) -> Result<(), RecordError> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| RecordError::Unavailable("log mutex poisoned".to_string()))?;
        writer.serialize(&payload)?;
        writer.flush()?;
        Ok(())
    }
}
