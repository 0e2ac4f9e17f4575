use eva_core::assessment::{
    ChoiceKey, CsvSubmissionLog, RecordError, SubmissionPayload, SubmissionRecorder,
};
use eva_core::config::SubmissionLogConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use std::fs::File;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySubmissionRecorder {
    payloads: Arc<Mutex<Vec<SubmissionPayload>>>,
}

impl SubmissionRecorder for InMemorySubmissionRecorder {
    fn record(&self, payload: SubmissionPayload) -> Result<(), RecordError> {
        let mut guard = self
            .payloads
            .lock()
            .map_err(|_| RecordError::Unavailable("recorder mutex poisoned".to_string()))?;
        guard.push(payload);
        Ok(())
    }
}

#[cfg(test)]
impl InMemorySubmissionRecorder {
    pub(crate) fn len(&self) -> usize {
        self.payloads.lock().map(|guard| guard.len()).unwrap_or(0)
    }
}

/// Recorder selected from `EVA_SUBMISSION_LOG`.
pub(crate) enum ConfiguredRecorder {
    Memory(InMemorySubmissionRecorder),
    Csv(CsvSubmissionLog<File>),
}

impl ConfiguredRecorder {
    pub(crate) fn from_config(config: &SubmissionLogConfig) -> Result<Self, RecordError> {
        match &config.csv_path {
            Some(path) => Ok(Self::Csv(CsvSubmissionLog::open(path)?)),
            None => Ok(Self::Memory(InMemorySubmissionRecorder::default())),
        }
    }

    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Self::Memory(_) => "in-memory",
            Self::Csv(_) => "csv",
        }
    }
}

impl SubmissionRecorder for ConfiguredRecorder {
    fn record(&self, payload: SubmissionPayload) -> Result<(), RecordError> {
        match self {
            Self::Memory(recorder) => recorder.record(payload),
            Self::Csv(log) => log.record(payload),
        }
    }
}

pub(crate) fn parse_choice_key(raw: &str) -> Result<ChoiceKey, String> {
    raw.parse::<ChoiceKey>().map_err(|err| err.to_string())
}
