use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::assessment::bank::QuestionBank;
use crate::assessment::domain::{AnswerMap, AssessmentResult, ChoiceKey, QuestionId};
use crate::assessment::scoring::{ScoringConfig, ScoringEngine};
use crate::assessment::service::AssessmentService;
use crate::assessment::submission::{RecordError, SubmissionPayload, SubmissionRecorder};

pub(super) fn bank() -> QuestionBank {
    QuestionBank::reference()
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::reference()
}

pub(super) fn uniform(key: ChoiceKey) -> AnswerMap {
    AnswerMap::uniform(bank().questions(), key)
}

/// Every bank question answered with `base`, then `overrides` applied.
pub(super) fn answers_with(base: ChoiceKey, overrides: &[(u32, ChoiceKey)]) -> AnswerMap {
    let mut answers = uniform(base);
    for (id, key) in overrides {
        answers.insert(QuestionId(*id), *key);
    }
    answers
}

pub(super) fn score(answers: &AnswerMap) -> AssessmentResult {
    engine().score(bank().questions(), answers)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRecorder {
    payloads: Arc<Mutex<Vec<SubmissionPayload>>>,
}

impl MemoryRecorder {
    pub(super) fn payloads(&self) -> Vec<SubmissionPayload> {
        self.payloads.lock().expect("recorder mutex poisoned").clone()
    }
}

impl SubmissionRecorder for MemoryRecorder {
    fn record(&self, payload: SubmissionPayload) -> Result<(), RecordError> {
        self.payloads
            .lock()
            .expect("recorder mutex poisoned")
            .push(payload);
        Ok(())
    }
}

pub(super) struct OfflineRecorder;

impl SubmissionRecorder for OfflineRecorder {
    fn record(&self, _payload: SubmissionPayload) -> Result<(), RecordError> {
        Err(RecordError::Unavailable("endpoint offline".to_string()))
    }
}

pub(super) fn build_service() -> (AssessmentService<MemoryRecorder>, Arc<MemoryRecorder>) {
    let recorder = Arc::new(MemoryRecorder::default());
    let service = AssessmentService::new(bank(), ScoringConfig::reference(), recorder.clone());
    (service, recorder)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
