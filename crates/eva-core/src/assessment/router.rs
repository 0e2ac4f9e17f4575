use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::domain::{AnswerMap, AssessmentResult, Question, ScoringError};
use super::service::{AssessmentService, SubmissionReceipt};
use super::submission::{Identity, SubmissionRecorder};
use crate::error::AppError;

/// Answers either as a JSON object (`{"1": "A"}`) or as the raw `"1A, 2B"` string.
/// Entries in `answers` win over the same id in `submission`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub answers: AnswerMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission: Option<String>,
}

impl ScoreRequest {
    pub fn into_answers(self) -> Result<AnswerMap, ScoringError> {
        let mut merged = match self.submission {
            Some(raw) => AnswerMap::parse_raw(&raw)?,
            None => AnswerMap::new(),
        };
        for (id, key) in self.answers.iter() {
            merged.insert(id, key);
        }
        Ok(merged)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub first_name: String,
    pub surname: String,
    #[serde(default)]
    pub answers: AnswerMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// Router builder exposing the question bank, scoring, and submission endpoints.
pub fn assessment_router<R>(service: Arc<AssessmentService<R>>) -> Router
where
    R: SubmissionRecorder + 'static,
{
    Router::new()
        .route("/api/v1/assessment/questions", get(questions_handler::<R>))
        .route("/api/v1/assessment/score", post(score_handler::<R>))
        .route("/api/v1/assessment/submissions", post(submit_handler::<R>))
        .with_state(service)
}

pub(crate) async fn questions_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
) -> Json<Vec<Question>>
where
    R: SubmissionRecorder + 'static,
{
    Json(service.bank().questions().to_vec())
}

pub(crate) async fn score_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<AssessmentResult>, AppError>
where
    R: SubmissionRecorder + 'static,
{
    let answers = request
        .into_answers()
        .map_err(|err| AppError::Assessment(err.into()))?;
    let result = service.score(&answers)?;
    Ok(Json(result))
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    headers: HeaderMap,
    Json(request): Json<SubmissionRequest>,
) -> Result<(StatusCode, Json<SubmissionReceipt>), AppError>
where
    R: SubmissionRecorder + 'static,
{
    let SubmissionRequest {
        first_name,
        surname,
        answers,
        submission,
        user_agent,
    } = request;

    let user_agent = user_agent.or_else(|| {
        headers
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    });
    let answers = ScoreRequest {
        answers,
        submission,
    }
    .into_answers()
    .map_err(|err| AppError::Assessment(err.into()))?;

    let receipt = service.submit(&Identity::new(first_name, surname), &answers, user_agent)?;
    Ok((StatusCode::ACCEPTED, Json(receipt)))
}
