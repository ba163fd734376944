use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::domain::{Answer, Language};
use super::export::EXPORT_FILE_NAME;
use super::scoring::{DiagnosisResult, ScoreTable};
use super::service::{DiagnosisService, QuestionView};
use crate::error::AppError;

/// Router builder exposing the questionnaire and scoring endpoints.
pub fn diagnosis_router(service: Arc<DiagnosisService>) -> Router {
    Router::new()
        .route("/api/v1/questions", get(questions_handler))
        .route("/api/v1/diagnosis", post(diagnosis_handler))
        .route("/api/v1/diagnosis/export", post(export_handler))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub struct QuestionsQuery {
    #[serde(default)]
    pub lang: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub language: Language,
    pub questions: Vec<QuestionView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DiagnosisRequest {
    #[serde(default)]
    pub answers: Vec<Answer>,
}

#[derive(Debug, Serialize)]
pub struct DiagnosisResponse {
    pub evaluated_on: NaiveDate,
    pub category_scores: ScoreTable,
    pub element_scores: ScoreTable,
    pub results: Vec<DiagnosisResult>,
}

pub(crate) async fn questions_handler(
    State(service): State<Arc<DiagnosisService>>,
    Query(query): Query<QuestionsQuery>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let language = match query.lang.as_deref() {
        Some(raw) => Language::parse(raw)
            .ok_or_else(|| AppError::InvalidInput(format!("unsupported language '{raw}'")))?,
        None => service.default_language(),
    };

    Ok(Json(QuestionsResponse {
        language,
        questions: service.questions(Some(language)),
    }))
}

pub(crate) async fn diagnosis_handler(
    State(service): State<Arc<DiagnosisService>>,
    Json(request): Json<DiagnosisRequest>,
) -> Json<DiagnosisResponse> {
    let report = service.evaluate(&request.answers);
    Json(DiagnosisResponse {
        evaluated_on: Local::now().date_naive(),
        category_scores: report.category_scores,
        element_scores: report.element_scores,
        results: report.results,
    })
}

pub(crate) async fn export_handler(
    State(service): State<Arc<DiagnosisService>>,
    Json(request): Json<DiagnosisRequest>,
) -> Response {
    let body = service.export(&request.answers);
    let disposition = format!("attachment; filename=\"{EXPORT_FILE_NAME}\"");
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}
