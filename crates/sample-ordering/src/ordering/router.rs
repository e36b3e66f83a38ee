use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::domain::{OrderingConfiguration, RankedResult};
use super::engine::RankingError;
use super::service::{OrderingService, OrderingServiceError};
use super::validator::ValidationIssue;

#[derive(Debug, Deserialize, Serialize)]
pub struct ValidateRequest {
    pub configuration: OrderingConfiguration,
}

#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankRequest {
    pub configuration: OrderingConfiguration,
    pub entities: Vec<Value>,
    #[serde(default)]
    pub reference_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    pub configuration: OrderingConfiguration,
    pub entities: Vec<Value>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub reference_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct RankingResponse {
    pub results: Vec<RankedResult>,
}

/// Router builder exposing validation, ranking, and preview endpoints.
pub fn ordering_router(service: Arc<OrderingService>) -> Router {
    Router::new()
        .route("/api/v1/ordering/validate", post(validate_handler))
        .route("/api/v1/ordering/rank", post(rank_handler))
        .route("/api/v1/ordering/preview", post(preview_handler))
        .with_state(service)
}

pub(crate) async fn validate_handler(
    State(service): State<Arc<OrderingService>>,
    axum::Json(request): axum::Json<ValidateRequest>,
) -> Response {
    let issues = service.validate(&request.configuration);
    let report = ValidationReport {
        valid: !issues.iter().any(ValidationIssue::is_error),
        issues,
    };
    (StatusCode::OK, axum::Json(report)).into_response()
}

pub(crate) async fn rank_handler(
    State(service): State<Arc<OrderingService>>,
    axum::Json(request): axum::Json<RankRequest>,
) -> Response {
    let RankRequest {
        configuration,
        entities,
        reference_time,
    } = request;

    ranking_response(service.rank(&entities, &configuration, reference_time))
}

pub(crate) async fn preview_handler(
    State(service): State<Arc<OrderingService>>,
    axum::Json(request): axum::Json<PreviewRequest>,
) -> Response {
    let PreviewRequest {
        configuration,
        entities,
        limit,
        reference_time,
    } = request;

    ranking_response(service.preview(&entities, &configuration, limit, reference_time))
}

fn ranking_response(outcome: Result<Vec<RankedResult>, OrderingServiceError>) -> Response {
    match outcome {
        Ok(results) => (StatusCode::OK, axum::Json(RankingResponse { results })).into_response(),
        Err(OrderingServiceError::Ranking(error)) => {
            let code = match &error {
                RankingError::NoActiveCriteria => "no_active_criteria",
                RankingError::InvalidConfiguration { .. } => "invalid_configuration",
            };
            let payload = json!({
                "error": error.to_string(),
                "code": code,
                "issues": error.issues(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(error @ OrderingServiceError::TooManyEntities { .. }) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::PAYLOAD_TOO_LARGE, axum::Json(payload)).into_response()
        }
    }
}
