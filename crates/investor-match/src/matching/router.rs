use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{Candidate, CandidateId, CandidateKind, QueryProfile};
use super::repository::{CandidateRepository, RepositoryError};
use super::service::{MatchingServiceError, MatchmakingService};

/// Body of a ranking request.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RankingRequest {
    pub query: QueryProfile,
    #[serde(default)]
    pub top_n: Option<usize>,
}

/// Router builder exposing ranking, explanation, and registry endpoints.
pub fn matching_router<R>(service: Arc<MatchmakingService<R>>) -> Router
where
    R: CandidateRepository + 'static,
{
    Router::new()
        .route("/api/v1/matching/zones", post(zones_handler::<R>))
        .route("/api/v1/matching/partners", post(partners_handler::<R>))
        .route("/api/v1/matching/candidates", post(register_handler::<R>))
        .route(
            "/api/v1/matching/candidates/:candidate_id",
            get(candidate_handler::<R>),
        )
        .route(
            "/api/v1/matching/candidates/:candidate_id/explain",
            post(explain_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn zones_handler<R>(
    State(service): State<Arc<MatchmakingService<R>>>,
    axum::Json(request): axum::Json<RankingRequest>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    rank_response(&service, CandidateKind::Zone, request)
}

pub(crate) async fn partners_handler<R>(
    State(service): State<Arc<MatchmakingService<R>>>,
    axum::Json(request): axum::Json<RankingRequest>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    rank_response(&service, CandidateKind::Partner, request)
}

fn rank_response<R>(
    service: &MatchmakingService<R>,
    kind: CandidateKind,
    request: RankingRequest,
) -> Response
where
    R: CandidateRepository + 'static,
{
    match service.recommend(kind, &request.query, request.top_n) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn register_handler<R>(
    State(service): State<Arc<MatchmakingService<R>>>,
    axum::Json(candidate): axum::Json<Candidate>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    match service.register(candidate) {
        Ok(stored) => (StatusCode::CREATED, axum::Json(stored)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn candidate_handler<R>(
    State(service): State<Arc<MatchmakingService<R>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    match service.get(&CandidateId(candidate_id)) {
        Ok(candidate) => (StatusCode::OK, axum::Json(candidate)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn explain_handler<R>(
    State(service): State<Arc<MatchmakingService<R>>>,
    Path(candidate_id): Path<String>,
    axum::Json(query): axum::Json<QueryProfile>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    match service.explain(&CandidateId(candidate_id), &query) {
        Ok(breakdown) => (StatusCode::OK, axum::Json(breakdown)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: MatchingServiceError) -> Response {
    let status = match &err {
        MatchingServiceError::Matching(_) | MatchingServiceError::Candidate(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        MatchingServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        MatchingServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        MatchingServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
