use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::Verdict;
use super::service::{ScamCatService, ScamCatServiceError};
use crate::games::SessionId;

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AnswerRequest {
    pub answer: Verdict,
}

/// Routes the view layer calls to drive Scam Cat sessions.
pub fn scam_cat_router(service: Arc<ScamCatService>) -> Router {
    Router::new()
        .route("/api/v1/scam-cat/sessions", post(create_handler))
        .route(
            "/api/v1/scam-cat/sessions/:session_id",
            get(view_handler).delete(remove_handler),
        )
        .route(
            "/api/v1/scam-cat/sessions/:session_id/round",
            post(round_handler),
        )
        .route(
            "/api/v1/scam-cat/sessions/:session_id/answer",
            post(answer_handler),
        )
        .route(
            "/api/v1/scam-cat/sessions/:session_id/reset",
            post(reset_handler),
        )
        .with_state(service)
}

pub(crate) async fn create_handler(State(service): State<Arc<ScamCatService>>) -> Response {
    match service.create() {
        Ok(snapshot) => (StatusCode::CREATED, Json(snapshot)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn view_handler(
    State(service): State<Arc<ScamCatService>>,
    Path(session_id): Path<String>,
) -> Response {
    respond(service.view(&SessionId(session_id)))
}

pub(crate) async fn round_handler(
    State(service): State<Arc<ScamCatService>>,
    Path(session_id): Path<String>,
) -> Response {
    respond(service.start_round(&SessionId(session_id)))
}

pub(crate) async fn answer_handler(
    State(service): State<Arc<ScamCatService>>,
    Path(session_id): Path<String>,
    Json(request): Json<AnswerRequest>,
) -> Response {
    respond(service.answer(&SessionId(session_id), request.answer))
}

pub(crate) async fn reset_handler(
    State(service): State<Arc<ScamCatService>>,
    Path(session_id): Path<String>,
) -> Response {
    respond(service.reset(&SessionId(session_id)))
}

pub(crate) async fn remove_handler(
    State(service): State<Arc<ScamCatService>>,
    Path(session_id): Path<String>,
) -> Response {
    match service.remove(&SessionId(session_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

fn respond<T: serde::Serialize>(result: Result<T, ScamCatServiceError>) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: ScamCatServiceError) -> Response {
    let status = match &err {
        ScamCatServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ScamCatServiceError::Game(_) => StatusCode::CONFLICT,
        ScamCatServiceError::Rules(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}
