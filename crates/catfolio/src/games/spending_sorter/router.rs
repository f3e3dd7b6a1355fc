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

use super::domain::{Bucket, ItemId};
use super::service::{SpendingSorterService, SpendingSorterServiceError};
use crate::games::SessionId;

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ClassifyRequest {
    pub item_id: ItemId,
    pub bucket: Bucket,
}

/// Routes the view layer calls to drive Spending Sorter sessions.
pub fn spending_sorter_router(service: Arc<SpendingSorterService>) -> Router {
    Router::new()
        .route("/api/v1/spending-sorter/sessions", post(create_handler))
        .route(
            "/api/v1/spending-sorter/sessions/:session_id",
            get(view_handler).delete(remove_handler),
        )
        .route(
            "/api/v1/spending-sorter/sessions/:session_id/start",
            post(start_handler),
        )
        .route(
            "/api/v1/spending-sorter/sessions/:session_id/classify",
            post(classify_handler),
        )
        .route(
            "/api/v1/spending-sorter/sessions/:session_id/finish",
            post(finish_handler),
        )
        .route(
            "/api/v1/spending-sorter/sessions/:session_id/reset",
            post(reset_handler),
        )
        .with_state(service)
}

pub(crate) async fn create_handler(State(service): State<Arc<SpendingSorterService>>) -> Response {
    match service.create() {
        Ok(snapshot) => (StatusCode::CREATED, Json(snapshot)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn view_handler(
    State(service): State<Arc<SpendingSorterService>>,
    Path(session_id): Path<String>,
) -> Response {
    respond(service.view(&SessionId(session_id)))
}

pub(crate) async fn start_handler(
    State(service): State<Arc<SpendingSorterService>>,
    Path(session_id): Path<String>,
) -> Response {
    respond(service.start(&SessionId(session_id)))
}

pub(crate) async fn classify_handler(
    State(service): State<Arc<SpendingSorterService>>,
    Path(session_id): Path<String>,
    Json(request): Json<ClassifyRequest>,
) -> Response {
    respond(service.classify(&SessionId(session_id), request.item_id, request.bucket))
}

pub(crate) async fn finish_handler(
    State(service): State<Arc<SpendingSorterService>>,
    Path(session_id): Path<String>,
) -> Response {
    respond(service.finish(&SessionId(session_id)))
}

pub(crate) async fn reset_handler(
    State(service): State<Arc<SpendingSorterService>>,
    Path(session_id): Path<String>,
) -> Response {
    respond(service.reset(&SessionId(session_id)))
}

pub(crate) async fn remove_handler(
    State(service): State<Arc<SpendingSorterService>>,
    Path(session_id): Path<String>,
) -> Response {
    match service.remove(&SessionId(session_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

fn respond<T: serde::Serialize>(result: Result<T, SpendingSorterServiceError>) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: SpendingSorterServiceError) -> Response {
    let status = match &err {
        SpendingSorterServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        SpendingSorterServiceError::Game(_) => StatusCode::CONFLICT,
        SpendingSorterServiceError::Rules(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}
