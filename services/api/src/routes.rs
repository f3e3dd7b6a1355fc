use crate::infra::{AppState, GameServices};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Extension;
use axum::Json;
use catfolio::games::roster::{standard_roster, CatCard};
use catfolio::games::scam_cat::scam_cat_router;
use catfolio::games::spending_sorter::spending_sorter_router;
use catfolio::settings::settings_router;
use serde_json::json;

pub(crate) fn with_game_routes(services: &GameServices) -> axum::Router {
    spending_sorter_router(services.spending_sorter.clone())
        .merge(scam_cat_router(services.scam_cat.clone()))
        .merge(settings_router(services.settings.clone()))
        .route("/api/v1/cats", get(cats_endpoint))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn cats_endpoint() -> Json<Vec<CatCard>> {
    Json(standard_roster().iter().map(|cat| cat.card()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use catfolio::config::GameConfig;
    use catfolio::settings::MemorySettingsStore;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(ready: bool) -> axum::Router {
        let config = GameConfig {
            seed: Some(1),
            ..GameConfig::default()
        };
        let services = GameServices::new(&config, Arc::new(MemorySettingsStore::default()))
            .expect("default rules are valid");
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_game_routes(&services).layer(Extension(state))
    }

    async fn get_json(router: axum::Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).expect("request builds"))
            .await
            .expect("route executes");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        (status, serde_json::from_slice(&bytes).expect("body is json"))
    }

    #[tokio::test]
    async fn readiness_reflects_the_flag() {
        let (status, body) = get_json(app(false), "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "initializing");

        let (status, body) = get_json(app(true), "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }

    #[tokio::test]
    async fn cats_lists_the_roster_with_playable_flags() {
        let (status, body) = get_json(app(true), "/api/v1/cats").await;
        assert_eq!(status, StatusCode::OK);
        let cats = body.as_array().expect("array of cats");
        assert_eq!(cats.len(), 10);
        let playable: Vec<&str> = cats
            .iter()
            .filter(|cat| cat["playable"] == true)
            .filter_map(|cat| cat["minigame"].as_str())
            .collect();
        assert_eq!(playable.len(), 2);
        assert!(playable.contains(&"spending-sorter"));
    }

    #[tokio::test]
    async fn game_and_settings_routes_are_mounted() {
        let (status, body) = get_json(app(true), "/api/v1/settings").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["volume"], 50);

        let (status, _) = get_json(app(true), "/api/v1/scam-cat/sessions/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = get_json(app(true), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
