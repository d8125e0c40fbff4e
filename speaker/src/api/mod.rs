//! REST APIハンドラー
//!
//! スピーカーリソースのルーティング定義

pub mod error;
pub mod health;
pub mod metrics;
pub mod speakers;

use crate::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// APIルーターを作成
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(speakers::retrieve_all))
        .route("/add", post(speakers::add))
        .route("/remove/:id", delete(speakers::remove))
        .route("/update", put(speakers::update))
        .route("/retrieve/:id", get(speakers::retrieve))
        .route("/failingService", get(speakers::retrieve_failing_service))
        .route(
            "/failingServiceWithoutAnnotation",
            get(speakers::retrieve_failing_service_without_annotation),
        )
        .route("/search", put(speakers::search))
        .route("/nessProbe", get(health::ness_probe))
        .route("/updateHealthStatus", post(health::update_health_status))
        .route("/health", get(health::health))
        .route("/metrics", get(metrics::export))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
