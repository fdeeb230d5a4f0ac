// src/api/http/router.rs
// HTTP router composition

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{
    ask_handler, chart_handler, emergency_call_handler, health_handler, moods_handler,
    root_handler,
};
use crate::state::AppState;

/// All routes, with permissive CORS so the chart page can be served from anywhere
pub fn http_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        // Liveness
        .route("/", get(root_handler))
        .route("/health", get(health_handler))

        // Chat
        .route("/ask", post(ask_handler))
        .route("/moods", get(moods_handler))
        .route("/emergency_call", post(emergency_call_handler))

        // Companion page
        .route("/chart", get(chart_handler))

        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
