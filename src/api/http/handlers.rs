// src/api/http/handlers.rs

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult, IntoApiError};
use crate::server;
use crate::services::{ChatReply, EmergencyAck};
use crate::state::AppState;

const CHART_PAGE: &str = include_str!("../../../assets/chart.html");

#[derive(Debug, Deserialize, Serialize)]
pub struct AskRequest {
    pub question: String,
}

/// POST /ask
pub async fn ask_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> ApiResult<Json<ChatReply>> {
    let Json(request) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let reply = state.chat_service.ask(&request.question).await?;
    Ok(Json(reply))
}

/// GET /moods
pub async fn moods_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<i64>>> {
    let codes = state
        .chat_service
        .history()
        .await
        .into_api_error("Failed to load mood history")?;
    Ok(Json(codes))
}

/// POST /emergency_call
pub async fn emergency_call_handler(State(state): State<Arc<AppState>>) -> Json<EmergencyAck> {
    Json(state.chat_service.trigger_emergency())
}

/// GET /
pub async fn root_handler() -> impl IntoResponse {
    Json(json!({ "status": "running" }))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    db: &'static str,
    version: &'static str,
}

/// GET /health
pub async fn health_handler(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    if !server::ping(&state.sqlite_pool).await {
        return Err(ApiError::service_unavailable("Database unreachable"));
    }

    Ok((
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy",
            db: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }),
    ))
}

/// GET /chart
pub async fn chart_handler() -> Html<&'static str> {
    Html(CHART_PAGE)
}
