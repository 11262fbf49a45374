use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::Value;

use crate::search::{SearchError, SearchResponse};

use super::{models::SearchRequest, AppState};

/// Health check endpoint. Reports which required configuration values are
/// present, never the values themselves.
pub async fn health_check(State(app_state): State<Arc<AppState>>) -> Json<Value> {
    let config = &app_state.config;
    Json(serde_json::json!({
        "service": "propsearch",
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "config": {
            "clickhouse_url": !config.clickhouse_url.is_empty(),
            "gemini_api_key": !config.gemini_api_key.is_empty(),
            "feed_token": !config.feed_token.is_empty(),
        }
    }))
}

pub async fn search_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, (StatusCode, Json<Value>)> {
    let Some(query) = payload.query else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Missing query parameter"})),
        ));
    };

    let start = Instant::now();
    match app_state.orchestrator.run(&query).await {
        Ok(response) => {
            log::info!(
                "Search returned {} result(s) in {:.2}ms",
                response.count,
                start.elapsed().as_secs_f64() * 1000.0
            );
            Ok(Json(response))
        }
        Err(SearchError::EmptyQuery) => Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": SearchError::EmptyQuery.to_string()})),
        )),
        Err(e) => {
            log::error!("Search failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "success": false,
                    "error": e.to_string()
                })),
            ))
        }
    }
}
