// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP routes for the edge server.

use crate::error::{AppError, Result};
use crate::middleware::auth::require_session;
use crate::AppState;
use axum::extract::State;
use axum::handler::HandlerWithoutStateExt;
use axum::http::Uri;
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

/// Health check: the exported frontend must be present.
async fn health_check(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>> {
    let dir = &state.config.static_dir;
    let metadata = tokio::fs::metadata(dir).await.map_err(|e| {
        AppError::Internal(anyhow::anyhow!(
            "static directory {} unavailable: {}",
            dir.display(),
            e
        ))
    })?;
    if !metadata.is_dir() {
        return Err(AppError::Internal(anyhow::anyhow!(
            "static path {} is not a directory",
            dir.display()
        )));
    }

    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
    }))
}

async fn page_not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

/// Build the complete router: health check plus the guarded frontend.
pub fn create_router(state: Arc<AppState>) -> Router {
    let pages = ServeDir::new(&state.config.static_dir)
        .not_found_service(page_not_found.into_service());

    // The path guard wraps the page service only; /health stays reachable.
    let guarded_pages = ServiceBuilder::new()
        .layer(middleware::from_fn_with_state(state.clone(), require_session))
        .service(pages);

    Router::new()
        .route("/health", get(health_check))
        .fallback_service(guarded_pages)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
