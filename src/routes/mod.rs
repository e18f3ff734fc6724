// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod actions;
pub mod pages;

use crate::middleware::{gate::session_gate, security::add_security_headers};
use crate::AppState;
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
    })
}

/// Build the complete router with all routes.
///
/// Every request passes through the session gate, which decides from the
/// route table whether a missing session redirects to the login page.
pub fn create_router(state: Arc<AppState>) -> Router {
    let pages = pages::routes(&state.routes.dashboard_path, &state.routes.login_path);

    Router::new()
        .route("/health", get(health_check))
        .merge(pages)
        .merge(actions::routes())
        .layer(middleware::from_fn_with_state(state.clone(), session_gate))
        .layer(middleware::from_fn(add_security_headers))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
