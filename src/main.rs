// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! EV Station Portal server
//!
//! Serves the charging-operator dashboard and forwards its server actions
//! to the remote REST backend.

use anyhow::Context;
use ev_station_portal::{config::Config, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        port = config.port,
        backend = %config.api_base_url,
        "Starting EV Station Portal"
    );
    if !config.cookie_secure {
        tracing::warn!("COOKIE_SECURE is off; session cookies will be sent over plain HTTP");
    }

    let port = config.port;
    let state = Arc::new(AppState::new(config));

    // Build router
    let app = ev_station_portal::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ev_station_portal=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
