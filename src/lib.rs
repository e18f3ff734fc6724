// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! EV Station Portal: dashboard backend for an EV-charging-station operator
//!
//! Drivers browse and reserve stations and top up their wallet;
//! administrators manage stations, connector types, vehicle models and
//! subscriptions. All data lives in a remote REST backend; this crate gates
//! sessions, validates and forwards mutations, and caches reads.

pub mod actions;
pub mod cache;
pub mod config;
pub mod cookies;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod validation;

use cache::TagCache;
use config::Config;
use middleware::gate::RouteTable;
use services::{BackendClient, SessionService};
use std::time::Duration;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub routes: RouteTable,
    pub backend: BackendClient,
    pub sessions: SessionService,
    pub cache: TagCache,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let backend = BackendClient::new(config.api_base_url.clone());
        let sessions = SessionService::new(backend.clone(), config.cookie_secure);
        let routes = RouteTable {
            login_path: config.login_path.clone(),
            dashboard_path: config.dashboard_path.clone(),
            public_paths: config.public_paths.clone(),
        };
        let cache = TagCache::new(Duration::from_secs(config.cache_ttl_secs));

        Self {
            config,
            routes,
            backend,
            sessions,
            cache,
        }
    }
}
