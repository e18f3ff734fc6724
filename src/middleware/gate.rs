// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session gate: authentication-based routing for every request.
//!
//! Runs the refresh handler, resolves the user with the effective access
//! token, then applies [`decide`]. This is the only place that redirects on
//! session state and the only place that deletes auth cookies.

use crate::cookies::{CookieStore, StagedCookies, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
use crate::models::Session;
use crate::services::session::cookie_value;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// How a path is treated by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Login,
    Public,
    Protected,
}

/// The single terminal state of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    PassThrough,
    RedirectToLogin,
    RedirectToDashboard,
}

/// Static route classification.
#[derive(Debug, Clone)]
pub struct RouteTable {
    pub login_path: String,
    pub dashboard_path: String,
    pub public_paths: Vec<String>,
}

impl RouteTable {
    pub fn classify(&self, path: &str) -> RouteClass {
        if path == self.login_path {
            return RouteClass::Login;
        }
        if self
            .public_paths
            .iter()
            .any(|public| path_matches(public, path))
        {
            return RouteClass::Public;
        }
        RouteClass::Protected
    }
}

/// `/` matches only itself; other entries also match their sub-paths.
fn path_matches(public: &str, path: &str) -> bool {
    if path == public {
        return true;
    }
    let prefix = public.trim_end_matches('/');
    !prefix.is_empty()
        && path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Decide the outcome for a classified route.
pub fn decide(route: RouteClass, authenticated: bool) -> GateDecision {
    match (route, authenticated) {
        (RouteClass::Login, true) => GateDecision::RedirectToDashboard,
        (RouteClass::Login, false) => GateDecision::PassThrough,
        (RouteClass::Public, _) => GateDecision::PassThrough,
        (RouteClass::Protected, true) => GateDecision::PassThrough,
        (RouteClass::Protected, false) => GateDecision::RedirectToLogin,
    }
}

/// Session resolved by the gate, available to handlers as an extension.
#[derive(Debug, Clone, Default)]
pub struct CurrentSession(pub Option<Session>);

impl CurrentSession {
    pub fn get(&self) -> Option<&Session> {
        self.0.as_ref()
    }
}

/// Middleware applying the session gate.
pub async fn session_gate(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let refreshed = state.sessions.refresh(&jar).await;

    // A rotation just happened if the refresh staged a new access token.
    let access_token = refreshed
        .cookies
        .get(ACCESS_TOKEN_COOKIE)
        .map(str::to_string)
        .or_else(|| cookie_value(&jar, ACCESS_TOKEN_COOKIE));

    let user = match (&refreshed.probe, &access_token) {
        (Some((probed, user)), Some(token)) if probed == token => user.clone(),
        _ => state.sessions.resolve_user(access_token.as_deref()).await,
    };

    let path = request.uri().path().to_string();
    let route = state.routes.classify(&path);
    let decision = decide(route, user.is_some());
    tracing::debug!(path = %path, ?route, ?decision, "Session gate");

    match decision {
        GateDecision::PassThrough => {
            let session = match (access_token, user) {
                (Some(access_token), Some(user)) => Some(Session { access_token, user }),
                _ => None,
            };
            request.extensions_mut().insert(CurrentSession(session));

            let mut response = next.run(request).await;
            refreshed.cookies.apply_unset(response.headers_mut());
            response
        }
        GateDecision::RedirectToDashboard => {
            Redirect::temporary(&state.routes.dashboard_path).into_response()
        }
        GateDecision::RedirectToLogin => {
            let mut cleared = StagedCookies::default();
            cleared.delete(ACCESS_TOKEN_COOKIE);
            cleared.delete(REFRESH_TOKEN_COOKIE);

            let mut response = Redirect::temporary(&state.routes.login_path).into_response();
            cleared.apply(response.headers_mut());
            response
        }
    }
}
