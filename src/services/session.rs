// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session refresh and user resolution.
//!
//! Both collaborators fail closed: they never return errors, and a broken
//! backend looks exactly like an unauthenticated request.

use crate::cookies::{StagedCookies, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
use crate::models::CurrentUser;
use crate::services::backend::{BackendClient, BackendError};
use axum_extra::extract::cookie::CookieJar;

/// Result of running the refresh handler against a request.
#[derive(Debug, Default)]
pub struct RefreshOutcome {
    /// Cookies to set on the outgoing response (only ever sets, never deletes).
    pub cookies: StagedCookies,
    /// The request's own access token and what it resolved to, if it was probed.
    pub probe: Option<(String, Option<CurrentUser>)>,
}

/// Rotates expired sessions and resolves access tokens to users.
#[derive(Clone)]
pub struct SessionService {
    backend: BackendClient,
    cookie_secure: bool,
}

impl SessionService {
    pub fn new(backend: BackendClient, cookie_secure: bool) -> Self {
        Self {
            backend,
            cookie_secure,
        }
    }

    /// Inspect the request's tokens and rotate them if needed.
    ///
    /// A present access token is probed once against the identity endpoint.
    /// If it is missing or rejected and a refresh token exists, the pair is
    /// exchanged and both new cookies are staged.
    pub async fn refresh(&self, jar: &CookieJar) -> RefreshOutcome {
        let mut outcome = RefreshOutcome::default();

        if let Some(access_token) = cookie_value(jar, ACCESS_TOKEN_COOKIE) {
            let user = self.resolve_user(Some(&access_token)).await;
            let valid = user.is_some();
            outcome.probe = Some((access_token, user));
            if valid {
                return outcome;
            }
        }

        let Some(refresh_token) = cookie_value(jar, REFRESH_TOKEN_COOKIE) else {
            return outcome;
        };

        match self.backend.refresh_tokens(&refresh_token).await {
            Ok(pair) => {
                tracing::debug!("Session tokens rotated");
                outcome.cookies.set_token_pair(&pair, self.cookie_secure);
            }
            Err(BackendError::Status(status)) => {
                tracing::info!(status = status.as_u16(), "Refresh token rejected");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh failed");
            }
        }

        outcome
    }

    /// Resolve an access token to a user, or `None` if it cannot be.
    pub async fn resolve_user(&self, access_token: Option<&str>) -> Option<CurrentUser> {
        let token = access_token.filter(|t| !t.is_empty())?;

        match self.backend.current_user(token).await {
            Ok(user) => Some(user),
            Err(BackendError::Status(status)) => {
                tracing::debug!(status = status.as_u16(), "Access token not accepted");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "User resolution failed");
                None
            }
        }
    }
}

/// Non-empty value of a request cookie.
pub fn cookie_value(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}
