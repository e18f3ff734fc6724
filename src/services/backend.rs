// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client for the remote REST backend.
//!
//! Handles:
//! - OTP login and token refresh
//! - Identity lookup for the current access token
//! - Bearer-authenticated CRUD requests issued by server actions

use crate::models::{CurrentUser, TokenPair};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;

/// Failure talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The request never completed (DNS, connect, reset, ...).
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned HTTP {0}")]
    Status(StatusCode),

    /// The body of a successful response could not be parsed.
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Remote backend client.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request against `path`, bearer-authenticated when a token is given.
    pub fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and return the response if its status is a success.
    pub async fn execute(&self, request: RequestBuilder) -> Result<reqwest::Response, BackendError> {
        let response = request.send().await.map_err(BackendError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status));
        }
        Ok(response)
    }

    /// Send a request and parse its JSON body.
    pub async fn execute_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, BackendError> {
        let response = self.execute(request).await?;
        response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    /// Bearer-authenticated GET with JSON response.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        access_token: &str,
    ) -> Result<T, BackendError> {
        self.execute_json(self.request(Method::GET, path, Some(access_token)))
            .await
    }

    /// Ask the backend to email a one-time password.
    pub async fn request_otp(&self, email: &str) -> Result<(), BackendError> {
        let request = self
            .request(Method::POST, "/auth/request-otp", None)
            .json(&json!({ "Email": email }));
        self.execute(request).await?;
        Ok(())
    }

    /// Exchange an email + OTP for a token pair.
    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<TokenPair, BackendError> {
        let request = self
            .request(Method::POST, "/auth/verify-otp", None)
            .json(&json!({ "Email": email, "Otp": otp }));
        self.execute_json(request).await
    }

    /// Exchange a refresh token for a new token pair.
    pub async fn refresh_tokens(&self, refresh_token: &str) -> Result<TokenPair, BackendError> {
        let request = self
            .request(Method::POST, "/auth/refresh-token", None)
            .json(&json!({ "RefreshToken": refresh_token }));
        self.execute_json(request).await
    }

    /// Resolve the profile behind an access token.
    pub async fn current_user(&self, access_token: &str) -> Result<CurrentUser, BackendError> {
        self.get_json("/auth/me", access_token).await
    }
}

/// Build `/{collection}/{id}` with the id percent-encoded.
pub fn resource_path(collection: &str, id: &str) -> String {
    format!("{}/{}", collection, urlencoding::encode(id))
}
