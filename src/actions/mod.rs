// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Server actions: validated, authenticated, single-purpose mutations.
//!
//! Every action follows the same contract:
//! 1. Authorize via [`authorize`] with the action's [`OnUnauthenticated`] policy
//! 2. Validate the form; on failure return without any network call
//! 3. Issue exactly one backend request with bearer auth
//! 4. Map transport errors and non-success statuses to an [`ActionResult`]
//! 5. On success, revalidate the collection's cache tags
//!
//! Actions never return errors. Redirecting actions stage their target in a
//! [`Navigation`] and resolve it once, after the result has been produced.

pub mod auth;
pub mod connector_types;
pub mod stations;
pub mod subscriptions;
pub mod vehicle_models;
pub mod wallet;

use crate::cookies::StagedCookies;
use crate::error::AppError;
use crate::models::Session;
use crate::services::backend::BackendError;
use crate::validation;
use crate::AppState;
use axum::{
    response::{IntoResponse, Redirect, Response},
    Json,
};
use reqwest::RequestBuilder;
use serde::Serialize;
use validator::Validate;

/// Shown for every transport failure.
pub const NETWORK_ERROR_MSG: &str = "Lỗi mạng hoặc máy chủ.";
/// Shown when an action with the `Fail` policy runs without a session.
pub const UNAUTHENTICATED_MSG: &str = "Bạn chưa đăng nhập.";

/// Structured result returned to the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionResult {
    pub success: bool,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ActionResult {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            success: true,
            msg: msg.into(),
            data: None,
        }
    }

    pub fn failure(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            msg: msg.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Navigation staged by a redirecting action.
#[derive(Debug, Clone)]
pub struct Redirection {
    pub target: String,
    pub cookies: StagedCookies,
}

/// What an action hands back to the router.
#[derive(Debug)]
pub enum ActionReply {
    Result(ActionResult),
    Redirect(Redirection),
    Forbidden,
}

impl ActionReply {
    /// The structured result, if this reply carries one.
    pub fn result(&self) -> Option<&ActionResult> {
        match self {
            ActionReply::Result(result) => Some(result),
            _ => None,
        }
    }
}

impl From<ActionResult> for ActionReply {
    fn from(result: ActionResult) -> Self {
        ActionReply::Result(result)
    }
}

impl IntoResponse for ActionReply {
    fn into_response(self) -> Response {
        match self {
            ActionReply::Result(result) => Json(result).into_response(),
            ActionReply::Redirect(redirection) => {
                let mut response = Redirect::to(&redirection.target).into_response();
                redirection.cookies.apply(response.headers_mut());
                response
            }
            ActionReply::Forbidden => AppError::Forbidden.into_response(),
        }
    }
}

/// What an action does when there is no session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnUnauthenticated {
    /// Return `{ success: false, msg: UNAUTHENTICATED_MSG }`.
    Fail,
    /// Abort with the forbidden page.
    Forbid,
}

/// Outcome of an action's auth check.
#[derive(Debug, Clone, Copy)]
pub enum AuthResult<'a> {
    Authenticated(&'a Session),
    Unauthenticated,
}

impl<'a> From<Option<&'a Session>> for AuthResult<'a> {
    fn from(session: Option<&'a Session>) -> Self {
        match session {
            Some(session) => AuthResult::Authenticated(session),
            None => AuthResult::Unauthenticated,
        }
    }
}

impl<'a> AuthResult<'a> {
    pub fn or_reply(self, policy: OnUnauthenticated) -> Result<&'a Session, ActionReply> {
        match (self, policy) {
            (AuthResult::Authenticated(session), _) => Ok(session),
            (AuthResult::Unauthenticated, OnUnauthenticated::Fail) => {
                Err(ActionResult::failure(UNAUTHENTICATED_MSG).into())
            }
            (AuthResult::Unauthenticated, OnUnauthenticated::Forbid) => {
                Err(ActionReply::Forbidden)
            }
        }
    }
}

/// First step of every authenticated action.
pub fn authorize(
    session: Option<&Session>,
    policy: OnUnauthenticated,
) -> Result<&Session, ActionReply> {
    AuthResult::from(session).or_reply(policy)
}

/// Validate a submitted form, describing every violated rule on failure.
pub fn check_form<T: Validate>(form: &T) -> Result<(), ActionResult> {
    form.validate().map_err(|errors| {
        let msg = validation::describe(&errors);
        tracing::debug!(msg = %msg, "Form rejected");
        ActionResult::failure(msg)
    })
}

/// Messages and cache tags for one mutation.
#[derive(Debug, Clone, Copy)]
pub struct Outcome {
    pub operation: &'static str,
    pub success: &'static str,
    pub failure: &'static str,
    pub tags: &'static [&'static str],
}

/// Send the backend request, mapping failures to the action's messages.
pub async fn dispatch(
    state: &AppState,
    request: RequestBuilder,
    outcome: &Outcome,
) -> Result<reqwest::Response, ActionResult> {
    match state.backend.execute(request).await {
        Ok(response) => Ok(response),
        Err(BackendError::Status(status)) => {
            tracing::warn!(
                operation = outcome.operation,
                status = status.as_u16(),
                "Backend rejected action"
            );
            Err(ActionResult::failure(outcome.failure))
        }
        Err(e) => {
            tracing::error!(operation = outcome.operation, error = %e, "Action request failed");
            Err(ActionResult::failure(NETWORK_ERROR_MSG))
        }
    }
}

/// Revalidate the outcome's tags and build the success result.
pub fn succeed(state: &AppState, outcome: &Outcome) -> ActionResult {
    for tag in outcome.tags {
        state.cache.revalidate_tag(tag);
    }
    tracing::info!(operation = outcome.operation, "Action succeeded");
    ActionResult::success(outcome.success)
}

/// Dispatch a mutation whose response body is not needed.
pub async fn mutate(state: &AppState, request: RequestBuilder, outcome: &Outcome) -> ActionResult {
    match dispatch(state, request, outcome).await {
        Ok(_) => succeed(state, outcome),
        Err(result) => result,
    }
}

/// Redirect staged during an action, resolved exactly once by [`Navigation::finish`].
#[derive(Debug, Default)]
pub struct Navigation {
    target: Option<String>,
    cookies: StagedCookies,
}

impl Navigation {
    pub fn redirect_to(&mut self, target: impl Into<String>) {
        self.target = Some(target.into());
    }

    pub fn cookies_mut(&mut self) -> &mut StagedCookies {
        &mut self.cookies
    }

    /// Perform the staged redirect if any, otherwise return the result.
    pub fn finish(self, result: ActionResult) -> ActionReply {
        match self.target {
            Some(target) => {
                tracing::debug!(target = %target, "Action redirecting");
                ActionReply::Redirect(Redirection {
                    target,
                    cookies: self.cookies,
                })
            }
            None => result.into(),
        }
    }
}
