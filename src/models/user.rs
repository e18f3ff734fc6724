// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session-scoped user and token models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User profile resolved from an access token by the identity endpoint.
///
/// Exists only for the duration of one request; never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "PascalCase"))]
pub struct CurrentUser {
    pub uid: String,
    pub email: String,
    pub role: String,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case("admin")
    }
}

/// Access/refresh pair issued by OTP verification and token refresh.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires: DateTime<Utc>,
    pub refresh_expires: DateTime<Utc>,
}

/// The authenticated session for one request.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub user: CurrentUser,
}
