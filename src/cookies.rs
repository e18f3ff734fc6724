// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Auth cookie names, attributes, and the outgoing cookie jar.
//!
//! Incoming cookies are read with `axum_extra`'s `CookieJar`. Outgoing
//! changes are staged in [`StagedCookies`] and written as `Set-Cookie`
//! headers once the final response is known.

use crate::models::TokenPair;
use axum::http::{header, HeaderMap, HeaderValue};
use axum_extra::extract::cookie::{Cookie, SameSite};
use time::{Duration, OffsetDateTime};

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// 15 minutes.
pub const ACCESS_TOKEN_MAX_AGE_SECS: i64 = 15 * 60;
/// 30 days.
pub const REFRESH_TOKEN_MAX_AGE_SECS: i64 = 30 * 24 * 60 * 60;

/// Attributes applied when setting a cookie.
#[derive(Debug, Clone, Copy)]
pub struct CookieOptions {
    pub max_age: Duration,
    pub expires: Option<OffsetDateTime>,
    pub http_only: bool,
    pub secure: bool,
}

/// Read/write access to a cookie jar.
pub trait CookieStore {
    fn get(&self, name: &str) -> Option<&str>;
    fn set(&mut self, name: &str, value: &str, options: CookieOptions);
    fn delete(&mut self, name: &str);
}

/// Cookie changes staged for an outgoing response, in the order made.
#[derive(Debug, Clone, Default)]
pub struct StagedCookies {
    cookies: Vec<Cookie<'static>>,
}

impl StagedCookies {
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// True if the latest change to `name` is a deletion.
    pub fn is_deleted(&self, name: &str) -> bool {
        self.latest(name).is_some_and(is_removal)
    }

    fn latest(&self, name: &str) -> Option<&Cookie<'static>> {
        self.cookies.iter().rev().find(|c| c.name() == name)
    }

    /// Append one `Set-Cookie` header per staged change.
    pub fn apply(&self, headers: &mut HeaderMap) {
        for cookie in &self.cookies {
            match HeaderValue::from_str(&cookie.to_string()) {
                Ok(value) => {
                    headers.append(header::SET_COOKIE, value);
                }
                Err(e) => {
                    tracing::warn!(cookie = cookie.name(), error = %e, "Dropping unencodable cookie");
                }
            }
        }
    }

    /// Like [`apply`](Self::apply), but skips cookies the response already
    /// sets. A handler's own cookies take precedence over staged ones.
    pub fn apply_unset(&self, headers: &mut HeaderMap) {
        let already_set: Vec<String> = headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| Cookie::parse(value).ok())
            .map(|cookie| cookie.name().to_string())
            .collect();

        let mut remaining = self.clone();
        remaining
            .cookies
            .retain(|c| !already_set.iter().any(|name| name == c.name()));
        if remaining.cookies.len() < self.cookies.len() {
            tracing::debug!("Handler set auth cookies; dropping staged rotation");
        }
        remaining.apply(headers);
    }

    /// Stage both auth cookies from a freshly issued token pair.
    pub fn set_token_pair(&mut self, pair: &TokenPair, secure: bool) {
        self.set(
            ACCESS_TOKEN_COOKIE,
            &pair.access_token,
            CookieOptions {
                max_age: Duration::seconds(ACCESS_TOKEN_MAX_AGE_SECS),
                expires: to_offset(pair.access_expires),
                http_only: true,
                secure,
            },
        );
        self.set(
            REFRESH_TOKEN_COOKIE,
            &pair.refresh_token,
            CookieOptions {
                max_age: Duration::seconds(REFRESH_TOKEN_MAX_AGE_SECS),
                expires: to_offset(pair.refresh_expires),
                http_only: true,
                secure,
            },
        );
    }
}

impl CookieStore for StagedCookies {
    fn get(&self, name: &str) -> Option<&str> {
        self.latest(name)
            .filter(|c| !is_removal(c))
            .map(|c| c.value())
    }

    fn set(&mut self, name: &str, value: &str, options: CookieOptions) {
        let mut cookie = Cookie::build((name.to_string(), value.to_string()))
            .path("/")
            .same_site(SameSite::Lax)
            .http_only(options.http_only)
            .secure(options.secure)
            .max_age(options.max_age)
            .build();
        if let Some(expires) = options.expires {
            cookie.set_expires(expires);
        }
        self.cookies.push(cookie);
    }

    fn delete(&mut self, name: &str) {
        let mut cookie = Cookie::build((name.to_string(), String::new()))
            .path("/")
            .same_site(SameSite::Lax)
            .http_only(true)
            .build();
        cookie.make_removal();
        self.cookies.push(cookie);
    }
}

fn is_removal(cookie: &Cookie<'_>) -> bool {
    cookie.max_age() == Some(Duration::ZERO)
}

fn to_offset(at: chrono::DateTime<chrono::Utc>) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp(at.timestamp()).ok()
}
