// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared test helpers: an in-process fake of the remote backend that
//! records every call it receives.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Method, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use ev_station_portal::config::Config;
use ev_station_portal::models::{CurrentUser, Session};
use ev_station_portal::routes::create_router;
use ev_station_portal::AppState;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// One request received by the fake backend.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub bearer: Option<String>,
    pub body: String,
}

impl RecordedCall {
    #[allow(dead_code)]
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

type Responder = Arc<dyn Fn(&RecordedCall) -> (StatusCode, Value) + Send + Sync>;

#[derive(Clone)]
struct FakeState {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    responder: Responder,
}

/// Handle to a running fake backend.
pub struct FakeBackend {
    pub base_url: String,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

#[allow(dead_code)]
impl FakeBackend {
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_to(&self, method: Method, path: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == method && c.path == path)
            .collect()
    }
}

async fn record(
    State(fake): State<FakeState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string);

    let call = RecordedCall {
        method,
        path: uri.path().to_string(),
        bearer,
        body,
    };
    let (status, value) = (fake.responder)(&call);
    fake.calls.lock().unwrap().push(call);

    (status, Json(value)).into_response()
}

/// Start a fake backend answering every request with `responder`.
pub async fn spawn_backend<F>(responder: F) -> FakeBackend
where
    F: Fn(&RecordedCall) -> (StatusCode, Value) + Send + Sync + 'static,
{
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake backend");
    let addr = listener.local_addr().unwrap();

    let calls = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new().fallback(record).with_state(FakeState {
        calls: calls.clone(),
        responder: Arc::new(responder),
    });

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    FakeBackend {
        base_url: format!("http://{addr}"),
        calls,
    }
}

/// A backend URL nothing is listening on.
#[allow(dead_code)]
pub async fn unreachable_backend_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

#[allow(dead_code)]
pub fn test_state(base_url: &str) -> Arc<AppState> {
    Arc::new(AppState::new(Config::for_backend(base_url)))
}

/// Create a test app against the given backend.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(base_url: &str) -> (Router, Arc<AppState>) {
    let state = test_state(base_url);
    (create_router(state.clone()), state)
}

pub const VALID_TOKEN: &str = "valid-access";

#[allow(dead_code)]
pub fn session() -> Session {
    Session {
        access_token: VALID_TOKEN.to_string(),
        user: CurrentUser {
            uid: "u-1".to_string(),
            email: "minh@evgo.vn".to_string(),
            role: "Admin".to_string(),
            name: "Minh".to_string(),
            avatar: None,
        },
    }
}

#[allow(dead_code)]
pub fn user_json(uid: &str) -> Value {
    json!({
        "Uid": uid,
        "Email": "minh@evgo.vn",
        "Role": "Admin",
        "Name": "Minh",
        "Avatar": null
    })
}

#[allow(dead_code)]
pub fn token_pair_json(access: &str, refresh: &str) -> Value {
    json!({
        "AccessToken": access,
        "RefreshToken": refresh,
        "AccessExpires": "2030-01-01T00:15:00Z",
        "RefreshExpires": "2030-01-31T00:00:00Z"
    })
}

/// Answer `/auth/me` for `VALID_TOKEN` and 401 otherwise; delegate the rest.
#[allow(dead_code)]
pub fn with_identity<F>(
    rest: F,
) -> impl Fn(&RecordedCall) -> (StatusCode, Value) + Send + Sync + 'static
where
    F: Fn(&RecordedCall) -> (StatusCode, Value) + Send + Sync + 'static,
{
    move |call: &RecordedCall| {
        if call.path == "/auth/me" {
            return match call.bearer.as_deref() {
                Some(VALID_TOKEN) => (StatusCode::OK, user_json("u-1")),
                _ => (StatusCode::UNAUTHORIZED, json!({})),
            };
        }
        rest(call)
    }
}

#[allow(dead_code)]
pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub fn post_form(uri: &str, cookie: Option<&str>, form: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(form.to_string())).unwrap()
}

#[allow(dead_code)]
pub fn set_cookie_headers(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

#[allow(dead_code)]
pub fn find_cookie(headers: &[String], name: &str) -> Option<String> {
    headers
        .iter()
        .find(|value| value.starts_with(&format!("{name}=")))
        .cloned()
}

#[allow(dead_code)]
pub fn location(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string())
}

#[allow(dead_code)]
pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
