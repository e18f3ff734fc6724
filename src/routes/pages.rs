// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Page routes: the login page and dashboard views.
//!
//! Views read through the tag cache so a successful server action is
//! reflected on the next render.

use crate::cache::tags;
use crate::error::{AppError, Result};
use crate::middleware::CurrentSession;
use crate::models::{
    ConnectorType, CurrentUser, Reservation, Session, Station, Subscription, VehicleModel, Wallet,
};
use crate::services::BackendError;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

pub fn routes(dashboard_path: &str, login_path: &str) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route(login_path, get(login_page))
        .route(dashboard_path, get(dashboard))
        .route(
            &format!("{dashboard_path}/connector-types"),
            get(connector_types),
        )
        .route(&format!("{dashboard_path}/stations"), get(stations))
        .route(&format!("{dashboard_path}/subscriptions"), get(subscriptions))
        .route(
            &format!("{dashboard_path}/vehicle-models"),
            get(vehicle_models),
        )
        .route(&format!("{dashboard_path}/wallet"), get(wallet))
        .route(&format!("{dashboard_path}/reservations"), get(reservations))
}

fn require(session: &CurrentSession) -> Result<&Session> {
    session.get().ok_or(AppError::Unauthorized)
}

/// Landing page: send users where their session allows.
async fn home(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<CurrentSession>,
) -> Response {
    let target = if session.get().is_some() {
        &state.routes.dashboard_path
    } else {
        &state.routes.login_path
    };
    Redirect::temporary(target).into_response()
}

const LOGIN_PAGE: &str = r#"<!doctype html>
<html lang="vi">
<head><meta charset="utf-8"><title>Đăng nhập</title></head>
<body>
  <h1>Đăng nhập</h1>
  <form method="post" action="/actions/auth/request-otp">
    <label>Email <input type="email" name="email" required></label>
    <button type="submit">Gửi mã OTP</button>
  </form>
  <form method="post" action="/actions/auth/verify-otp">
    <label>Email <input type="email" name="email" required></label>
    <label>Mã OTP <input name="otp" inputmode="numeric" maxlength="6" required></label>
    <button type="submit">Xác nhận</button>
  </form>
</body>
</html>
"#;

async fn login_page() -> Html<&'static str> {
    Html(LOGIN_PAGE)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub user: CurrentUser,
    pub is_admin: bool,
}

async fn dashboard(
    Extension(session): Extension<CurrentSession>,
) -> Result<Json<DashboardResponse>> {
    let session = require(&session)?;
    Ok(Json(DashboardResponse {
        is_admin: session.user.is_admin(),
        user: session.user.clone(),
    }))
}

/// Load a backend collection through the cache.
async fn cached_list<T>(
    state: &AppState,
    session: &Session,
    key: &str,
    tag: &str,
    path: &str,
) -> Result<Json<T>>
where
    T: Serialize + serde::de::DeserializeOwned + Clone + Send + Sync + 'static,
{
    let value = state
        .cache
        .get_or_load(key, tag, || {
            state.backend.get_json::<T>(path, &session.access_token)
        })
        .await
        .map_err(|e| match e {
            BackendError::Status(StatusCode::NOT_FOUND) => AppError::NotFound(path.to_string()),
            other => AppError::Backend(other),
        })?;
    Ok(Json(value))
}

async fn connector_types(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<CurrentSession>,
) -> Result<Json<Vec<ConnectorType>>> {
    let session = require(&session)?;
    cached_list(
        &state,
        session,
        "connector-types:all",
        tags::CONNECTOR_TYPES,
        "/connector-types",
    )
    .await
}

async fn stations(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<CurrentSession>,
) -> Result<Json<Vec<Station>>> {
    let session = require(&session)?;
    cached_list(&state, session, "stations:all", tags::STATIONS, "/stations").await
}

async fn subscriptions(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<CurrentSession>,
) -> Result<Json<Vec<Subscription>>> {
    let session = require(&session)?;
    cached_list(
        &state,
        session,
        "subscriptions:all",
        tags::SUBSCRIPTIONS,
        "/subscriptions",
    )
    .await
}

async fn vehicle_models(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<CurrentSession>,
) -> Result<Json<Vec<VehicleModel>>> {
    let session = require(&session)?;
    cached_list(
        &state,
        session,
        "vehicle-models:all",
        tags::VEHICLE_MODELS,
        "/vehicle-models",
    )
    .await
}

async fn wallet(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<CurrentSession>,
) -> Result<Json<Wallet>> {
    let session = require(&session)?;
    let key = format!("wallet:{}", session.user.uid);
    cached_list(&state, session, &key, tags::WALLET, "/wallet/me").await
}

async fn reservations(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<CurrentSession>,
) -> Result<Json<Vec<Reservation>>> {
    let session = require(&session)?;
    let key = format!("reservations:{}", session.user.uid);
    cached_list(&state, session, &key, tags::RESERVATIONS, "/reservations/me").await
}
