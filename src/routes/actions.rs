// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Form endpoints for server actions.
//!
//! Each handler only extracts the form and the gate's session, then hands
//! off to the matching function in `crate::actions`.

use crate::actions::{
    self,
    auth::{RequestOtpForm, VerifyOtpForm},
    connector_types::{CreateConnectorTypeForm, DeleteConnectorTypeForm, UpdateConnectorTypeForm},
    stations::{CreateStationForm, DeleteStationForm, ReserveStationForm, UpdateStationForm},
    subscriptions::{CreateSubscriptionForm, DeleteSubscriptionForm, UpdateSubscriptionForm},
    vehicle_models::{CreateVehicleModelForm, DeleteVehicleModelForm, UpdateVehicleModelForm},
    wallet::TopUpForm,
    ActionReply,
};
use crate::middleware::CurrentSession;
use crate::AppState;
use axum::{extract::State, routing::post, Extension, Form, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/actions/auth/request-otp", post(request_otp_handler))
        .route("/actions/auth/verify-otp", post(verify_otp_handler))
        .route("/actions/connector-types/create", post(create_connector_type))
        .route("/actions/connector-types/update", post(update_connector_type))
        .route("/actions/connector-types/delete", post(delete_connector_type))
        .route("/actions/stations/create", post(create_station))
        .route("/actions/stations/update", post(update_station))
        .route("/actions/stations/delete", post(delete_station))
        .route("/actions/stations/reserve", post(reserve_station))
        .route("/actions/subscriptions/create", post(create_subscription))
        .route("/actions/subscriptions/update", post(update_subscription))
        .route("/actions/subscriptions/delete", post(delete_subscription))
        .route("/actions/vehicle-models/create", post(create_vehicle_model))
        .route("/actions/vehicle-models/update", post(update_vehicle_model))
        .route("/actions/vehicle-models/delete", post(delete_vehicle_model))
        .route("/actions/wallet/top-up", post(top_up_wallet))
}

type St = State<Arc<AppState>>;
type Sess = Extension<CurrentSession>;

// ─── Auth ────────────────────────────────────────────────────

async fn request_otp_handler(State(state): St, Form(form): Form<RequestOtpForm>) -> ActionReply {
    actions::auth::request_otp(&state, form).await
}

async fn verify_otp_handler(State(state): St, Form(form): Form<VerifyOtpForm>) -> ActionReply {
    actions::auth::verify_otp(&state, form).await
}

// ─── Connector Types ─────────────────────────────────────────

async fn create_connector_type(
    State(state): St,
    Extension(session): Sess,
    Form(form): Form<CreateConnectorTypeForm>,
) -> ActionReply {
    actions::connector_types::create(&state, session.get(), form).await
}

async fn update_connector_type(
    State(state): St,
    Extension(session): Sess,
    Form(form): Form<UpdateConnectorTypeForm>,
) -> ActionReply {
    actions::connector_types::update(&state, session.get(), form).await
}

async fn delete_connector_type(
    State(state): St,
    Extension(session): Sess,
    Form(form): Form<DeleteConnectorTypeForm>,
) -> ActionReply {
    actions::connector_types::delete(&state, session.get(), form).await
}

// ─── Stations ────────────────────────────────────────────────

async fn create_station(
    State(state): St,
    Extension(session): Sess,
    Form(form): Form<CreateStationForm>,
) -> ActionReply {
    actions::stations::create(&state, session.get(), form).await
}

async fn update_station(
    State(state): St,
    Extension(session): Sess,
    Form(form): Form<UpdateStationForm>,
) -> ActionReply {
    actions::stations::update(&state, session.get(), form).await
}

async fn delete_station(
    State(state): St,
    Extension(session): Sess,
    Form(form): Form<DeleteStationForm>,
) -> ActionReply {
    actions::stations::delete(&state, session.get(), form).await
}

async fn reserve_station(
    State(state): St,
    Extension(session): Sess,
    Form(form): Form<ReserveStationForm>,
) -> ActionReply {
    actions::stations::reserve(&state, session.get(), form).await
}

// ─── Subscriptions ───────────────────────────────────────────

async fn create_subscription(
    State(state): St,
    Extension(session): Sess,
    Form(form): Form<CreateSubscriptionForm>,
) -> ActionReply {
    actions::subscriptions::create(&state, session.get(), form).await
}

async fn update_subscription(
    State(state): St,
    Extension(session): Sess,
    Form(form): Form<UpdateSubscriptionForm>,
) -> ActionReply {
    actions::subscriptions::update(&state, session.get(), form).await
}

async fn delete_subscription(
    State(state): St,
    Extension(session): Sess,
    Form(form): Form<DeleteSubscriptionForm>,
) -> ActionReply {
    actions::subscriptions::delete(&state, session.get(), form).await
}

// ─── Vehicle Models ──────────────────────────────────────────

async fn create_vehicle_model(
    State(state): St,
    Extension(session): Sess,
    Form(form): Form<CreateVehicleModelForm>,
) -> ActionReply {
    actions::vehicle_models::create(&state, session.get(), form).await
}

async fn update_vehicle_model(
    State(state): St,
    Extension(session): Sess,
    Form(form): Form<UpdateVehicleModelForm>,
) -> ActionReply {
    actions::vehicle_models::update(&state, session.get(), form).await
}

async fn delete_vehicle_model(
    State(state): St,
    Extension(session): Sess,
    Form(form): Form<DeleteVehicleModelForm>,
) -> ActionReply {
    actions::vehicle_models::delete(&state, session.get(), form).await
}

// ─── Wallet ──────────────────────────────────────────────────

async fn top_up_wallet(
    State(state): St,
    Extension(session): Sess,
    Form(form): Form<TopUpForm>,
) -> ActionReply {
    actions::wallet::top_up(&state, session.get(), form).await
}
