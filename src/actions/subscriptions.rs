// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Subscription plan administration.
//!
//! Unauthenticated calls abort with the forbidden page rather than
//! returning a failure result.

use super::{authorize, check_form, mutate, ActionReply, OnUnauthenticated, Outcome};
use crate::cache::tags;
use crate::models::Session;
use crate::services::backend::resource_path;
use crate::validation;
use crate::AppState;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use validator::Validate;

const COLLECTION: &str = "/subscriptions";

const CREATE: Outcome = Outcome {
    operation: "subscription.create",
    success: "Tạo gói đăng ký thành công.",
    failure: "Tạo gói đăng ký thất bại.",
    tags: &[tags::SUBSCRIPTIONS],
};

const UPDATE: Outcome = Outcome {
    operation: "subscription.update",
    success: "Cập nhật gói đăng ký thành công.",
    failure: "Cập nhật gói đăng ký thất bại.",
    tags: &[tags::SUBSCRIPTIONS],
};

const DELETE: Outcome = Outcome {
    operation: "subscription.delete",
    success: "Xóa gói đăng ký thành công.",
    failure: "Xóa gói đăng ký thất bại.",
    tags: &[tags::SUBSCRIPTIONS],
};

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateSubscriptionForm {
    #[validate(custom(function = "validation::required", message = "Tên gói là bắt buộc"))]
    pub name: String,
    #[validate(custom(
        function = "validation::non_negative_number",
        message = "Giá gói phải là số không âm"
    ))]
    pub price: String,
    #[validate(custom(
        function = "validation::positive_integer",
        message = "Thời hạn gói phải là số nguyên dương"
    ))]
    pub duration_days: String,
    pub description: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateSubscriptionForm {
    #[validate(custom(function = "validation::required", message = "ID gói là bắt buộc"))]
    pub id: String,
    #[validate(custom(function = "validation::required", message = "Tên gói là bắt buộc"))]
    pub name: String,
    #[validate(custom(
        function = "validation::non_negative_number",
        message = "Giá gói phải là số không âm"
    ))]
    pub price: String,
    #[validate(custom(
        function = "validation::positive_integer",
        message = "Thời hạn gói phải là số nguyên dương"
    ))]
    pub duration_days: String,
    pub description: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteSubscriptionForm {
    #[validate(custom(function = "validation::required", message = "ID gói là bắt buộc"))]
    pub id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SubscriptionPayload<'a> {
    name: &'a str,
    price: f64,
    duration_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

impl<'a> SubscriptionPayload<'a> {
    fn new(name: &'a str, price: &str, duration_days: &str, description: &'a str) -> Self {
        let description = description.trim();
        Self {
            name: name.trim(),
            price: validation::number(price),
            duration_days: validation::integer(duration_days),
            description: (!description.is_empty()).then_some(description),
        }
    }
}

pub async fn create(
    state: &AppState,
    session: Option<&Session>,
    form: CreateSubscriptionForm,
) -> ActionReply {
    let session = match authorize(session, OnUnauthenticated::Forbid) {
        Ok(session) => session,
        Err(reply) => return reply,
    };
    if let Err(result) = check_form(&form) {
        return result.into();
    }

    let payload =
        SubscriptionPayload::new(&form.name, &form.price, &form.duration_days, &form.description);
    let request = state
        .backend
        .request(Method::POST, COLLECTION, Some(&session.access_token))
        .json(&payload);

    mutate(state, request, &CREATE).await.into()
}

pub async fn update(
    state: &AppState,
    session: Option<&Session>,
    form: UpdateSubscriptionForm,
) -> ActionReply {
    let session = match authorize(session, OnUnauthenticated::Forbid) {
        Ok(session) => session,
        Err(reply) => return reply,
    };
    if let Err(result) = check_form(&form) {
        return result.into();
    }

    let payload =
        SubscriptionPayload::new(&form.name, &form.price, &form.duration_days, &form.description);
    let request = state
        .backend
        .request(
            Method::PUT,
            &resource_path(COLLECTION, form.id.trim()),
            Some(&session.access_token),
        )
        .json(&payload);

    mutate(state, request, &UPDATE).await.into()
}

pub async fn delete(
    state: &AppState,
    session: Option<&Session>,
    form: DeleteSubscriptionForm,
) -> ActionReply {
    let session = match authorize(session, OnUnauthenticated::Forbid) {
        Ok(session) => session,
        Err(reply) => return reply,
    };
    if let Err(result) = check_form(&form) {
        return result.into();
    }

    let request = state.backend.request(
        Method::DELETE,
        &resource_path(COLLECTION, form.id.trim()),
        Some(&session.access_token),
    );

    mutate(state, request, &DELETE).await.into()
}
