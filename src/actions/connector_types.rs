// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Connector type administration.

use super::{authorize, check_form, mutate, ActionReply, OnUnauthenticated, Outcome};
use crate::cache::tags;
use crate::models::Session;
use crate::services::backend::resource_path;
use crate::validation;
use crate::AppState;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use validator::Validate;

const COLLECTION: &str = "/connector-types";

const CREATE: Outcome = Outcome {
    operation: "connector_type.create",
    success: "Tạo cổng kết nối thành công.",
    failure: "Tạo cổng kết nối thất bại.",
    tags: &[tags::CONNECTOR_TYPES],
};

const UPDATE: Outcome = Outcome {
    operation: "connector_type.update",
    success: "Cập nhật cổng kết nối thành công.",
    failure: "Cập nhật cổng kết nối thất bại.",
    tags: &[tags::CONNECTOR_TYPES],
};

const DELETE: Outcome = Outcome {
    operation: "connector_type.delete",
    success: "Xóa cổng kết nối thành công.",
    failure: "Xóa cổng kết nối thất bại.",
    tags: &[tags::CONNECTOR_TYPES],
};

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateConnectorTypeForm {
    #[validate(custom(
        function = "validation::required",
        message = "Tên cổng kết nối là bắt buộc"
    ))]
    pub name: String,
    #[validate(custom(
        function = "validation::positive_number",
        message = "Công suất tối đa phải là số dương"
    ))]
    pub max_power_kw: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateConnectorTypeForm {
    #[validate(custom(
        function = "validation::required",
        message = "ID cổng kết nối là bắt buộc"
    ))]
    pub id: String,
    #[validate(custom(
        function = "validation::required",
        message = "Tên cổng kết nối là bắt buộc"
    ))]
    pub name: String,
    #[validate(custom(
        function = "validation::positive_number",
        message = "Công suất tối đa phải là số dương"
    ))]
    pub max_power_kw: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteConnectorTypeForm {
    #[validate(custom(
        function = "validation::required",
        message = "ID cổng kết nối là bắt buộc"
    ))]
    pub id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ConnectorTypePayload<'a> {
    name: &'a str,
    max_power_kw: f64,
}

pub async fn create(
    state: &AppState,
    session: Option<&Session>,
    form: CreateConnectorTypeForm,
) -> ActionReply {
    let session = match authorize(session, OnUnauthenticated::Fail) {
        Ok(session) => session,
        Err(reply) => return reply,
    };
    if let Err(result) = check_form(&form) {
        return result.into();
    }

    let payload = ConnectorTypePayload {
        name: form.name.trim(),
        max_power_kw: validation::number(&form.max_power_kw),
    };
    let request = state
        .backend
        .request(Method::POST, COLLECTION, Some(&session.access_token))
        .json(&payload);

    mutate(state, request, &CREATE).await.into()
}

pub async fn update(
    state: &AppState,
    session: Option<&Session>,
    form: UpdateConnectorTypeForm,
) -> ActionReply {
    let session = match authorize(session, OnUnauthenticated::Fail) {
        Ok(session) => session,
        Err(reply) => return reply,
    };
    if let Err(result) = check_form(&form) {
        return result.into();
    }

    let payload = ConnectorTypePayload {
        name: form.name.trim(),
        max_power_kw: validation::number(&form.max_power_kw),
    };
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
    form: DeleteConnectorTypeForm,
) -> ActionReply {
    let session = match authorize(session, OnUnauthenticated::Fail) {
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
