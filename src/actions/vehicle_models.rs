// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Vehicle model administration.

use super::{authorize, check_form, mutate, ActionReply, OnUnauthenticated, Outcome};
use crate::cache::tags;
use crate::models::Session;
use crate::services::backend::resource_path;
use crate::validation;
use crate::AppState;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use validator::Validate;

const COLLECTION: &str = "/vehicle-models";

const CREATE: Outcome = Outcome {
    operation: "vehicle_model.create",
    success: "Tạo mẫu xe thành công.",
    failure: "Tạo mẫu xe thất bại.",
    tags: &[tags::VEHICLE_MODELS],
};

const UPDATE: Outcome = Outcome {
    operation: "vehicle_model.update",
    success: "Cập nhật mẫu xe thành công.",
    failure: "Cập nhật mẫu xe thất bại.",
    tags: &[tags::VEHICLE_MODELS],
};

const DELETE: Outcome = Outcome {
    operation: "vehicle_model.delete",
    success: "Xóa mẫu xe thành công.",
    failure: "Xóa mẫu xe thất bại.",
    tags: &[tags::VEHICLE_MODELS],
};

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateVehicleModelForm {
    #[validate(custom(function = "validation::required", message = "Hãng xe là bắt buộc"))]
    pub brand: String,
    #[validate(custom(function = "validation::required", message = "Tên mẫu xe là bắt buộc"))]
    pub model: String,
    #[validate(custom(
        function = "validation::positive_number",
        message = "Dung lượng pin phải là số dương"
    ))]
    pub battery_capacity_kwh: String,
    #[validate(custom(
        function = "validation::required",
        message = "Loại cổng kết nối là bắt buộc"
    ))]
    pub connector_type_id: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateVehicleModelForm {
    #[validate(custom(function = "validation::required", message = "ID mẫu xe là bắt buộc"))]
    pub id: String,
    #[validate(custom(function = "validation::required", message = "Hãng xe là bắt buộc"))]
    pub brand: String,
    #[validate(custom(function = "validation::required", message = "Tên mẫu xe là bắt buộc"))]
    pub model: String,
    #[validate(custom(
        function = "validation::positive_number",
        message = "Dung lượng pin phải là số dương"
    ))]
    pub battery_capacity_kwh: String,
    #[validate(custom(
        function = "validation::required",
        message = "Loại cổng kết nối là bắt buộc"
    ))]
    pub connector_type_id: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteVehicleModelForm {
    #[validate(custom(function = "validation::required", message = "ID mẫu xe là bắt buộc"))]
    pub id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct VehicleModelPayload<'a> {
    brand: &'a str,
    model: &'a str,
    battery_capacity_kwh: f64,
    connector_type_id: &'a str,
}

impl<'a> VehicleModelPayload<'a> {
    fn new(brand: &'a str, model: &'a str, capacity: &str, connector_type_id: &'a str) -> Self {
        Self {
            brand: brand.trim(),
            model: model.trim(),
            battery_capacity_kwh: validation::number(capacity),
            connector_type_id: connector_type_id.trim(),
        }
    }
}

pub async fn create(
    state: &AppState,
    session: Option<&Session>,
    form: CreateVehicleModelForm,
) -> ActionReply {
    let session = match authorize(session, OnUnauthenticated::Fail) {
        Ok(session) => session,
        Err(reply) => return reply,
    };
    if let Err(result) = check_form(&form) {
        return result.into();
    }

    let payload = VehicleModelPayload::new(
        &form.brand,
        &form.model,
        &form.battery_capacity_kwh,
        &form.connector_type_id,
    );
    let request = state
        .backend
        .request(Method::POST, COLLECTION, Some(&session.access_token))
        .json(&payload);

    mutate(state, request, &CREATE).await.into()
}

pub async fn update(
    state: &AppState,
    session: Option<&Session>,
    form: UpdateVehicleModelForm,
) -> ActionReply {
    let session = match authorize(session, OnUnauthenticated::Fail) {
        Ok(session) => session,
        Err(reply) => return reply,
    };
    if let Err(result) = check_form(&form) {
        return result.into();
    }

    let payload = VehicleModelPayload::new(
        &form.brand,
        &form.model,
        &form.battery_capacity_kwh,
        &form.connector_type_id,
    );
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
    form: DeleteVehicleModelForm,
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
