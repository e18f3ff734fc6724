// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Station administration and driver reservations.

use super::{
    authorize, check_form, dispatch, mutate, succeed, ActionReply, OnUnauthenticated, Outcome,
};
use crate::cache::tags;
use crate::models::{Reservation, Session};
use crate::services::backend::resource_path;
use crate::validation;
use crate::AppState;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use validator::Validate;

const COLLECTION: &str = "/stations";

const CREATE: Outcome = Outcome {
    operation: "station.create",
    success: "Tạo trạm sạc thành công.",
    failure: "Tạo trạm sạc thất bại.",
    tags: &[tags::STATIONS],
};

const UPDATE: Outcome = Outcome {
    operation: "station.update",
    success: "Cập nhật trạm sạc thành công.",
    failure: "Cập nhật trạm sạc thất bại.",
    tags: &[tags::STATIONS],
};

const DELETE: Outcome = Outcome {
    operation: "station.delete",
    success: "Xóa trạm sạc thành công.",
    failure: "Xóa trạm sạc thất bại.",
    tags: &[tags::STATIONS],
};

const RESERVE: Outcome = Outcome {
    operation: "station.reserve",
    success: "Đặt chỗ thành công.",
    failure: "Đặt chỗ thất bại.",
    tags: &[tags::STATIONS, tags::RESERVATIONS],
};

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateStationForm {
    #[validate(custom(function = "validation::required", message = "Tên trạm sạc là bắt buộc"))]
    pub name: String,
    #[validate(custom(function = "validation::required", message = "Địa chỉ là bắt buộc"))]
    pub address: String,
    #[validate(custom(function = "validation::latitude", message = "Vĩ độ không hợp lệ"))]
    pub latitude: String,
    #[validate(custom(function = "validation::longitude", message = "Kinh độ không hợp lệ"))]
    pub longitude: String,
    /// Comma-separated connector type ids
    pub connector_type_ids: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateStationForm {
    #[validate(custom(function = "validation::required", message = "ID trạm sạc là bắt buộc"))]
    pub id: String,
    #[validate(custom(function = "validation::required", message = "Tên trạm sạc là bắt buộc"))]
    pub name: String,
    #[validate(custom(function = "validation::required", message = "Địa chỉ là bắt buộc"))]
    pub address: String,
    #[validate(custom(function = "validation::latitude", message = "Vĩ độ không hợp lệ"))]
    pub latitude: String,
    #[validate(custom(function = "validation::longitude", message = "Kinh độ không hợp lệ"))]
    pub longitude: String,
    pub connector_type_ids: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteStationForm {
    #[validate(custom(function = "validation::required", message = "ID trạm sạc là bắt buộc"))]
    pub id: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct ReserveStationForm {
    #[validate(custom(function = "validation::required", message = "Trạm sạc là bắt buộc"))]
    pub station_id: String,
    #[validate(custom(
        function = "validation::timestamp",
        message = "Thời gian bắt đầu không hợp lệ"
    ))]
    pub start_time: String,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct StationPayload<'a> {
    name: &'a str,
    address: &'a str,
    latitude: f64,
    longitude: f64,
    connector_type_ids: Vec<&'a str>,
}

impl<'a> StationPayload<'a> {
    fn new(
        name: &'a str,
        address: &'a str,
        latitude: &str,
        longitude: &str,
        connector_type_ids: &'a str,
    ) -> Self {
        Self {
            name: name.trim(),
            address: address.trim(),
            latitude: validation::number(latitude),
            longitude: validation::number(longitude),
            connector_type_ids: connector_type_ids
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .collect(),
        }
    }
}

pub async fn create(
    state: &AppState,
    session: Option<&Session>,
    form: CreateStationForm,
) -> ActionReply {
    let session = match authorize(session, OnUnauthenticated::Fail) {
        Ok(session) => session,
        Err(reply) => return reply,
    };
    if let Err(result) = check_form(&form) {
        return result.into();
    }

    let request = state
        .backend
        .request(Method::POST, COLLECTION, Some(&session.access_token))
        .json(&StationPayload::new(
            &form.name,
            &form.address,
            &form.latitude,
            &form.longitude,
            &form.connector_type_ids,
        ));

    mutate(state, request, &CREATE).await.into()
}

pub async fn update(
    state: &AppState,
    session: Option<&Session>,
    form: UpdateStationForm,
) -> ActionReply {
    let session = match authorize(session, OnUnauthenticated::Fail) {
        Ok(session) => session,
        Err(reply) => return reply,
    };
    if let Err(result) = check_form(&form) {
        return result.into();
    }

    let request = state
        .backend
        .request(
            Method::PUT,
            &resource_path(COLLECTION, form.id.trim()),
            Some(&session.access_token),
        )
        .json(&StationPayload::new(
            &form.name,
            &form.address,
            &form.latitude,
            &form.longitude,
            &form.connector_type_ids,
        ));

    mutate(state, request, &UPDATE).await.into()
}

pub async fn delete(
    state: &AppState,
    session: Option<&Session>,
    form: DeleteStationForm,
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

/// Reserve a slot at a station for the current driver.
///
/// On success the created reservation is returned as `data` when the
/// backend includes it.
pub async fn reserve(
    state: &AppState,
    session: Option<&Session>,
    form: ReserveStationForm,
) -> ActionReply {
    let session = match authorize(session, OnUnauthenticated::Forbid) {
        Ok(session) => session,
        Err(reply) => return reply,
    };
    if let Err(result) = check_form(&form) {
        return result.into();
    }

    let path = format!("{}/reservations", resource_path(COLLECTION, form.station_id.trim()));
    let request = state
        .backend
        .request(Method::POST, &path, Some(&session.access_token))
        .json(&serde_json::json!({ "StartTime": form.start_time.trim() }));

    let response = match dispatch(state, request, &RESERVE).await {
        Ok(response) => response,
        Err(result) => return result.into(),
    };

    let reservation = response.json::<Reservation>().await.ok();
    let result = succeed(state, &RESERVE);
    match reservation.and_then(|r| serde_json::to_value(r).ok()) {
        Some(data) => result.with_data(data).into(),
        None => result.into(),
    }
}
