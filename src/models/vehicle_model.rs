// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use serde::{Deserialize, Serialize};

/// An electric vehicle model and the connector it charges with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "PascalCase"))]
pub struct VehicleModel {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub battery_capacity_kwh: f64,
    pub connector_type_id: String,
}
