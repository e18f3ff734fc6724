// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Charging station and reservation models.

use serde::{Deserialize, Serialize};

/// A charging station as listed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "PascalCase"))]
pub struct Station {
    pub id: String,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Operational status reported by the backend (e.g. "Available", "Maintenance")
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub connector_type_ids: Vec<String>,
}

/// A driver's reservation at a station.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "PascalCase"))]
pub struct Reservation {
    pub id: String,
    pub station_id: String,
    /// Start of the reserved slot (ISO 8601)
    pub start_time: String,
    #[serde(default)]
    pub status: Option<String>,
}
