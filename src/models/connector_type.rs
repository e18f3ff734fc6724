// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use serde::{Deserialize, Serialize};

/// A charging connector standard (CCS2, CHAdeMO, Type 2, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "PascalCase"))]
pub struct ConnectorType {
    pub id: String,
    pub name: String,
    pub max_power_kw: f64,
}
