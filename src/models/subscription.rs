// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use serde::{Deserialize, Serialize};

/// A charging subscription plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "PascalCase"))]
pub struct Subscription {
    pub id: String,
    pub name: String,
    /// Price in VND
    pub price: f64,
    pub duration_days: u32,
    #[serde(default)]
    pub description: Option<String>,
}
