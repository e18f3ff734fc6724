// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models exchanged with the remote backend.
//!
//! Backend JSON uses PascalCase field names; views re-serialize as camelCase.

pub mod connector_type;
pub mod station;
pub mod subscription;
pub mod user;
pub mod vehicle_model;
pub mod wallet;

pub use connector_type::ConnectorType;
pub use station::{Reservation, Station};
pub use subscription::Subscription;
pub use user::{CurrentUser, Session, TokenPair};
pub use vehicle_model::VehicleModel;
pub use wallet::{TopUpReceipt, Wallet};
