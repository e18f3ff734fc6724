// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - backend access and session handling.

pub mod backend;
pub mod session;

pub use backend::{BackendClient, BackendError};
pub use session::{RefreshOutcome, SessionService};
