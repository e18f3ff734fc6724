// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Wallet top-up.

use super::{
    authorize, check_form, dispatch, succeed, ActionReply, ActionResult, Navigation,
    OnUnauthenticated, Outcome,
};
use crate::cache::tags;
use crate::models::{Session, TopUpReceipt};
use crate::AppState;
use reqwest::Method;
use serde::Deserialize;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Smallest accepted top-up, in VND.
pub const MIN_TOP_UP_VND: u64 = 10_000;

const TOP_UP: Outcome = Outcome {
    operation: "wallet.top_up",
    success: "Tạo yêu cầu nạp tiền thành công.",
    failure: "Nạp tiền thất bại.",
    tags: &[tags::WALLET],
};

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct TopUpForm {
    #[validate(custom(
        function = "minimum_top_up",
        message = "Số tiền nạp tối thiểu là 10.000 VNĐ"
    ))]
    pub amount: String,
}

fn minimum_top_up(value: &str) -> Result<(), ValidationError> {
    match value.trim().parse::<u64>() {
        Ok(amount) if amount >= MIN_TOP_UP_VND => Ok(()),
        _ => Err(ValidationError::new("minimum_top_up")
            .with_message(Cow::Borrowed("Số tiền nạp không hợp lệ"))),
    }
}

/// Top up the current user's wallet.
///
/// On success redirects to the payment gateway page returned by the
/// backend, or to the wallet page when none is given.
pub async fn top_up(state: &AppState, session: Option<&Session>, form: TopUpForm) -> ActionReply {
    let session = match authorize(session, OnUnauthenticated::Forbid) {
        Ok(session) => session,
        Err(reply) => return reply,
    };

    let mut nav = Navigation::default();
    let result = request_top_up(state, session, &form, &mut nav).await;
    nav.finish(result)
}

async fn request_top_up(
    state: &AppState,
    session: &Session,
    form: &TopUpForm,
    nav: &mut Navigation,
) -> ActionResult {
    if let Err(result) = check_form(form) {
        return result;
    }

    let amount: u64 = form.amount.trim().parse().unwrap_or_default();
    let request = state
        .backend
        .request(Method::POST, "/wallet/me/top-up", Some(&session.access_token))
        .json(&serde_json::json!({ "Amount": amount }));

    let response = match dispatch(state, request, &TOP_UP).await {
        Ok(response) => response,
        Err(result) => return result,
    };

    let receipt = match response.json::<TopUpReceipt>().await {
        Ok(receipt) => receipt,
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable top-up receipt; returning to wallet page");
            TopUpReceipt::default()
        }
    };
    let target = receipt
        .checkout_url
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| format!("{}/wallet", state.routes.dashboard_path));
    nav.redirect_to(target);

    tracing::info!(uid = %session.user.uid, amount, "Wallet top-up requested");
    succeed(state, &TOP_UP)
}
