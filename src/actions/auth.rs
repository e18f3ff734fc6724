// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OTP login actions.

use super::{ActionReply, ActionResult, Navigation, NETWORK_ERROR_MSG};
use crate::services::backend::BackendError;
use crate::validation;
use crate::AppState;
use serde::Deserialize;
use validator::Validate;

pub const OTP_SENT_MSG: &str = "Đã gửi mã OTP đến email của bạn.";
pub const OTP_SEND_FAILED_MSG: &str = "Gửi mã OTP thất bại.";
pub const LOGIN_SUCCESS_MSG: &str = "Đăng nhập thành công.";
pub const OTP_REJECTED_MSG: &str = "Mã OTP không hợp lệ hoặc đã hết hạn.";

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestOtpForm {
    #[validate(email(message = "Email không hợp lệ"))]
    pub email: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct VerifyOtpForm {
    #[validate(email(message = "Email không hợp lệ"))]
    pub email: String,
    #[validate(custom(function = "validation::otp_code", message = "Mã OTP phải gồm 6 chữ số"))]
    pub otp: String,
}

/// Email a one-time password to the user.
pub async fn request_otp(state: &AppState, form: RequestOtpForm) -> ActionReply {
    if let Err(result) = super::check_form(&form) {
        return result.into();
    }

    match state.backend.request_otp(form.email.trim()).await {
        Ok(()) => ActionResult::success(OTP_SENT_MSG),
        Err(BackendError::Status(status)) => {
            tracing::warn!(status = status.as_u16(), "OTP request rejected");
            ActionResult::failure(OTP_SEND_FAILED_MSG)
        }
        Err(e) => {
            tracing::error!(error = %e, "OTP request failed");
            ActionResult::failure(NETWORK_ERROR_MSG)
        }
    }
    .into()
}

/// Verify the OTP, set the session cookies, and redirect to the dashboard.
pub async fn verify_otp(state: &AppState, form: VerifyOtpForm) -> ActionReply {
    let mut nav = Navigation::default();
    let result = verify(state, &form, &mut nav).await;
    nav.finish(result)
}

async fn verify(state: &AppState, form: &VerifyOtpForm, nav: &mut Navigation) -> ActionResult {
    if let Err(result) = super::check_form(form) {
        return result;
    }

    let pair = match state
        .backend
        .verify_otp(form.email.trim(), form.otp.trim())
        .await
    {
        Ok(pair) => pair,
        Err(BackendError::Status(status)) => {
            tracing::info!(status = status.as_u16(), "OTP rejected");
            return ActionResult::failure(OTP_REJECTED_MSG);
        }
        Err(BackendError::Decode(e)) => {
            tracing::error!(error = %e, "Unreadable token pair from OTP verification");
            return ActionResult::failure(OTP_REJECTED_MSG);
        }
        Err(e) => {
            tracing::error!(error = %e, "OTP verification failed");
            return ActionResult::failure(NETWORK_ERROR_MSG);
        }
    };

    nav.cookies_mut()
        .set_token_pair(&pair, state.config.cookie_secure);
    nav.redirect_to(state.routes.dashboard_path.clone());
    ActionResult::success(LOGIN_SUCCESS_MSG)
}
