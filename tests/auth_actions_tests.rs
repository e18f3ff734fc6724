// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OTP login action tests.

use axum::http::{Method, StatusCode};
use ev_station_portal::actions::auth::{
    self, RequestOtpForm, VerifyOtpForm, OTP_REJECTED_MSG, OTP_SENT_MSG,
};
use ev_station_portal::actions::{ActionReply, NETWORK_ERROR_MSG};
use ev_station_portal::cookies::{CookieStore, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
use serde_json::json;
use tower::ServiceExt;

mod common;

fn verify_form(email: &str, otp: &str) -> VerifyOtpForm {
    VerifyOtpForm {
        email: email.to_string(),
        otp: otp.to_string(),
    }
}

#[tokio::test]
async fn test_verify_otp_sets_cookies_and_redirects_once() {
    let backend = common::spawn_backend(|_| {
        (StatusCode::OK, common::token_pair_json("acc-1", "ref-1"))
    })
    .await;
    let state = common::test_state(&backend.base_url);

    let reply = auth::verify_otp(&state, verify_form("minh@evgo.vn", "123456")).await;

    let redirection = match reply {
        ActionReply::Redirect(redirection) => redirection,
        other => panic!("expected a redirect, got {other:?}"),
    };
    assert_eq!(redirection.target, "/dashboard");
    assert_eq!(redirection.cookies.get(ACCESS_TOKEN_COOKIE), Some("acc-1"));
    assert_eq!(redirection.cookies.get(REFRESH_TOKEN_COOKIE), Some("ref-1"));

    let calls = backend.calls_to(Method::POST, "/auth/verify-otp");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].bearer, None);
    assert_eq!(calls[0].json(), json!({ "Email": "minh@evgo.vn", "Otp": "123456" }));
}

#[tokio::test]
async fn test_rejected_otp_returns_failure_without_redirect() {
    let backend = common::spawn_backend(|_| (StatusCode::BAD_REQUEST, json!({}))).await;
    let state = common::test_state(&backend.base_url);

    let reply = auth::verify_otp(&state, verify_form("minh@evgo.vn", "000000")).await;

    let result = reply.result().expect("no redirect on rejection");
    assert!(!result.success);
    assert_eq!(result.msg, OTP_REJECTED_MSG);
}

#[tokio::test]
async fn test_malformed_otp_makes_no_call() {
    let backend = common::spawn_backend(|_| (StatusCode::OK, json!({}))).await;
    let state = common::test_state(&backend.base_url);

    let reply = auth::verify_otp(&state, verify_form("not-an-email", "12ab")).await;

    let result = reply.result().unwrap();
    assert!(!result.success);
    assert!(result.msg.contains("Email không hợp lệ"));
    assert!(result.msg.contains("Mã OTP phải gồm 6 chữ số"));
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_verify_otp_network_failure() {
    let url = common::unreachable_backend_url().await;
    let state = common::test_state(&url);

    let reply = auth::verify_otp(&state, verify_form("minh@evgo.vn", "123456")).await;

    let result = reply.result().unwrap();
    assert!(!result.success);
    assert_eq!(result.msg, NETWORK_ERROR_MSG);
}

#[tokio::test]
async fn test_request_otp_sends_email() {
    let backend = common::spawn_backend(|_| (StatusCode::NO_CONTENT, json!({}))).await;
    let state = common::test_state(&backend.base_url);

    let form = RequestOtpForm {
        email: "minh@evgo.vn".to_string(),
    };
    let reply = auth::request_otp(&state, form).await;

    let result = reply.result().unwrap();
    assert!(result.success);
    assert_eq!(result.msg, OTP_SENT_MSG);

    let calls = backend.calls_to(Method::POST, "/auth/request-otp");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].json()["Email"], "minh@evgo.vn");
}

#[tokio::test]
async fn test_request_otp_rejects_invalid_email() {
    let backend = common::spawn_backend(|_| (StatusCode::OK, json!({}))).await;
    let state = common::test_state(&backend.base_url);

    let reply = auth::request_otp(&state, RequestOtpForm::default()).await;

    assert_eq!(reply.result().map(|r| r.success), Some(false));
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_verify_otp_through_router_redirects_with_cookies() {
    let backend = common::spawn_backend(|call| match call.path.as_str() {
        "/auth/verify-otp" => (StatusCode::OK, common::token_pair_json("acc-1", "ref-1")),
        _ => (StatusCode::UNAUTHORIZED, json!({})),
    })
    .await;
    let (app, _) = common::create_test_app(&backend.base_url);

    let response = app
        .oneshot(common::post_form(
            "/actions/auth/verify-otp",
            None,
            "email=minh%40evgo.vn&otp=123456",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response).as_deref(), Some("/dashboard"));

    let cookies = common::set_cookie_headers(&response);
    let access = common::find_cookie(&cookies, "accessToken").unwrap();
    assert!(access.starts_with("accessToken=acc-1"));
    assert!(access.contains("HttpOnly"));
    assert!(access.contains("SameSite=Lax"));
    assert!(common::find_cookie(&cookies, "refreshToken")
        .unwrap()
        .starts_with("refreshToken=ref-1"));

    // The login flow never consults the session endpoints.
    assert!(backend.calls_to(Method::GET, "/auth/me").is_empty());
}
