// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Wallet top-up action tests.

use axum::http::{Method, StatusCode};
use ev_station_portal::actions::wallet::{self, TopUpForm};
use ev_station_portal::actions::ActionReply;
use ev_station_portal::cache::tags;
use serde_json::json;
use tower::ServiceExt;

mod common;

fn form(amount: &str) -> TopUpForm {
    TopUpForm {
        amount: amount.to_string(),
    }
}

fn redirect_target(reply: ActionReply) -> String {
    match reply {
        ActionReply::Redirect(redirection) => {
            assert!(redirection.cookies.is_empty());
            redirection.target
        }
        other => panic!("expected a redirect, got {other:?}"),
    }
}

#[tokio::test]
async fn test_top_up_redirects_to_checkout() {
    let backend = common::spawn_backend(|_| {
        (
            StatusCode::OK,
            json!({ "CheckoutUrl": "https://pay.example.vn/c/42" }),
        )
    })
    .await;
    let state = common::test_state(&backend.base_url);
    let session = common::session();

    let reply = wallet::top_up(&state, Some(&session), form("50000")).await;

    assert_eq!(redirect_target(reply), "https://pay.example.vn/c/42");
    assert_eq!(state.cache.revalidation_count(tags::WALLET), 1);

    let calls = backend.calls_to(Method::POST, "/wallet/me/top-up");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].bearer.as_deref(), Some(common::VALID_TOKEN));
    assert_eq!(calls[0].json(), json!({ "Amount": 50000 }));
}

#[tokio::test]
async fn test_top_up_without_checkout_returns_to_wallet() {
    let backend = common::spawn_backend(|_| (StatusCode::OK, json!({}))).await;
    let state = common::test_state(&backend.base_url);
    let session = common::session();

    let reply = wallet::top_up(&state, Some(&session), form("10000")).await;

    assert_eq!(redirect_target(reply), "/dashboard/wallet");
}

#[tokio::test]
async fn test_top_up_below_minimum_is_rejected() {
    let backend = common::spawn_backend(|_| (StatusCode::OK, json!({}))).await;
    let state = common::test_state(&backend.base_url);
    let session = common::session();

    for amount in ["9999", "", "abc", "-20000"] {
        let reply = wallet::top_up(&state, Some(&session), form(amount)).await;
        let result = reply.result().expect("validation failure is a result");
        assert!(!result.success);
        assert_eq!(result.msg, "Số tiền nạp tối thiểu là 10.000 VNĐ");
    }
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_top_up_without_session_is_forbidden() {
    let backend = common::spawn_backend(|_| (StatusCode::OK, json!({}))).await;
    let state = common::test_state(&backend.base_url);

    let reply = wallet::top_up(&state, None, form("50000")).await;

    assert!(matches!(reply, ActionReply::Forbidden));
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_top_up_backend_failure_stays_on_page() {
    let backend =
        common::spawn_backend(|_| (StatusCode::INTERNAL_SERVER_ERROR, json!({}))).await;
    let state = common::test_state(&backend.base_url);
    let session = common::session();

    let reply = wallet::top_up(&state, Some(&session), form("50000")).await;

    let result = reply.result().expect("no redirect on failure");
    assert!(!result.success);
    assert_eq!(result.msg, "Nạp tiền thất bại.");
    assert_eq!(state.cache.revalidation_count(tags::WALLET), 0);
}

#[tokio::test]
async fn test_top_up_through_router_without_session_is_403() {
    let backend = common::spawn_backend(|_| (StatusCode::UNAUTHORIZED, json!({}))).await;
    let (app, _) = common::create_test_app(&backend.base_url);

    let response = app
        .oneshot(common::post_form("/actions/wallet/top-up", None, "amount=50000"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(backend.calls_to(Method::POST, "/wallet/me/top-up").is_empty());
}

#[tokio::test]
async fn test_top_up_through_router_redirects_with_303() {
    let backend = common::spawn_backend(common::with_identity(|_| {
        (
            StatusCode::OK,
            json!({ "CheckoutUrl": "https://pay.example.vn/c/7" }),
        )
    }))
    .await;
    let (app, _) = common::create_test_app(&backend.base_url);

    let response = app
        .oneshot(common::post_form(
            "/actions/wallet/top-up",
            Some(&format!("accessToken={}", common::VALID_TOKEN)),
            "amount=20000",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        common::location(&response).as_deref(),
        Some("https://pay.example.vn/c/7")
    );
}

#[tokio::test]
async fn test_malformed_receipt_falls_back_to_wallet_page() {
    let backend =
        common::spawn_backend(|_| (StatusCode::OK, json!({ "CheckoutUrl": 42 }))).await;
    let state = common::test_state(&backend.base_url);
    let session = common::session();

    let reply = wallet::top_up(&state, Some(&session), form("10000")).await;

    assert_eq!(redirect_target(reply), "/dashboard/wallet");
    assert_eq!(state.cache.revalidation_count(tags::WALLET), 1);
}
