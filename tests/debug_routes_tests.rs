// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Integration tests for the debug routes.

use axum::http::StatusCode;
use community_access::config::Config;

mod common;
use common::{create_test_app, create_test_app_with, send};

#[tokio::test]
async fn test_debug_users_dumps_store() {
    let (app, _, _) = create_test_app();
    send(&app, "POST", "/community/join/alice").await;
    send(&app, "POST", "/community/join/bob").await;

    let (status, json) = send(&app, "GET", "/debug/users").await;

    assert_eq!(status, StatusCode::OK);
    let users = json.as_object().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(json["alice"]["id"], "alice");
    assert_eq!(json["alice"]["fastingType"], "default");
    assert_eq!(json["alice"]["healthScore"], 0);
    assert!(json["alice"]["community"]["joinedAt"].is_string());
    assert!(json["alice"]["community"]["expiresAt"].is_string());
}

#[tokio::test]
async fn test_debug_users_empty() {
    let (app, _, _) = create_test_app();

    let (status, json) = send(&app, "GET", "/debug/users").await;

    assert_eq!(status, StatusCode::OK);
    assert!(json.as_object().unwrap().is_empty());
}

#[tokio::test]
async fn test_debug_expire_makes_status_expired() {
    let (app, _, revoker) = create_test_app();
    send(&app, "POST", "/community/join/alice").await;

    let (status, json) = send(&app, "POST", "/debug/expire/alice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "User alice manually expired for testing");

    let (_, json) = send(&app, "GET", "/community/status/alice").await;
    assert_eq!(json["isActive"], false);
    assert_eq!(revoker.count(), 1);
}

#[tokio::test]
async fn test_debug_expire_unknown_user_is_404() {
    let (app, _, _) = create_test_app();

    let (status, _) = send(&app, "POST", "/debug/expire/nobody").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_debug_routes_absent_when_disabled() {
    let config = Config {
        enable_debug_routes: false,
        ..Config::test_default()
    };
    let (app, _, _) = create_test_app_with(config);

    let (status, _) = send(&app, "GET", "/debug/users").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "POST", "/community/join/alice").await;
    assert_eq!(status, StatusCode::OK);
}
