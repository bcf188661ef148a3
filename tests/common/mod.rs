// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use community_access::config::Config;
use community_access::routes::create_router;
use community_access::services::{AccessRevoker, LinkService, MembershipService};
use community_access::AppState;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Revoker that remembers every user it was asked to revoke.
#[derive(Default)]
pub struct RecordingRevoker {
    pub revoked: Mutex<Vec<String>>,
}

impl RecordingRevoker {
    #[allow(dead_code)]
    pub fn count(&self) -> usize {
        self.revoked.lock().unwrap().len()
    }
}

impl AccessRevoker for RecordingRevoker {
    fn revoke(&self, user_id: &str) -> bool {
        self.revoked.lock().unwrap().push(user_id.to_string());
        true
    }
}

/// Create a test app with the given config.
/// Returns the router, the shared state and the revoker it reports to.
#[allow(dead_code)]
pub fn create_test_app_with(
    config: Config,
) -> (axum::Router, Arc<AppState>, Arc<RecordingRevoker>) {
    let revoker = Arc::new(RecordingRevoker::default());
    let membership_service = MembershipService::new(revoker.clone(), config.membership_policy());
    let link_service = LinkService::from_config(&config).unwrap();

    let state = Arc::new(AppState {
        config,
        membership_service,
        link_service,
    });

    (create_router(state.clone()), state, revoker)
}

#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, Arc<RecordingRevoker>) {
    create_test_app_with(Config::test_default())
}

/// Send a bodyless request and decode the JSON response.
#[allow(dead_code)]
pub async fn send(app: &axum::Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}
