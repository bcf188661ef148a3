// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Debug routes for inspecting the store and simulating expiry.
//!
//! Only mounted when `ENABLE_DEBUG_ROUTES` is set.

use crate::error::Result;
use crate::models::MembershipRecord;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/debug/users", get(list_users))
        .route("/debug/expire/{user_id}", post(expire_user))
}

/// Dump every membership record keyed by user id.
async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Json<BTreeMap<String, MembershipRecord>> {
    Json(state.membership_service.snapshot())
}

#[derive(Serialize)]
pub struct ExpireResponse {
    pub message: String,
}

/// Push a member's expiry into the past so the next status check sees it lapsed.
async fn expire_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ExpireResponse>> {
    state.membership_service.force_expire(&user_id, Utc::now())?;
    tracing::warn!(user_id = %user_id, "Membership manually expired via debug route");

    Ok(Json(ExpireResponse {
        message: format!("User {} manually expired for testing", user_id),
    }))
}
