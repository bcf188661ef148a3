// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Community membership routes: join, status and renew.

use crate::error::Result;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/community/join/{user_id}", post(join))
        .route("/community/status/{user_id}", get(status))
        .route("/community/renew/{user_id}", post(renew))
}

// ─── Join ────────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct JoinResponse {
    pub link: String,
}

/// Join (or rejoin) the community.
async fn join(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<JoinResponse>> {
    state.membership_service.join(&user_id, Utc::now())?;

    Ok(Json(JoinResponse {
        link: state.link_service.community_link().to_string(),
    }))
}

// ─── Status ──────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StatusResponse {
    pub is_active: bool,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub days_left: i64,
    pub expires_at: String,
    pub renewal_required: bool,
    /// Locked link, only present once access has lapsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Report whether the membership is active. Expired members are revoked.
async fn status(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<StatusResponse>> {
    let status = state.membership_service.status(&user_id, Utc::now())?;

    let link = (!status.active).then(|| state.link_service.expired_link().to_string());

    Ok(Json(StatusResponse {
        is_active: status.active,
        days_left: status.days_left,
        expires_at: format_utc_rfc3339(status.expires_at),
        renewal_required: status.renewal_required,
        link,
    }))
}

// ─── Renew ───────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RenewResponse {
    pub new_link: String,
}

/// Extend the membership by the renewal period.
async fn renew(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<RenewResponse>> {
    let expires_at = state.membership_service.renew(&user_id)?;
    let new_link = state.link_service.renewal_link(&user_id, expires_at);

    Ok(Json(RenewResponse { new_link }))
}
