// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Community-Access: time-limited community membership tracking
//!
//! This crate provides the backend API for joining the community, checking
//! whether a membership is still active, and renewing it.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{LinkService, MembershipService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub membership_service: MembershipService,
    pub link_service: LinkService,
}
