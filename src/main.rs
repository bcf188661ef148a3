// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Community-Access API Server
//!
//! Tracks time-limited community memberships: join, status checks with lazy
//! expiry, and renewals.

use community_access::{
    config::Config,
    services::{LinkService, LoggingRevoker, MembershipService},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Community-Access API");

    let membership_service =
        MembershipService::new(Arc::new(LoggingRevoker), config.membership_policy());
    let policy = membership_service.policy();
    tracing::info!(
        membership_days = policy.membership_days,
        renewal_days = policy.renewal_days,
        "Membership store initialized"
    );

    let link_service = LinkService::from_config(&config)?;

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        membership_service,
        link_service,
    });

    // Build router
    let app = community_access::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("community_access=debug,info")
            }),
        )
        .with(format)
        .init();
}
