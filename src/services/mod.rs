// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod links;
pub mod membership;
pub mod revocation;

pub use links::LinkService;
pub use membership::{MembershipPolicy, MembershipService};
pub use revocation::{AccessRevoker, LoggingRevoker};
