// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Community access revocation.
//!
//! The community bot that actually removes members is out of process; this
//! module only defines the seam and a logging stand-in for it.

/// Removes a member from the community chat.
///
/// Returns whether the revocation was accepted. Callers treat this as
/// best-effort and never retry.
pub trait AccessRevoker: Send + Sync {
    fn revoke(&self, user_id: &str) -> bool;
}

/// Revoker that only records the revocation in the logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingRevoker;

impl AccessRevoker for LoggingRevoker {
    fn revoke(&self, user_id: &str) -> bool {
        tracing::info!(user_id = %user_id, "Community access revoked");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_revoker_accepts() {
        assert!(LoggingRevoker.revoke("u1"));
    }
}
