// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Membership store and expiry engine.
//!
//! Records live in memory for the lifetime of the process. Expiry is detected
//! lazily on status checks; an expired record is never removed, only reported
//! as inactive.

use crate::error::AppError;
use crate::models::{MembershipRecord, MembershipStatus};
use crate::services::revocation::AccessRevoker;
use crate::time_utils::ceil_days;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Default length of a fresh membership.
pub const DEFAULT_MEMBERSHIP_DAYS: i64 = 30;
/// Default extension granted by a renewal.
pub const DEFAULT_RENEWAL_DAYS: i64 = 14;
/// Upper bound accepted for configured day counts.
pub const MAX_POLICY_DAYS: i64 = 36_500;
/// How far in the past a forced expiry lands.
const FORCE_EXPIRE_OFFSET_SECONDS: i64 = 10;

/// Durations applied by join and renew.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MembershipPolicy {
    pub membership_days: i64,
    pub renewal_days: i64,
}

impl Default for MembershipPolicy {
    fn default() -> Self {
        Self {
            membership_days: DEFAULT_MEMBERSHIP_DAYS,
            renewal_days: DEFAULT_RENEWAL_DAYS,
        }
    }
}

/// In-memory membership store.
///
/// Writes go through `DashMap` entry guards, so a renew's read-modify-write
/// is atomic per user even when handlers run concurrently.
pub struct MembershipService {
    records: DashMap<String, MembershipRecord>,
    revoker: Arc<dyn AccessRevoker>,
    policy: MembershipPolicy,
}

impl MembershipService {
    pub fn new(revoker: Arc<dyn AccessRevoker>, policy: MembershipPolicy) -> Self {
        Self {
            records: DashMap::new(),
            revoker,
            policy,
        }
    }

    pub fn policy(&self) -> MembershipPolicy {
        self.policy
    }

    /// Create or replace the record for `user_id`, starting at `now`.
    pub fn join(&self, user_id: &str, now: DateTime<Utc>) -> Result<MembershipRecord, AppError> {
        let expires_at = add_days(now, self.policy.membership_days)?;
        let record = MembershipRecord::new(user_id, now, expires_at);
        self.records.insert(user_id.to_string(), record.clone());

        tracing::info!(user_id = %user_id, expires_at = %expires_at, "User joined community");
        Ok(record)
    }

    /// Status of `user_id` as of `now`.
    ///
    /// Every check that finds the membership expired asks the revoker to drop
    /// the user; the record itself is left untouched.
    pub fn status(&self, user_id: &str, now: DateTime<Utc>) -> Result<MembershipStatus, AppError> {
        // Copy out so the shard lock is released before calling the revoker.
        let expires_at = self
            .records
            .get(user_id)
            .map(|r| r.expires_at())
            .ok_or_else(|| not_found(user_id))?;

        if now > expires_at {
            if !self.revoker.revoke(user_id) {
                tracing::warn!(user_id = %user_id, "Access revocation was not acknowledged");
            }
            return Ok(MembershipStatus {
                active: false,
                days_left: 0,
                expires_at,
                renewal_required: true,
            });
        }

        Ok(MembershipStatus {
            active: true,
            days_left: ceil_days(expires_at - now),
            expires_at,
            renewal_required: false,
        })
    }

    /// Extend `user_id` by the policy's renewal period.
    ///
    /// The extension is added to the stored expiry even when that is already
    /// in the past. Returns the new expiry.
    pub fn renew(&self, user_id: &str) -> Result<DateTime<Utc>, AppError> {
        let mut record = self
            .records
            .get_mut(user_id)
            .ok_or_else(|| not_found(user_id))?;

        let new_expires_at = add_days(record.community.expires_at, self.policy.renewal_days)?;
        record.community.expires_at = new_expires_at;
        drop(record);

        tracing::info!(user_id = %user_id, expires_at = %new_expires_at, "User renewed membership");
        Ok(new_expires_at)
    }

    /// Move the expiry of `user_id` to just before `now`.
    pub fn force_expire(&self, user_id: &str, now: DateTime<Utc>) -> Result<(), AppError> {
        let mut record = self
            .records
            .get_mut(user_id)
            .ok_or_else(|| not_found(user_id))?;
        record.community.expires_at = now
            .checked_sub_signed(Duration::seconds(FORCE_EXPIRE_OFFSET_SECONDS))
            .ok_or_else(|| out_of_range(now, -FORCE_EXPIRE_OFFSET_SECONDS))?;
        drop(record);

        tracing::debug!(user_id = %user_id, "Membership force-expired");
        Ok(())
    }

    pub fn get(&self, user_id: &str) -> Option<MembershipRecord> {
        self.records.get(user_id).map(|r| r.clone())
    }

    /// Copy of every record, ordered by user id.
    pub fn snapshot(&self) -> BTreeMap<String, MembershipRecord> {
        self.records
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}

/// `at + days`, or an error instead of a panic when chrono's range is exceeded.
fn add_days(at: DateTime<Utc>, days: i64) -> Result<DateTime<Utc>, AppError> {
    Duration::try_days(days)
        .and_then(|delta| at.checked_add_signed(delta))
        .ok_or_else(|| out_of_range(at, days))
}

fn out_of_range(at: DateTime<Utc>, offset: i64) -> AppError {
    AppError::Internal(anyhow::anyhow!(
        "Expiry out of range: {} offset by {}",
        at,
        offset
    ))
}

fn not_found(user_id: &str) -> AppError {
    AppError::NotFound(format!("User {} not found", user_id))
}
