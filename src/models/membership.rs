// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Membership record held in the in-memory store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Community window for a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CommunityAccess {
    /// When the member (re)joined. Never changes afterwards.
    #[serde(with = "rfc3339_millis")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub joined_at: DateTime<Utc>,
    /// End of the paid window. Moved by renewals.
    #[serde(with = "rfc3339_millis")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub expires_at: DateTime<Utc>,
}

/// A member's record, keyed by `id` in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MembershipRecord {
    pub id: String,
    pub fasting_type: String,
    pub health_score: i64,
    pub community: CommunityAccess,
    #[cfg_attr(feature = "binding-generation", ts(type = "Record<string, unknown>"))]
    pub fasting_session: serde_json::Map<String, serde_json::Value>,
}

impl MembershipRecord {
    /// Fresh record for a member joining at `joined_at`.
    pub fn new(id: impl Into<String>, joined_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            fasting_type: "default".to_string(),
            health_score: 0,
            community: CommunityAccess {
                joined_at,
                expires_at,
            },
            fasting_session: serde_json::Map::new(),
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.community.expires_at
    }
}

/// Result of a status check at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MembershipStatus {
    pub active: bool,
    pub days_left: i64,
    pub expires_at: DateTime<Utc>,
    pub renewal_required: bool,
}

/// Timestamps are exchanged as RFC3339 strings with millisecond precision.
mod rfc3339_millis {
    use crate::time_utils::format_utc_rfc3339;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format_utc_rfc3339(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
