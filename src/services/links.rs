// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Community invite links handed back to clients.

use crate::config::{Config, ConfigError};
use crate::time_utils::format_utc_rfc3339;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Issues the main, locked and renewal links.
///
/// The signing key is validated once at construction, so issuing a link
/// cannot fail after a renewal has been committed.
#[derive(Clone)]
pub struct LinkService {
    community_link: String,
    expired_link: String,
    signer: HmacSha256,
}

impl LinkService {
    pub fn new(
        community_link: String,
        expired_link: String,
        signing_key: &[u8],
    ) -> Result<Self, ConfigError> {
        let signer = HmacSha256::new_from_slice(signing_key)
            .map_err(|e| ConfigError::Invalid("LINK_SIGNING_KEY", e.to_string()))?;

        Ok(Self {
            community_link,
            expired_link,
            signer,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::new(
            config.community_link.clone(),
            config.expired_link.clone(),
            &config.link_signing_key,
        )
    }

    /// Link to the community for active members.
    pub fn community_link(&self) -> &str {
        &self.community_link
    }

    /// Link shown to members whose access has lapsed.
    pub fn expired_link(&self) -> &str {
        &self.expired_link
    }

    /// Community link carrying an opaque token tied to this renewal.
    pub fn renewal_link(&self, user_id: &str, expires_at: DateTime<Utc>) -> String {
        format!(
            "{}?token={}",
            self.community_link,
            self.renewal_token(user_id, expires_at)
        )
    }

    fn renewal_token(&self, user_id: &str, expires_at: DateTime<Utc>) -> String {
        let mut mac = self.signer.clone();
        mac.update(user_id.as_bytes());
        mac.update(b"|");
        mac.update(format_utc_rfc3339(expires_at).as_bytes());
        URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
    }
}
