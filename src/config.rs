// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use crate::services::membership::{
    DEFAULT_MEMBERSHIP_DAYS, DEFAULT_RENEWAL_DAYS, MAX_POLICY_DAYS,
};
use crate::services::MembershipPolicy;
use std::env;

const DEFAULT_COMMUNITY_LINK: &str = "https://community.example.com/main";
const DEFAULT_EXPIRED_LINK: &str = "https://community.example.com/expired";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Link handed to active members
    pub community_link: String,
    /// Link handed to members whose access lapsed
    pub expired_link: String,
    /// Length of a fresh membership in days
    pub membership_days: i64,
    /// Extension granted by a renewal in days
    pub renewal_days: i64,
    /// Mount the /debug routes
    pub enable_debug_routes: bool,

    // --- Secrets ---
    /// Key for signing renewal link tokens (raw bytes)
    pub link_signing_key: Vec<u8>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            community_link: env::var("COMMUNITY_LINK")
                .unwrap_or_else(|_| DEFAULT_COMMUNITY_LINK.to_string()),
            expired_link: env::var("EXPIRED_LINK")
                .unwrap_or_else(|_| DEFAULT_EXPIRED_LINK.to_string()),
            membership_days: parse_days("MEMBERSHIP_DAYS", DEFAULT_MEMBERSHIP_DAYS)?,
            renewal_days: parse_days("RENEWAL_DAYS", DEFAULT_RENEWAL_DAYS)?,
            enable_debug_routes: env::var("ENABLE_DEBUG_ROUTES")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),

            link_signing_key: env::var("LINK_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("LINK_SIGNING_KEY"))?
                .into_bytes(),
        })
    }

    /// Config for tests: defaults everywhere, debug routes on.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            community_link: DEFAULT_COMMUNITY_LINK.to_string(),
            expired_link: DEFAULT_EXPIRED_LINK.to_string(),
            membership_days: DEFAULT_MEMBERSHIP_DAYS,
            renewal_days: DEFAULT_RENEWAL_DAYS,
            enable_debug_routes: true,
            link_signing_key: b"test_link_key_32_bytes_minimum!!".to_vec(),
        }
    }

    pub fn membership_policy(&self) -> MembershipPolicy {
        MembershipPolicy {
            membership_days: self.membership_days,
            renewal_days: self.renewal_days,
        }
    }
}

/// Case-insensitive truthy flag.
fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Read a day count in `1..=MAX_POLICY_DAYS`, falling back to `default` when unset.
fn parse_days(key: &'static str, default: i64) -> Result<i64, ConfigError> {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<i64>() {
            Ok(days) if (1..=MAX_POLICY_DAYS).contains(&days) => Ok(days),
            _ => Err(ConfigError::Invalid(key, raw)),
        },
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global; keep everything that touches them in one test.
    #[test]
    fn test_config_from_env() {
        env::set_var("LINK_SIGNING_KEY", "test_link_key");
        env::set_var("RENEWAL_DAYS", "7");
        env::remove_var("MEMBERSHIP_DAYS");
        env::set_var("ENABLE_DEBUG_ROUTES", "false");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.link_signing_key, b"test_link_key");
        assert_eq!(config.membership_days, 30);
        assert_eq!(config.renewal_days, 7);
        assert!(!config.enable_debug_routes);

        env::set_var("RENEWAL_DAYS", "0");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("RENEWAL_DAYS", _))
        ));

        env::set_var("RENEWAL_DAYS", "50000000");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("RENEWAL_DAYS", _))
        ));

        env::set_var("RENEWAL_DAYS", "36500");
        env::set_var("ENABLE_DEBUG_ROUTES", "TRUE");
        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.renewal_days, 36_500);
        assert!(config.enable_debug_routes);

        env::remove_var("RENEWAL_DAYS");
        env::remove_var("ENABLE_DEBUG_ROUTES");
    }

    #[test]
    fn test_parse_flag_ignores_case() {
        for raw in ["1", "true", "TRUE", "Yes", "On", " on "] {
            assert!(parse_flag(raw), "{raw} should enable");
        }
        for raw in ["0", "false", "off", "", "enabled"] {
            assert!(!parse_flag(raw), "{raw} should disable");
        }
    }

    #[test]
    fn test_membership_policy_from_config() {
        let policy = Config::test_default().membership_policy();
        assert_eq!(policy, MembershipPolicy::default());
    }
}
