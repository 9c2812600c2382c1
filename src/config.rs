//! Service configuration.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_HELIUS_BASE_URL: &str = "https://api.helius.xyz/v0";

/// Configuration for the scoring service and its upstream client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Helius API key
    pub helius_api_key: Option<String>,
    /// Helius REST base URL
    pub helius_base_url: String,
    /// Number of transactions requested per wallet
    pub transaction_limit: u32,
    /// Outbound request quota
    pub requests_per_second: u32,
    /// Per-request timeout in seconds
    pub request_timeout_seconds: u64,
    /// HTTP listen address
    pub listen_addr: String,
    /// Directory of static frontend files
    pub static_dir: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            helius_api_key: None,
            helius_base_url: DEFAULT_HELIUS_BASE_URL.to_string(),
            transaction_limit: 50,
            requests_per_second: 10,
            request_timeout_seconds: 10,
            listen_addr: "0.0.0.0:5000".to_string(),
            static_dir: Some("public".to_string()),
        }
    }
}

impl ServiceConfig {
    /// Build the configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = parse_or(non_empty("PORT"), "PORT", 5000u16);

        Self {
            helius_api_key: non_empty("HELIUS_API_KEY"),
            helius_base_url: non_empty("HELIUS_BASE_URL").unwrap_or(defaults.helius_base_url),
            transaction_limit: parse_or(
                non_empty("HELIUS_TX_LIMIT"),
                "HELIUS_TX_LIMIT",
                defaults.transaction_limit,
            ),
            requests_per_second: parse_or(
                non_empty("HELIUS_RPS"),
                "HELIUS_RPS",
                defaults.requests_per_second,
            ),
            request_timeout_seconds: parse_or(
                non_empty("HELIUS_TIMEOUT_SECS"),
                "HELIUS_TIMEOUT_SECS",
                defaults.request_timeout_seconds,
            ),
            listen_addr: format!("0.0.0.0:{}", port),
            static_dir: non_empty("STATIC_DIR").or(defaults.static_dir),
        }
    }

    /// Whether an upstream credential is present.
    pub fn has_credential(&self) -> bool {
        self.helius_api_key
            .as_deref()
            .map(|key| !key.trim().is_empty())
            .unwrap_or(false)
    }
}

fn parse_or<T: FromStr + Copy>(value: Option<String>, key: &str, default: T) -> T {
    match value {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring unparsable {}={:?}, using default", key, raw);
            default
        }),
        None => default,
    }
}
