// src/config/fetch.rs
use std::env;
use std::str::FromStr;

use crate::ingest::dedup::DEFAULT_DEDUP_PATH;
use crate::ingest::MAX_CONCURRENCY;

pub const ENV_FETCH_TIMEOUT_SECS: &str = "FETCH_TIMEOUT_SECS";
pub const ENV_FETCH_USER_AGENT: &str = "FETCH_USER_AGENT";
pub const ENV_FETCH_MAX_CONCURRENCY: &str = "FETCH_MAX_CONCURRENCY";
pub const ENV_DEDUP_STORE_PATH: &str = "DEDUP_STORE_PATH";
pub const ENV_DIGEST_UTC_OFFSET_HOURS: &str = "DIGEST_UTC_OFFSET_HOURS";

/// Runtime knobs for retrieval, persistence and rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub max_concurrency: usize,
    pub dedup_path: String,
    /// Local offset for the digest header (Dhaka by default).
    pub utc_offset_hours: i32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: format!("news-digest/{}", env!("CARGO_PKG_VERSION")),
            max_concurrency: MAX_CONCURRENCY,
            dedup_path: DEFAULT_DEDUP_PATH.to_string(),
            utc_offset_hours: 6,
        }
    }
}

impl FetchConfig {
    pub fn from_env() -> Self {
        let d = Self::default();
        let user_agent = env::var(ENV_FETCH_USER_AGENT)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(d.user_agent);
        let dedup_path = env::var(ENV_DEDUP_STORE_PATH)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(d.dedup_path);
        let utc_offset_hours: i32 = parse_env(ENV_DIGEST_UTC_OFFSET_HOURS, d.utc_offset_hours);

        Self {
            timeout_secs: parse_env(ENV_FETCH_TIMEOUT_SECS, d.timeout_secs).max(1),
            user_agent,
            max_concurrency: parse_env(ENV_FETCH_MAX_CONCURRENCY, d.max_concurrency)
                .clamp(1, MAX_CONCURRENCY),
            dedup_path,
            utc_offset_hours: if (-23..=23).contains(&utc_offset_hours) {
                utc_offset_hours
            } else {
                tracing::warn!(value = utc_offset_hours, "utc offset out of range, using default");
                d.utc_offset_hours
            },
        }
    }
}

fn parse_env<T: FromStr + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(key, value = %raw, "unparseable env value, using default");
                default
            }
        },
        Err(_) => default,
    }
}
