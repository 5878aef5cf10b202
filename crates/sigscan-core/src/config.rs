use std::path::PathBuf;

use crate::app_config::{AppConfig, DEFAULT_FEEDS};
use crate::ConfigError;

/// Whether `SUPABASE_URL` and `SUPABASE_SERVICE_ROLE_KEY` must be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkCredentials {
    Required,
    /// Missing credentials load as empty strings (dry runs).
    Optional,
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key), SinkCredentials::Required)
}

/// Like [`load_app_config`] but tolerates missing sink credentials.
///
/// # Errors
///
/// Returns `ConfigError` if an optional value is present but invalid.
pub fn load_dry_run_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_app_config(|key| std::env::var(key), SinkCredentials::Optional)
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F, credentials: SinkCredentials) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        let value = lookup(var).ok().filter(|v| !v.trim().is_empty());
        match (value, credentials) {
            (Some(v), _) => Ok(v),
            (None, SinkCredentials::Optional) => Ok(String::new()),
            (None, SinkCredentials::Required) => {
                Err(ConfigError::MissingEnvVar(var.to_string()))
            }
        }
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let supabase_url = require("SUPABASE_URL")?.trim_end_matches('/').to_string();
    let supabase_key = require("SUPABASE_SERVICE_ROLE_KEY")?;

    let table = or_default("SIGSCAN_TABLE", "startups");
    let feeds = parse_feeds(&or_default("SIGSCAN_FEEDS", &DEFAULT_FEEDS.join(",")));
    if feeds.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "SIGSCAN_FEEDS".to_string(),
            reason: "at least one feed URL is required".to_string(),
        });
    }

    let log_level = or_default("SIGSCAN_LOG_LEVEL", "info");
    let heuristics_path = lookup("SIGSCAN_HEURISTICS_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let max_entries_per_feed = parse_usize("SIGSCAN_MAX_ENTRIES_PER_FEED", "15")?;
    let sink_timeout_secs = parse_u64("SIGSCAN_SINK_TIMEOUT_SECS", "20")?;
    let feed_timeout_secs = parse_u64("SIGSCAN_FEED_TIMEOUT_SECS", "30")?;
    let inter_request_delay_ms = parse_u64("SIGSCAN_INTER_REQUEST_DELAY_MS", "200")?;
    let user_agent = or_default("SIGSCAN_USER_AGENT", "sigscan/0.1 (startup-signals)");
    let persist_domains = parse_bool(
        "SIGSCAN_PERSIST_DOMAINS",
        &or_default("SIGSCAN_PERSIST_DOMAINS", "false"),
    )?;

    Ok(AppConfig {
        supabase_url,
        supabase_key,
        table,
        feeds,
        log_level,
        heuristics_path,
        max_entries_per_feed,
        sink_timeout_secs,
        feed_timeout_secs,
        inter_request_delay_ms,
        user_agent,
        persist_domains,
    })
}

/// Split a comma-separated feed list, dropping blanks.
fn parse_feeds(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
