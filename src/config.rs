//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// Engine-related values are read once, when the engine is built.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub cache_capacity: usize,
    /// Age in seconds (since last write) after which records expire
    pub expiration_secs: u64,
    /// Minimum seconds between cache rebuilds on the list path
    pub refresh_interval_secs: u64,
    /// Cache write attempts made by an update before rolling back
    pub update_retry_limit: u32,
    /// Cache occupancy, as a fraction of capacity, a sweep evicts down to
    pub eviction_target_ratio: f64,
    /// Cache occupancy, as a fraction of capacity, at which a sweep starts evicting
    pub eviction_trigger_ratio: f64,
    /// Seconds between sweep runs
    pub sweep_interval_secs: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 100000)
    /// - `EXPIRATION_SECS` - Record expiration in seconds (default: 172800)
    /// - `REFRESH_INTERVAL_SECS` - Cache refresh interval (default: 60)
    /// - `UPDATE_RETRY_LIMIT` - Cache write attempts per update (default: 3)
    /// - `EVICTION_TARGET_RATIO` - Post-sweep cache occupancy (default: 0.8)
    /// - `EVICTION_TRIGGER_RATIO` - Occupancy that triggers eviction (default: 0.95)
    /// - `SWEEP_INTERVAL_SECS` - Sweep frequency in seconds (default: 86400)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_capacity: env_or("CACHE_CAPACITY", defaults.cache_capacity),
            expiration_secs: env_or("EXPIRATION_SECS", defaults.expiration_secs),
            refresh_interval_secs: env_or("REFRESH_INTERVAL_SECS", defaults.refresh_interval_secs),
            update_retry_limit: env_or("UPDATE_RETRY_LIMIT", defaults.update_retry_limit),
            eviction_target_ratio: ratio_or(
                "EVICTION_TARGET_RATIO",
                defaults.eviction_target_ratio,
            ),
            eviction_trigger_ratio: ratio_or(
                "EVICTION_TRIGGER_RATIO",
                defaults.eviction_trigger_ratio,
            ),
            sweep_interval_secs: env_or("SWEEP_INTERVAL_SECS", defaults.sweep_interval_secs),
            server_port: env_or("SERVER_PORT", defaults.server_port),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: 100_000,
            expiration_secs: 48 * 60 * 60,
            refresh_interval_secs: 60,
            update_retry_limit: 3,
            eviction_target_ratio: 0.8,
            eviction_trigger_ratio: 0.95,
            sweep_interval_secs: 24 * 60 * 60,
            server_port: 8080,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Reads a fraction of capacity. Non-finite values fall back to `default`;
/// anything else is clamped to `0.0..=1.0`.
fn ratio_or(name: &str, default: f64) -> f64 {
    let value = env_or(name, default);
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_capacity, 100_000);
        assert_eq!(config.expiration_secs, 172_800);
        assert_eq!(config.refresh_interval_secs, 60);
        assert_eq!(config.update_retry_limit, 3);
        assert_eq!(config.eviction_target_ratio, 0.8);
        assert_eq!(config.sweep_interval_secs, 86_400);
        assert_eq!(config.server_port, 8080);
    }

    #[test]
    fn test_config_from_env_defaults() {
        for name in [
            "CACHE_CAPACITY",
            "EXPIRATION_SECS",
            "REFRESH_INTERVAL_SECS",
            "UPDATE_RETRY_LIMIT",
            "EVICTION_TARGET_RATIO",
            "EVICTION_TRIGGER_RATIO",
            "SWEEP_INTERVAL_SECS",
            "SERVER_PORT",
        ] {
            env::remove_var(name);
        }

        let config = Config::from_env();
        assert_eq!(config.cache_capacity, 100_000);
        assert_eq!(config.expiration_secs, 172_800);
        assert_eq!(config.update_retry_limit, 3);
        assert_eq!(config.server_port, 8080);
    }

    #[test]
    fn test_env_or_ignores_garbage() {
        env::set_var("INCIDENT_TEST_GARBAGE_PORT", "not-a-port");
        assert_eq!(env_or("INCIDENT_TEST_GARBAGE_PORT", 3000u16), 3000);
        env::remove_var("INCIDENT_TEST_GARBAGE_PORT");
    }

    #[test]
    fn test_ratio_or_rejects_non_finite() {
        env::set_var("INCIDENT_TEST_NAN_RATIO", "NaN");
        assert_eq!(ratio_or("INCIDENT_TEST_NAN_RATIO", 0.95), 0.95);
        env::set_var("INCIDENT_TEST_NAN_RATIO", "inf");
        assert_eq!(ratio_or("INCIDENT_TEST_NAN_RATIO", 0.95), 0.95);
        env::remove_var("INCIDENT_TEST_NAN_RATIO");
    }

    #[test]
    fn test_ratio_or_clamps_to_unit_range() {
        env::set_var("INCIDENT_TEST_LOW_RATIO", "-0.5");
        assert_eq!(ratio_or("INCIDENT_TEST_LOW_RATIO", 0.8), 0.0);
        env::remove_var("INCIDENT_TEST_LOW_RATIO");

        env::set_var("INCIDENT_TEST_HIGH_RATIO", "3");
        assert_eq!(ratio_or("INCIDENT_TEST_HIGH_RATIO", 0.8), 1.0);
        env::remove_var("INCIDENT_TEST_HIGH_RATIO");

        env::set_var("INCIDENT_TEST_PLAIN_RATIO", "0.7");
        assert_eq!(ratio_or("INCIDENT_TEST_PLAIN_RATIO", 0.8), 0.7);
        env::remove_var("INCIDENT_TEST_PLAIN_RATIO");
    }
}
