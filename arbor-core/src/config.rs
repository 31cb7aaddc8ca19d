//! Runtime tuning read from the environment
//!
//! Every value has a default and can be overridden with an `ARBOR_*`
//! environment variable, which makes it easy to adjust timing on slow
//! terminals without a rebuild.

use std::env;
use std::time::Duration;

/// Parse an environment variable as a typed value with a default fallback
fn env_var_or_default<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Update plus view time above which the root logs a warning
    pub max_iteration_ms: u64,
    /// Input poll interval of the terminal driver
    pub tick_rate_ms: u64,
    /// Default interval between dashboard heartbeats
    pub heartbeat_ms: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_iteration_ms: env_var_or_default("ARBOR_MAX_ITERATION_MS", 16),
            tick_rate_ms: env_var_or_default("ARBOR_TICK_RATE_MS", 250),
            heartbeat_ms: env_var_or_default("ARBOR_HEARTBEAT_MS", 1000),
        }
    }
}

impl RuntimeConfig {
    pub fn max_iteration(&self) -> Duration {
        Duration::from_millis(self.max_iteration_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn heartbeat(&self) -> Duration {
        Duration::from_millis(self.heartbeat_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unparsable_value_falls_back() {
        env::set_var("ARBOR_TEST_UNPARSABLE", "sixteen");
        assert_eq!(env_var_or_default("ARBOR_TEST_UNPARSABLE", 16u64), 16);
        env::remove_var("ARBOR_TEST_UNPARSABLE");
    }

    #[test]
    fn test_override_is_parsed() {
        env::set_var("ARBOR_TEST_OVERRIDE", "40");
        assert_eq!(env_var_or_default("ARBOR_TEST_OVERRIDE", 16u64), 40);
        env::remove_var("ARBOR_TEST_OVERRIDE");
    }
}
