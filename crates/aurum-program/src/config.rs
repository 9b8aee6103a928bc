//! Program configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. The earn rate and tier threshold are business rules expected
//! to change per deployment, so nothing downstream hardcodes them - they
//! enter the system here and flow through as [`EarnRate`]/[`TierPolicy`]
//! values.

use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

use aurum_core::policy::{DEFAULT_GOLD_THRESHOLD, DEFAULT_POINTS_PER_DOLLAR};
use aurum_core::{EarnRate, TierPolicy};

/// Program configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramConfig {
    /// Points earned per whole dollar spent.
    pub points_per_dollar: i64,

    /// Balance at which a customer becomes Gold.
    pub gold_threshold: i64,

    /// Path to the SQLite database file.
    pub database_path: String,
}

impl ProgramConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable                    | Default        |
    /// |-----------------------------|----------------|
    /// | `LOYALTY_POINTS_PER_DOLLAR` | `10`           |
    /// | `LOYALTY_GOLD_THRESHOLD`    | `500`          |
    /// | `LOYALTY_DB_PATH`           | `./loyalty.db` |
    pub fn load() -> Result<Self, ConfigError> {
        let config = ProgramConfig {
            points_per_dollar: env::var("LOYALTY_POINTS_PER_DOLLAR")
                .unwrap_or_else(|_| DEFAULT_POINTS_PER_DOLLAR.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("LOYALTY_POINTS_PER_DOLLAR".to_string()))?,

            gold_threshold: env::var("LOYALTY_GOLD_THRESHOLD")
                .unwrap_or_else(|_| DEFAULT_GOLD_THRESHOLD.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("LOYALTY_GOLD_THRESHOLD".to_string()))?,

            database_path: env::var("LOYALTY_DB_PATH")
                .unwrap_or_else(|_| "./loyalty.db".to_string()),
        };

        if config.points_per_dollar <= 0 {
            return Err(ConfigError::InvalidValue(
                "LOYALTY_POINTS_PER_DOLLAR".to_string(),
            ));
        }

        Ok(config)
    }

    /// The earn rate this configuration describes.
    pub fn earn_rate(&self) -> EarnRate {
        EarnRate::new(self.points_per_dollar)
    }

    /// The tier policy this configuration describes.
    pub fn tier_policy(&self) -> TierPolicy {
        TierPolicy::new(self.gold_threshold)
    }
}

impl Default for ProgramConfig {
    fn default() -> Self {
        ProgramConfig {
            points_per_dollar: DEFAULT_POINTS_PER_DOLLAR,
            gold_threshold: DEFAULT_GOLD_THRESHOLD,
            database_path: "./loyalty.db".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable holds an unparseable or out-of-range value.
    #[error("Invalid configuration value for {0}")]
    InvalidValue(String),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use aurum_core::Tier;

    #[test]
    fn test_defaults() {
        let config = ProgramConfig::default();
        assert_eq!(config.points_per_dollar, 10);
        assert_eq!(config.gold_threshold, 500);
    }

    #[test]
    fn test_policies_reflect_config() {
        let config = ProgramConfig {
            points_per_dollar: 1,
            gold_threshold: 200,
            database_path: ":memory:".to_string(),
        };

        assert_eq!(config.earn_rate().points_for(10_000), 100);
        assert_eq!(config.tier_policy().classify(200), Tier::Gold);
        assert_eq!(config.tier_policy().classify(199), Tier::Standard);
    }
}
