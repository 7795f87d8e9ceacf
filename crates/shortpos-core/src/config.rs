//! Configuration for the analytic operations

use crate::error::{Result, ShortPosError};
use serde::{Deserialize, Serialize};

/// Tunables for the analytic operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Number of rows reported by the top-shorted query
    pub top_shorted_limit: usize,

    /// Number of most recent rows reported by the trend query
    pub trend_window: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            top_shorted_limit: 5,
            trend_window: 5,
        }
    }
}

impl AnalyticsConfig {
    /// Create a new configuration builder
    pub fn builder() -> AnalyticsConfigBuilder {
        AnalyticsConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.top_shorted_limit == 0 {
            return Err(ShortPosError::Config(
                "top_shorted_limit must be greater than 0".to_string(),
            ));
        }

        if self.trend_window == 0 {
            return Err(ShortPosError::Config(
                "trend_window must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for AnalyticsConfig
#[derive(Debug, Default)]
pub struct AnalyticsConfigBuilder {
    top_shorted_limit: Option<usize>,
    trend_window: Option<usize>,
}

impl AnalyticsConfigBuilder {
    /// Set how many rows the top-shorted query returns
    pub fn top_shorted_limit(mut self, limit: usize) -> Self {
        self.top_shorted_limit = Some(limit);
        self
    }

    /// Set how many recent rows the trend query returns
    pub fn trend_window(mut self, window: usize) -> Self {
        self.trend_window = Some(window);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AnalyticsConfig> {
        let defaults = AnalyticsConfig::default();

        let config = AnalyticsConfig {
            top_shorted_limit: self.top_shorted_limit.unwrap_or(defaults.top_shorted_limit),
            trend_window: self.trend_window.unwrap_or(defaults.trend_window),
        };

        config.validate()?;
        Ok(config)
    }
}
