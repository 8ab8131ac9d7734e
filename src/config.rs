// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the configuration options for the metrics deriver,
//! the pipe overlay and the `Dashboard`.

use serde::Deserialize;

/// Constants used to turn predicted heat energy into display metrics.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Average heating draw of a household over the 6 hour horizon, in kWh.
    pub kwh_per_household_per_6h: f64,

    /// Capacity ratio of a hyperscale facility vs. the baseline facility.
    pub hyperscale_multiplier: f64,

    /// Residential electricity rate, in USD per kWh.
    pub cost_per_kwh_usd: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            kwh_per_household_per_6h: 7.25,
            hyperscale_multiplier: 75.0,
            cost_per_kwh_usd: 0.16,
        }
    }
}

/// Configuration options for the pipe overlay.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipeOverlayConfig {
    /// Pipe segments with a waste score strictly above this value are
    /// highlighted.
    pub waste_threshold: f64,
}

impl Default for PipeOverlayConfig {
    fn default() -> Self {
        Self {
            waste_threshold: 0.8,
        }
    }
}

/// Configuration options for the `Dashboard`.
#[derive(Clone, Default, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub metrics: MetricsConfig,
    pub overlay: PipeOverlayConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{"metrics": {"hyperscale_multiplier": 100}}"#).unwrap();

        assert_eq!(config.metrics.hyperscale_multiplier, 100.0);
        assert_eq!(config.metrics.kwh_per_household_per_6h, 7.25);
        assert_eq!(config.metrics.cost_per_kwh_usd, 0.16);
        assert_eq!(config.overlay, PipeOverlayConfig::default());

        let config: DashboardConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
    }
}
