// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the `MetricsDeriver`, which turns a predicted amount
//! of reusable heat into the metrics shown on the dashboard.

use serde::Serialize;

use crate::{Error, MetricsConfig};

/// The display metrics for a single prediction.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DerivedMetrics {
    /// Number of households the predicted heat can supply over the horizon.
    pub households_local: i64,

    /// Number of households a hyperscale facility could supply.
    pub households_hyperscale: i64,

    /// Heating cost saved by the households, in USD.
    pub savings_local_usd: f64,

    /// Heating cost saved at hyperscale, in USD.
    pub savings_hyperscale_usd: f64,
}

/// Derives [`DerivedMetrics`] from predicted heat energy.
#[derive(Clone, Debug, Default)]
pub struct MetricsDeriver {
    config: MetricsConfig,
}

impl MetricsDeriver {
    /// Creates a new `MetricsDeriver` with the given constants.
    ///
    /// Returns an error if any constant is not finite, if the household draw
    /// or the hyperscale multiplier is not positive, or if the electricity
    /// rate is negative.
    pub fn try_new(config: MetricsConfig) -> Result<Self, Error> {
        let MetricsConfig {
            kwh_per_household_per_6h,
            hyperscale_multiplier,
            cost_per_kwh_usd,
        } = config;

        if !(kwh_per_household_per_6h.is_finite() && kwh_per_household_per_6h > 0.0) {
            return Err(Error::invalid_config(format!(
                "kwh_per_household_per_6h must be a positive number, got {kwh_per_household_per_6h}."
            )));
        }
        if !(hyperscale_multiplier.is_finite() && hyperscale_multiplier > 0.0) {
            return Err(Error::invalid_config(format!(
                "hyperscale_multiplier must be a positive number, got {hyperscale_multiplier}."
            )));
        }
        if !(cost_per_kwh_usd.is_finite() && cost_per_kwh_usd >= 0.0) {
            return Err(Error::invalid_config(format!(
                "cost_per_kwh_usd must be a non-negative number, got {cost_per_kwh_usd}."
            )));
        }

        Ok(Self { config })
    }

    /// Returns the constants used by the deriver.
    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    /// Derives the display metrics for the given predicted energy, in kWh
    /// over the 6 hour horizon.
    ///
    /// Returns `Ok(None)` when there is no prediction yet, and an error if
    /// the prediction is not a finite number.
    pub fn derive(&self, predicted_kwh: Option<f64>) -> Result<Option<DerivedMetrics>, Error> {
        let Some(kwh) = predicted_kwh else {
            return Ok(None);
        };

        if !kwh.is_finite() {
            tracing::warn!("Rejecting non-finite predicted energy: {kwh}");
            return Err(Error::invalid_metric_input(format!(
                "Predicted energy must be a finite number, got {kwh}."
            )));
        }

        let MetricsConfig {
            kwh_per_household_per_6h,
            hyperscale_multiplier,
            cost_per_kwh_usd,
        } = self.config;

        let metrics = DerivedMetrics {
            households_local: floor_to_count(kwh / kwh_per_household_per_6h)?,
            households_hyperscale: floor_to_count(
                (kwh * hyperscale_multiplier) / kwh_per_household_per_6h,
            )?,
            savings_local_usd: kwh * cost_per_kwh_usd,
            savings_hyperscale_usd: kwh * hyperscale_multiplier * cost_per_kwh_usd,
        };

        tracing::debug!("Derived metrics for {kwh} kWh: {metrics:?}");

        Ok(Some(metrics))
    }
}

/// Floors the given household count, failing if it doesn't fit in an `i64`.
fn floor_to_count(households: f64) -> Result<i64, Error> {
    let floored = households.floor();
    // `i64::MAX as f64` rounds up to 2^63, which is itself out of range.
    if !(floored.is_finite() && floored >= i64::MIN as f64 && floored < i64::MAX as f64) {
        return Err(Error::invalid_metric_input(format!(
            "Household count {floored} is out of range."
        )));
    }
    Ok(floored as i64)
}
