// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module defines the `PredictionResponse` struct, which is the payload
//! returned by the heat prediction backend.

use serde::{Deserialize, Serialize};

use crate::Error;

/// A response from the heat prediction backend.
///
/// Every past time offset in `x_past` has a corresponding energy value at the
/// same position in `rolling_actuals`.  Time offsets are counted in units of
/// the 6 hour horizon.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Past time offsets, in horizon units.
    pub x_past: Vec<f64>,

    /// Observed energy values, in kWh, for each offset in `x_past`.
    pub rolling_actuals: Vec<f64>,

    /// Values produced by the model.  The value at index 1 is the prediction
    /// for the next horizon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub future_values: Option<Vec<Option<f64>>>,

    /// Direct prediction for the next horizon, in kWh, used when
    /// `future_values` doesn't have one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction_kwh: Option<f64>,
}

impl PredictionResponse {
    /// Parses a `PredictionResponse` from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| {
            tracing::warn!("Unable to decode prediction response: {e}");
            Error::malformed_prediction_response(e.to_string())
        })
    }

    /// Converts an already decoded JSON value into a `PredictionResponse`.
    pub fn from_value(value: serde_json::Value) -> Result<Self, Error> {
        serde_json::from_value(value).map_err(|e| {
            tracing::warn!("Unable to decode prediction response: {e}");
            Error::malformed_prediction_response(e.to_string())
        })
    }
}
