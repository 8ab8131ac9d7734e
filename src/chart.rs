// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for turning a [`PredictionResponse`] into the points of the
//! predicted vs. actual heat energy chart.

use serde::Serialize;

use crate::{Error, PredictionResponse};

/// Length of the prediction horizon, in hours.
pub const HORIZON_HOURS: f64 = 6.0;

/// A single point on the heat energy chart.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartPoint {
    /// The x-axis label of the point.
    pub label: String,

    /// The observed energy, in kWh.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<f64>,

    /// The predicted energy, in kWh.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted: Option<f64>,
}

/// The chart points built from a prediction response, in chronological
/// order, along with the prediction that was extracted from it.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub points: Vec<ChartPoint>,
    pub prediction: Option<f64>,
}

/// Builds the chart series for the given prediction response.
///
/// Every past offset becomes a point with an actual value.  The last of them
/// also carries its actual value as the predicted value, so that the
/// predicted line starts where the actual line ends.  If the response has a
/// prediction, a final `+6h` point with only the predicted value is added.
///
/// Returns an error if `x_past` and `rolling_actuals` have different lengths.
pub fn build_chart_series(response: &PredictionResponse) -> Result<ChartSeries, Error> {
    if response.x_past.len() != response.rolling_actuals.len() {
        return Err(Error::malformed_prediction_response(format!(
            "x_past has {} values, but rolling_actuals has {}.",
            response.x_past.len(),
            response.rolling_actuals.len()
        )));
    }

    let last = response.x_past.len().saturating_sub(1);
    let mut points: Vec<ChartPoint> = response
        .x_past
        .iter()
        .zip(&response.rolling_actuals)
        .enumerate()
        .map(|(i, (&offset, &actual))| ChartPoint {
            label: offset_label(offset),
            actual: Some(actual),
            predicted: (i == last).then_some(actual),
        })
        .collect();

    let prediction = extract_prediction(response);
    if let Some(predicted) = prediction {
        points.push(ChartPoint {
            label: format!("+{HORIZON_HOURS}h"),
            actual: None,
            predicted: Some(predicted),
        });
    }

    tracing::debug!(
        "Built chart series with {} points, prediction: {:?}",
        points.len(),
        prediction
    );

    Ok(ChartSeries { points, prediction })
}

/// Returns `future_values[1]` if it is present, and `prediction_kwh`
/// otherwise.
fn extract_prediction(response: &PredictionResponse) -> Option<f64> {
    let from_future_values = response
        .future_values
        .as_ref()
        .and_then(|values| values.get(1).copied().flatten());

    if from_future_values.is_none() && response.prediction_kwh.is_some() {
        tracing::debug!("No prediction in future_values, using prediction_kwh.");
    }

    from_future_values.or(response.prediction_kwh)
}

/// Formats a past offset, given in horizon units, as an hour label.
fn offset_label(offset: f64) -> String {
    let hours = offset * HORIZON_HOURS;
    // Avoid rendering `-0h`.
    let hours = if hours == 0.0 { 0.0 } else { hours };
    format!("{hours}h")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn point(label: &str, actual: Option<f64>, predicted: Option<f64>) -> ChartPoint {
        ChartPoint {
            label: label.to_string(),
            actual,
            predicted,
        }
    }

    #[test]
    fn test_series_with_future_values() -> Result<(), Error> {
        let response = PredictionResponse {
            x_past: vec![0.0, 1.0],
            rolling_actuals: vec![10.0, 20.0],
            future_values: Some(vec![Some(25.0), Some(30.0)]),
            prediction_kwh: Some(99.0),
        };

        let series = build_chart_series(&response)?;
        assert_eq!(
            series.points,
            vec![
                point("0h", Some(10.0), None),
                point("6h", Some(20.0), Some(20.0)),
                point("+6h", None, Some(30.0)),
            ]
        );
        assert_eq!(series.prediction, Some(30.0));

        Ok(())
    }

    #[test]
    fn test_prediction_fallbacks() -> Result<(), Error> {
        let mut response = PredictionResponse {
            x_past: vec![-1.0, 0.0],
            rolling_actuals: vec![8.5, 9.0],
            future_values: None,
            prediction_kwh: Some(42.0),
        };

        let series = build_chart_series(&response)?;
        assert_eq!(series.points.last(), Some(&point("+6h", None, Some(42.0))));
        assert_eq!(series.prediction, Some(42.0));

        // A missing value at index 1 falls back to `prediction_kwh` too.
        response.future_values = Some(vec![Some(1.0)]);
        assert_eq!(build_chart_series(&response)?.prediction, Some(42.0));

        response.future_values = Some(vec![Some(1.0), None]);
        assert_eq!(build_chart_series(&response)?.prediction, Some(42.0));

        // Without any prediction, no forecast point is added.
        response.prediction_kwh = None;
        let series = build_chart_series(&response)?;
        assert_eq!(series.prediction, None);
        assert_eq!(
            series.points,
            vec![
                point("-6h", Some(8.5), None),
                point("0h", Some(9.0), Some(9.0)),
            ]
        );

        Ok(())
    }

    #[test]
    fn test_series_without_past_values() -> Result<(), Error> {
        let response = PredictionResponse {
            future_values: Some(vec![None, Some(12.5)]),
            ..Default::default()
        };

        let series = build_chart_series(&response)?;
        assert_eq!(series.points, vec![point("+6h", None, Some(12.5))]);
        assert_eq!(series.prediction, Some(12.5));

        let series = build_chart_series(&PredictionResponse::default())?;
        assert_eq!(series, ChartSeries::default());

        Ok(())
    }

    #[test]
    fn test_length_mismatch() {
        let response = PredictionResponse {
            x_past: vec![0.0, 1.0, 2.0],
            rolling_actuals: vec![10.0, 20.0],
            future_values: Some(vec![None, Some(30.0)]),
            prediction_kwh: None,
        };

        let result = build_chart_series(&response);
        assert!(result.is_err_and(|e| e.kind() == ErrorKind::MalformedPredictionResponse
            && e.to_string()
                == "MalformedPredictionResponse: x_past has 3 values, but rolling_actuals has 2."));
    }

    #[test]
    fn test_offset_labels() {
        assert_eq!(offset_label(0.0), "0h");
        assert_eq!(offset_label(-0.0), "0h");
        assert_eq!(offset_label(3.0), "18h");
        assert_eq!(offset_label(-4.0), "-24h");
        assert_eq!(offset_label(0.25), "1.5h");
    }

    #[test]
    fn test_build_is_idempotent() -> Result<(), Error> {
        let response = PredictionResponse {
            x_past: vec![0.1, 0.2, 0.3],
            rolling_actuals: vec![1.0 / 3.0, 2.0 / 3.0, 0.1 + 0.2],
            future_values: Some(vec![None, Some(0.7)]),
            prediction_kwh: None,
        };

        assert_eq!(build_chart_series(&response)?, build_chart_series(&response)?);

        Ok(())
    }

    #[test]
    fn test_serialized_points_omit_missing_values() -> Result<(), Error> {
        let series = build_chart_series(&PredictionResponse {
            x_past: vec![0.0, 1.0],
            rolling_actuals: vec![10.0, 20.0],
            future_values: None,
            prediction_kwh: Some(30.0),
        })?;

        assert_eq!(
            serde_json::to_value(&series).unwrap(),
            serde_json::json!({
                "points": [
                    {"label": "0h", "actual": 10.0},
                    {"label": "6h", "actual": 20.0, "predicted": 20.0},
                    {"label": "+6h", "predicted": 30.0},
                ],
                "prediction": 30.0,
            })
        );

        Ok(())
    }
}
