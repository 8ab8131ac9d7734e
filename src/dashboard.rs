// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The `Dashboard` connects the chart series builder and the metrics
//! deriver.  It holds only configuration: the prediction is passed in by the
//! caller on every refresh.

use serde::Serialize;

use crate::chart::{build_chart_series, ChartSeries};
use crate::metrics::{DerivedMetrics, MetricsDeriver};
use crate::pipes::{OverlayColor, PipeOverlay, PipeSegment};
use crate::{DashboardConfig, Error, PredictionResponse};

/// Everything the presentation layer needs to render one prediction.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DashboardView {
    pub series: ChartSeries,
    pub metrics: Option<DerivedMetrics>,
}

impl DashboardView {
    /// Returns true if no prediction was available yet.
    pub fn is_loading(&self) -> bool {
        self.metrics.is_none()
    }
}

/// Turns prediction responses and pipe segments into dashboard data.
#[derive(Clone, Debug, Default)]
pub struct Dashboard {
    deriver: MetricsDeriver,
    overlay: PipeOverlay,
}

impl Dashboard {
    /// Creates a new `Dashboard` from the given configuration.
    ///
    /// Returns an error if the metrics constants are invalid.
    pub fn try_new(config: DashboardConfig) -> Result<Self, Error> {
        Ok(Self {
            deriver: MetricsDeriver::try_new(config.metrics)?,
            overlay: PipeOverlay::new(config.overlay),
        })
    }

    /// Builds the chart series for the given response and derives the
    /// metrics for its prediction.
    pub fn refresh(&self, response: &PredictionResponse) -> Result<DashboardView, Error> {
        let series = build_chart_series(response)?;
        let metrics = self.deriver.derive(series.prediction)?;

        if metrics.is_none() {
            tracing::debug!("Prediction response has no prediction yet.");
        }

        Ok(DashboardView { series, metrics })
    }

    /// Parses the given JSON prediction response and refreshes from it.
    pub fn refresh_json(&self, json: &str) -> Result<DashboardView, Error> {
        self.refresh(&PredictionResponse::from_json(json)?)
    }

    /// Returns the overlay color of each of the given pipe segments.
    pub fn pipe_colors<'a>(
        &self,
        segments: impl IntoIterator<Item = &'a PipeSegment>,
    ) -> Result<Vec<(u64, OverlayColor)>, Error> {
        self.overlay.classify(segments)
    }
}
