// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

/*!
# Compute to Commute

This is the computational core of a dashboard that shows how much of the
waste heat of a data center could be reused to heat nearby households.

A prediction backend estimates the heat energy, in kWh, that will be
transferred over the next 6 hour horizon, and returns it together with the
energy observed over the past horizons.  This library turns that response
into the data shown on the dashboard.  Fetching the response and rendering
the dashboard are left to the caller.

## Chart series

[`build_chart_series`] turns a [`PredictionResponse`] into the points of a
predicted vs. actual energy chart, in chronological order, and extracts the
prediction for the next horizon from it.

## Metrics

A [`MetricsDeriver`] turns a prediction into [`DerivedMetrics`]: the number of
households that could be heated, locally and at hyperscale, and the heating
costs they would save.  The constants it uses can be changed through a
[`MetricsConfig`].

A missing prediction is not an error: [`derive`][MetricsDeriver::derive]
returns `Ok(None)` for it, which callers can show as a loading state.

## Pipe overlay

A [`PipeOverlay`] decides which [`PipeSegment`]s of the heat reuse network are
highlighted on the map, based on their waste score.

## Dashboard

The [`Dashboard`] ties the above together: each call to
[`refresh`][Dashboard::refresh] builds the chart series for a response and
derives the metrics for its prediction.

## Errors

All fallible operations return an [`Error`], whose [`ErrorKind`] tells
whether the response was malformed, a metric input was invalid, the
configuration was unusable, or a pipe segment was invalid.
*/

mod config;
pub use config::{DashboardConfig, MetricsConfig, PipeOverlayConfig};

mod chart;
pub use chart::{build_chart_series, ChartPoint, ChartSeries, HORIZON_HOURS};

mod dashboard;
pub use dashboard::{Dashboard, DashboardView};

mod error;
pub use error::{Error, ErrorKind};

mod metrics;
pub use metrics::{DerivedMetrics, MetricsDeriver};

mod pipes;
pub use pipes::{Coordinate, OverlayColor, PipeOverlay, PipeSegment};

mod prediction;
pub use prediction::PredictionResponse;
