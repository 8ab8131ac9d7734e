// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module defines the `PipeSegment` struct and the `PipeOverlay`, which
//! decides how each segment of the heat reuse pipe network is highlighted on
//! the map.

use std::collections::HashSet;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, PipeOverlayConfig};

/// A geographic position, serialized as a `[lat, lon]` pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(coordinate: Coordinate) -> Self {
        (coordinate.lat, coordinate.lon)
    }
}

#[derive(Deserialize)]
struct RawPipeSegment {
    id: u64,
    coordinates: Vec<Coordinate>,
    waste_score: f64,
}

/// A segment of the pipe network, along with the fraction of the heat it
/// carries that goes to waste.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPipeSegment")]
pub struct PipeSegment {
    id: u64,
    coordinates: Vec<Coordinate>,
    waste_score: f64,
}

impl TryFrom<RawPipeSegment> for PipeSegment {
    type Error = Error;

    fn try_from(raw: RawPipeSegment) -> Result<Self, Self::Error> {
        Self::try_new(raw.id, raw.coordinates, raw.waste_score)
    }
}

impl PipeSegment {
    /// Creates a new `PipeSegment`.
    ///
    /// Returns an error if the segment has less than two coordinates, if any
    /// coordinate is not a valid position, or if the waste score is not in
    /// the `[0, 1]` range.
    pub fn try_new(
        id: u64,
        coordinates: impl IntoIterator<Item = Coordinate>,
        waste_score: f64,
    ) -> Result<Self, Error> {
        let coordinates: Vec<Coordinate> = coordinates.into_iter().collect();

        if coordinates.len() < 2 {
            return Err(Error::invalid_pipe_segment(format!(
                "Pipe segment {id} needs at least two coordinates, found {}.",
                coordinates.len()
            )));
        }
        if let Some(c) = coordinates.iter().find(|c| !c.is_valid()) {
            return Err(Error::invalid_pipe_segment(format!(
                "Pipe segment {id} has an invalid coordinate: [{}, {}].",
                c.lat, c.lon
            )));
        }
        if !(0.0..=1.0).contains(&waste_score) {
            return Err(Error::invalid_pipe_segment(format!(
                "Pipe segment {id} has a waste score outside [0, 1]: {waste_score}."
            )));
        }

        Ok(Self {
            id,
            coordinates,
            waste_score,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    pub fn waste_score(&self) -> f64 {
        self.waste_score
    }
}

/// The color a pipe segment is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayColor {
    Red,
    Green,
}

impl Display for OverlayColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverlayColor::Red => write!(f, "red"),
            OverlayColor::Green => write!(f, "green"),
        }
    }
}

/// Highlights the pipe segments that waste most of their heat.
#[derive(Clone, Debug, Default)]
pub struct PipeOverlay {
    config: PipeOverlayConfig,
}

impl PipeOverlay {
    pub fn new(config: PipeOverlayConfig) -> Self {
        Self { config }
    }

    /// Returns the color of the given segment.
    pub fn color(&self, segment: &PipeSegment) -> OverlayColor {
        if segment.waste_score > self.config.waste_threshold {
            OverlayColor::Red
        } else {
            OverlayColor::Green
        }
    }

    /// Returns the id and color of each of the given segments, in order.
    ///
    /// Returns an error if two segments have the same id.
    pub fn classify<'a>(
        &self,
        segments: impl IntoIterator<Item = &'a PipeSegment>,
    ) -> Result<Vec<(u64, OverlayColor)>, Error> {
        let mut seen = HashSet::new();
        let mut colors = Vec::new();

        for segment in segments {
            if !seen.insert(segment.id) {
                return Err(Error::invalid_pipe_segment(format!(
                    "Duplicate pipe segment ID found: {}",
                    segment.id
                )));
            }
            colors.push((segment.id, self.color(segment)));
        }

        Ok(colors)
    }
}
