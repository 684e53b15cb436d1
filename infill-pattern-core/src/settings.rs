//! Print settings the generators read.
//!
//! The slicer sends every setting as a string keyed by its setting name,
//! in its own user-facing units. This module picks out what the infill
//! needs and converts it into the integer micrometre scale.

use std::collections::HashMap;

use crate::error::SettingsError;
use crate::geometry::Coord;

/// Setting that holds the spacing between infill lines, in millimetres.
pub const LINE_DISTANCE_KEY: &str = "infill_line_distance";

const MICRONS_PER_MM: f64 = 1000.0;

/// Settings consumed by infill generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfillSettings {
    /// Line distance in micrometres. Always positive.
    pub line_distance: Coord,
}

impl InfillSettings {
    /// Read settings from the slicer's key/value map.
    pub fn from_map(settings: &HashMap<String, String>) -> Result<Self, SettingsError> {
        let raw = settings
            .get(LINE_DISTANCE_KEY)
            .ok_or_else(|| SettingsError::Missing(LINE_DISTANCE_KEY.to_string()))?;

        let line_distance = parse_millimetres(raw).ok_or_else(|| SettingsError::Invalid {
            key: LINE_DISTANCE_KEY.to_string(),
            value: raw.clone(),
        })?;

        Ok(Self { line_distance })
    }
}

/// Millimetre string to positive micrometres, truncating the fraction.
fn parse_millimetres(raw: &str) -> Option<Coord> {
    let mm: f64 = raw.trim().parse().ok()?;
    let microns = mm * MICRONS_PER_MM;
    if !microns.is_finite() || microns >= Coord::MAX as f64 {
        return None;
    }
    let microns = microns as Coord;
    (microns > 0).then_some(microns)
}
