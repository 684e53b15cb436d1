//! JSON request/response shapes exchanged with the slicer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use infill_pattern_core::{InfillOutput, Path, Paths, Point};

/// Status for a request that produced a response body.
pub const STATUS_OK: &str = "OK";

/// Status for a request that failed before generation.
pub const STATUS_INTERNAL: &str = "INTERNAL";

/// A point as it travels over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePoint {
    pub x: i64,
    pub y: i64,
}

impl From<WirePoint> for Point {
    fn from(p: WirePoint) -> Self {
        Point::new(p.x, p.y)
    }
}

impl From<Point> for WirePoint {
    fn from(p: Point) -> Self {
        WirePoint { x: p.x, y: p.y }
    }
}

/// One area to fill: an outer contour and the holes inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfillArea {
    pub outline: Vec<WirePoint>,
    #[serde(default)]
    pub holes: Vec<Vec<WirePoint>>,
}

/// Incoming generation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRequest {
    /// Full pattern identifier, e.g. `PLUGIN::CuraEnginePattern@0.1.0::HILBERT`.
    pub pattern: String,
    /// Slicer settings, every value a string.
    #[serde(default)]
    pub settings: HashMap<String, String>,
    #[serde(default)]
    pub infill_areas: Vec<InfillArea>,
}

impl CallRequest {
    /// Every outline followed by its holes, as one unlabeled ring collection.
    pub fn outlines(&self) -> Paths {
        self.infill_areas
            .iter()
            .flat_map(|area| std::iter::once(&area.outline).chain(&area.holes))
            .map(|ring| to_path(ring))
            .collect()
    }
}

/// A closed area in the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePolygon {
    pub outline: Vec<WirePoint>,
}

/// Outgoing response. `message` is only set on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub poly_lines: Vec<Vec<WirePoint>>,
    #[serde(default)]
    pub polygons: Vec<WirePolygon>,
}

impl CallResponse {
    pub fn ok(output: &InfillOutput) -> Self {
        CallResponse {
            status: STATUS_OK.to_string(),
            message: None,
            poly_lines: output.lines.iter().map(|line| to_wire(line)).collect(),
            polygons: output
                .polygons
                .iter()
                .map(|polygon| WirePolygon { outline: to_wire(polygon) })
                .collect(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CallResponse {
            status: STATUS_INTERNAL.to_string(),
            message: Some(message.into()),
            poly_lines: Vec::new(),
            polygons: Vec::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

fn to_path(ring: &[WirePoint]) -> Path {
    ring.iter().map(|&p| Point::from(p)).collect()
}

fn to_wire(path: &[Point]) -> Vec<WirePoint> {
    path.iter().map(|&p| WirePoint::from(p)).collect()
}
