//! Hilbert curve infill - space-filling curve.
//!
//! The curve is built over a square of side `2^depth * line_distance`
//! centred on the outline's bounding box, so neighbouring cell centres sit
//! exactly one line distance apart. Vertices outside the bounding rectangle
//! are skipped and the raw segments are clipped against the real outlines.
//!
//! ## Rust Lesson #3: Explicit accumulators instead of captured state
//!
//! A recursive closure that mutates captured variables fights the borrow
//! checker. Instead the state lives in a plain struct and a free function
//! takes it by `&mut`:
//!
//! ```text
//! fn walk(state: &mut CurveWalk, ..., depth: u32) {
//!     walk(state, ..., depth - 1);   // reborrows, no clone
//! }
//! ```

use log::{debug, warn};

use crate::clip::clip;
use crate::error::GenerateError;
use crate::geometry::{bounding_box, Coord, Path, PathKind, Paths, Point};
use crate::region::inside;

use super::InfillOutput;

/// Hilbert curve generator for one set of outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hilbert {
    line_distance: Coord,
}

impl Hilbert {
    /// `line_distance` must be positive; generation fails softly otherwise.
    pub fn new(line_distance: Coord) -> Self {
        Self { line_distance }
    }

    pub fn line_distance(&self) -> Coord {
        self.line_distance
    }

    /// Fill `outlines`. Any failure is logged and yields empty output.
    pub fn generate(self, outlines: &[Path]) -> InfillOutput {
        match self.try_generate(outlines) {
            Ok(output) => output,
            Err(err) => {
                warn!("hilbert infill skipped: {err}");
                InfillOutput::default()
            }
        }
    }

    /// Fill `outlines`, surfacing the reason when nothing can be generated.
    pub fn try_generate(self, outlines: &[Path]) -> Result<InfillOutput, GenerateError> {
        let bbox = bounding_box(outlines)?;
        let sizing = CurveSizing::new(bbox.max_extent(), self.line_distance)?;

        let half = sizing.size / 2;
        let corner = Point::new(
            bbox.center().x.checked_sub(half).ok_or_else(overflow)?,
            bbox.center().y.checked_sub(half).ok_or_else(overflow)?,
        );

        debug!(
            "hilbert: bbox {:?}..{:?}, depth {}, square {} at {:?}",
            bbox.min, bbox.max, sizing.depth, sizing.size, corner
        );

        let mut walk = CurveWalk::new(bbox.to_path());
        walk_curve(
            &mut walk,
            corner,
            Point::new(sizing.size, 0),
            Point::new(0, sizing.size),
            sizing.depth,
        );

        let raw = walk.segments.len();
        let lines = clip(&walk.segments, PathKind::Open, outlines)?;
        debug!("hilbert: {raw} raw segments, {} after clipping", lines.len());

        Ok(InfillOutput { lines, polygons: Vec::new() })
    }
}

fn overflow() -> GenerateError {
    GenerateError::NumericDomain("curve square does not fit the coordinate range".into())
}

// ============================================================================
// SIZING
// ============================================================================

/// Recursion depth and side length of the square the curve is drawn over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveSizing {
    pub depth: u32,
    pub size: Coord,
}

impl CurveSizing {
    /// Smallest power-of-two multiple of `line_distance` covering `max_extent`.
    ///
    /// The ratio is taken in floating point so the square never ends up
    /// smaller than the extent it has to cover.
    pub fn new(max_extent: Coord, line_distance: Coord) -> Result<Self, GenerateError> {
        if line_distance <= 0 {
            return Err(GenerateError::NumericDomain(format!(
                "line distance must be positive, got {line_distance}"
            )));
        }

        let ratio = max_extent as f64 / line_distance as f64;
        let depth = ratio.log2().ceil();
        if !depth.is_finite() {
            return Err(GenerateError::NumericDomain(format!(
                "cannot size a curve for extent {max_extent} at line distance {line_distance}"
            )));
        }
        // Extents smaller than one line distance still get a single cell.
        let depth = depth.max(0.0) as u32;

        let size = 2_i64
            .checked_pow(depth)
            .and_then(|cells| cells.checked_mul(line_distance))
            .filter(|&size| size <= Coord::MAX / 4)
            .ok_or_else(overflow)?;

        Ok(Self { depth, size })
    }
}

// ============================================================================
// CURVE WALK
// ============================================================================

/// State threaded through the recursion.
struct CurveWalk {
    /// Vertices outside this rectangle are not emitted.
    bounds: Path,
    last: Point,
    started: bool,
    segments: Paths,
}

impl CurveWalk {
    fn new(bounds: Path) -> Self {
        Self {
            bounds,
            last: Point::default(),
            started: false,
            segments: Vec::new(),
        }
    }

    fn visit(&mut self, vertex: Point) {
        if inside(&self.bounds, vertex, false) {
            if self.started {
                self.segments.push(vec![self.last, vertex]);
            }
            self.started = true;
        }
        // Skipped vertices still anchor the next segment.
        self.last = vertex;
    }
}

/// Visit the cells of the quadrant spanned by `x_axis` and `y_axis` from
/// `origin`, in Hilbert order.
fn walk_curve(walk: &mut CurveWalk, origin: Point, x_axis: Point, y_axis: Point, depth: u32) {
    if depth == 0 {
        walk.visit(origin + (x_axis + y_axis).half());
        return;
    }

    let hx = x_axis.half();
    let hy = y_axis.half();
    let depth = depth - 1;

    walk_curve(walk, origin, hy, hx, depth);
    walk_curve(walk, origin + hx, hx, hy, depth);
    walk_curve(walk, origin + hx + hy, hx, hy, depth);
    walk_curve(walk, origin + hx + y_axis, -hy, -hx, depth);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: i64, y0: i64, x1: i64, y1: i64) -> Path {
        vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ]
    }

    fn length(segment: &[Point]) -> i64 {
        let d = segment[1] - segment[0];
        d.x.abs() + d.y.abs()
    }

    #[test]
    fn sizing_covers_extent() {
        assert_eq!(CurveSizing::new(1000, 250), Ok(CurveSizing { depth: 2, size: 1000 }));
        assert_eq!(CurveSizing::new(1100, 250), Ok(CurveSizing { depth: 3, size: 2000 }));
        assert_eq!(CurveSizing::new(100, 250), Ok(CurveSizing { depth: 0, size: 250 }));
        assert_eq!(CurveSizing::new(250, 250), Ok(CurveSizing { depth: 0, size: 250 }));
    }

    #[test]
    fn sizing_rejects_bad_input() {
        assert!(matches!(CurveSizing::new(0, 250), Err(GenerateError::NumericDomain(_))));
        assert!(matches!(CurveSizing::new(1000, 0), Err(GenerateError::NumericDomain(_))));
        assert!(matches!(CurveSizing::new(1000, -5), Err(GenerateError::NumericDomain(_))));
        assert!(matches!(
            CurveSizing::new(Coord::MAX / 2, 1),
            Err(GenerateError::NumericDomain(_))
        ));
    }

    #[test]
    fn square_gives_unit_steps_between_cell_centres() {
        let output = Hilbert::new(250).generate(&[rect(0, 0, 1000, 1000)]);

        assert!(output.polygons.is_empty());
        assert_eq!(output.lines.len(), 15);
        for line in &output.lines {
            assert_eq!(line.len(), 2);
            assert_eq!(length(line), 250);
            for p in line {
                assert_eq!((p.x - 125) % 250, 0);
                assert_eq!((p.y - 125) % 250, 0);
            }
        }
    }

    #[test]
    fn segments_chain_end_to_start() {
        let output = Hilbert::new(250).generate(&[rect(0, 0, 1000, 1000)]);
        assert_eq!(output.lines[0][0], Point::new(125, 125));
        for pair in output.lines.windows(2) {
            assert_eq!(pair[0][1], pair[1][0]);
        }
    }

    #[test]
    fn rectangle_stays_inside_outline() {
        let outline = rect(0, 0, 1100, 500);
        let output = Hilbert::new(100).generate(std::slice::from_ref(&outline));

        assert!(!output.lines.is_empty());
        for p in output.lines.iter().flatten() {
            assert!(inside(&outline, *p, true), "{p:?} escaped the outline");
        }
    }

    #[test]
    fn holes_are_left_empty() {
        let hole = vec![
            Point::new(400, 400),
            Point::new(400, 600),
            Point::new(600, 600),
            Point::new(600, 400),
        ];
        let outlines = vec![rect(0, 0, 1000, 1000), hole];
        let output = Hilbert::new(50).generate(&outlines);

        assert!(!output.lines.is_empty());
        for line in &output.lines {
            for segment in line.windows(2) {
                let mid = (segment[0] + segment[1]) * 0.5;
                assert!(
                    !(mid.x > 400 && mid.x < 600 && mid.y > 400 && mid.y < 600),
                    "segment {segment:?} runs through the hole"
                );
            }
        }
    }

    #[test]
    fn empty_outline_gives_empty_output() {
        assert_eq!(Hilbert::new(250).generate(&[]), InfillOutput::default());
        assert_eq!(Hilbert::new(250).generate(&[vec![]]), InfillOutput::default());
        assert!(Hilbert::new(250).try_generate(&[]).is_err());
    }

    #[test]
    fn degenerate_outline_gives_empty_output() {
        let point = vec![vec![Point::new(10, 10)]];
        assert_eq!(Hilbert::new(250).generate(&point), InfillOutput::default());
        assert!(matches!(
            Hilbert::new(250).try_generate(&point),
            Err(GenerateError::NumericDomain(_))
        ));
    }

    #[test]
    fn tiny_outline_has_single_vertex_and_no_lines() {
        let output = Hilbert::new(250).generate(&[rect(0, 0, 100, 100)]);
        assert!(output.lines.is_empty());
    }
}
