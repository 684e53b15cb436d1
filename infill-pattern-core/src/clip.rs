//! Boolean intersection of candidate paths against a clip region.
//!
//! Both modes hand the work to the Clipper engine through `geo-clipper`'s
//! integer API, after the clip region has been nested into
//! polygons-with-holes (outer contours counter-clockwise, holes clockwise,
//! so the nonzero rule subtracts the holes).
//!
//! - **Closed** candidates come back as polygons and are flattened into rings.
//! - **Open** candidates come back as loose polylines. Clipper does not keep
//!   their direction or their order, so every piece is matched to the source
//!   edge it lies on, turned to run the same way, and sorted back into input
//!   order. Cut points are rounded to the integer grid by Clipper; a cut
//!   that rounds to just outside the region is pulled back inside.

use std::cmp::Ordering;
use std::collections::HashMap;

use geo::{Coord as GeoCoord, LineString, MultiLineString, MultiPolygon, Polygon as GeoPolygon};
use geo_clipper::{ClipperInt, ClipperOpenInt};
use log::trace;

use crate::error::GeometryError;
use crate::geometry::{midpoint, Coord, Path, PathKind, Paths, Point};
use crate::region::{locate_even_odd, nest_rings, PointLocation, Region};

/// Largest coordinate magnitude Clipper accepts.
pub const CLIPPER_RANGE: Coord = 0x3FFF_FFFF_FFFF_FFFF;

/// Intersect `candidates` with `clip_region`.
///
/// An empty candidate set, an empty clip region or a clip region without
/// area all give an empty result. Fails only when a coordinate is beyond
/// [`CLIPPER_RANGE`].
pub fn clip(candidates: &[Path], kind: PathKind, clip_region: &[Path]) -> Result<Paths, GeometryError> {
    if candidates.is_empty() || clip_region.is_empty() {
        return Ok(Vec::new());
    }
    check_range(candidates)?;
    check_range(clip_region)?;

    let clip = regions_to_geo(&nest_rings(clip_region));
    if clip.0.is_empty() {
        return Ok(Vec::new());
    }

    Ok(match kind {
        PathKind::Open => clip_open(candidates, clip_region, &clip),
        PathKind::Closed => clip_closed(candidates, &clip),
    })
}

fn check_range(paths: &[Path]) -> Result<(), GeometryError> {
    match paths
        .iter()
        .flatten()
        .flat_map(|p| [p.x, p.y])
        .find(|c| c.unsigned_abs() > CLIPPER_RANGE as u64)
    {
        Some(value) => Err(GeometryError::OutOfRange { value }),
        None => Ok(()),
    }
}

// ============================================================================
// GEO CONVERSIONS
// ============================================================================

fn to_line_string(path: &[Point]) -> LineString<i64> {
    LineString::new(path.iter().map(|p| GeoCoord { x: p.x, y: p.y }).collect())
}

fn from_line_string(line: &LineString<i64>) -> Path {
    line.coords().map(|c| Point::new(c.x, c.y)).collect()
}

fn regions_to_geo(regions: &[Region]) -> MultiPolygon<i64> {
    MultiPolygon::new(
        regions
            .iter()
            .map(|region| {
                // `Polygon::new` closes the rings.
                GeoPolygon::new(
                    to_line_string(&region.outer),
                    region.holes.iter().map(|hole| to_line_string(hole)).collect(),
                )
            })
            .collect(),
    )
}

// ============================================================================
// CLOSED PATHS
// ============================================================================

fn clip_closed(polygons: &[Path], clip: &MultiPolygon<i64>) -> Paths {
    let subject = regions_to_geo(&nest_rings(polygons));
    if subject.0.is_empty() {
        return Vec::new();
    }

    let result = ClipperInt::intersection(&subject, clip);
    result
        .0
        .iter()
        .flat_map(|poly| std::iter::once(poly.exterior()).chain(poly.interiors().iter()))
        .map(|ring| {
            let mut path = from_line_string(ring);
            if path.len() > 1 && path.first() == path.last() {
                path.pop();
            }
            path
        })
        .filter(|path| path.len() >= 3)
        .collect()
}

// ============================================================================
// OPEN PATHS
// ============================================================================
//
// ## Rust Lesson #2: Sorting with a computed key
//
// `sort_by` takes a comparator closure, so the key can be anything that
// orders: here a `(polyline, edge, position)` triple. The sort is stable,
// so pieces Clipper returned in some order keep that order on ties.

fn clip_open(polylines: &[Path], clip_region: &[Path], clip: &MultiPolygon<i64>) -> Paths {
    let subject = MultiLineString::new(
        polylines
            .iter()
            .filter(|line| line.len() >= 2)
            .map(|line| to_line_string(line))
            .collect(),
    );
    if subject.0.is_empty() {
        return Vec::new();
    }

    let pieces = ClipperOpenInt::intersection(&subject, clip);
    let index = EdgeIndex::new(polylines);

    let mut placed: Vec<(Placement, Path)> = pieces
        .0
        .iter()
        .map(from_line_string)
        .filter(|piece| piece.len() >= 2)
        .filter_map(|piece| {
            let (placement, piece) = index.orient(piece);
            settle_endpoints(piece, clip_region).map(|piece| (placement, piece))
        })
        .collect();

    placed.sort_by(|a, b| a.0.order(&b.0));
    placed.into_iter().map(|(_, piece)| piece).collect()
}

/// Where a clipped piece starts on its source polyline.
#[derive(Debug, Clone, Copy)]
struct Placement {
    polyline: usize,
    edge: usize,
    /// Fraction along the edge, `0.0` at its first vertex.
    t: f64,
}

impl Placement {
    /// For pieces that match no source edge; they sort last.
    const UNPLACED: Placement = Placement { polyline: usize::MAX, edge: usize::MAX, t: 0.0 };

    fn order(&self, other: &Placement) -> Ordering {
        (self.polyline, self.edge)
            .cmp(&(other.polyline, other.edge))
            .then(self.t.total_cmp(&other.t))
    }
}

/// Squared distance a Clipper output point may sit from its source edge.
/// Covers rounding of a cut point to the integer grid.
const MATCH_TOLERANCE_SQ: f64 = 4.0;

/// Uniform grid over the source edges, used to find the edge a piece came from.
struct EdgeIndex<'a> {
    polylines: &'a [Path],
    cell: i64,
    grid: HashMap<(i64, i64), Vec<(usize, usize)>>,
}

impl<'a> EdgeIndex<'a> {
    fn new(polylines: &'a [Path]) -> Self {
        // A cell at least as large as the longest edge keeps each edge in at
        // most four cells.
        let cell = polylines
            .iter()
            .flat_map(|line| line.windows(2))
            .map(|w| (w[1].x - w[0].x).abs().max((w[1].y - w[0].y).abs()))
            .max()
            .unwrap_or(1)
            .max(4);

        let mut index = EdgeIndex { polylines, cell, grid: HashMap::new() };
        for (i, line) in polylines.iter().enumerate() {
            for (k, w) in line.windows(2).enumerate() {
                let (lo, hi) = (index.key(min_point(w[0], w[1])), index.key(max_point(w[0], w[1])));
                for cx in lo.0..=hi.0 {
                    for cy in lo.1..=hi.1 {
                        index.grid.entry((cx, cy)).or_default().push((i, k));
                    }
                }
            }
        }
        index
    }

    fn key(&self, p: Point) -> (i64, i64) {
        (p.x.div_euclid(self.cell), p.y.div_euclid(self.cell))
    }

    /// The first source edge (in input order) that both points lie along.
    fn find(&self, p0: Point, p1: Point) -> Option<(usize, usize)> {
        let mid = Point::new(midpoint(p0.x, p1.x), midpoint(p0.y, p1.y));
        let (cx, cy) = self.key(mid);

        let mut best: Option<(usize, usize)> = None;
        for dx in -1..=1 {
            for dy in -1..=1 {
                let Some(edges) = self.grid.get(&(cx + dx, cy + dy)) else {
                    continue;
                };
                for &(i, k) in edges {
                    if best.is_some_and(|b| b <= (i, k)) {
                        continue;
                    }
                    let (a, b) = (self.polylines[i][k], self.polylines[i][k + 1]);
                    if distance_sq(a, b, p0) <= MATCH_TOLERANCE_SQ
                        && distance_sq(a, b, p1) <= MATCH_TOLERANCE_SQ
                    {
                        best = Some((i, k));
                    }
                }
            }
        }
        best
    }

    /// Turn `piece` to run the way its source polyline runs, and place it.
    fn orient(&self, mut piece: Path) -> (Placement, Path) {
        let Some((i, k)) = self.find(piece[0], piece[1]) else {
            trace!("clipped piece {:?} matches no source edge", piece.first());
            return (Placement::UNPLACED, piece);
        };

        let (a, b) = (self.polylines[i][k], self.polylines[i][k + 1]);
        if dot(offset(piece[0], piece[1]), offset(a, b)) < 0.0 {
            piece.reverse();
            // The old last edge is now the first one; place from it.
            if let Some(found) = self.find(piece[0], piece[1]) {
                return (self.placement(found, piece[0]), piece);
            }
            return (Placement::UNPLACED, piece);
        }
        (self.placement((i, k), piece[0]), piece)
    }

    fn placement(&self, (i, k): (usize, usize), start: Point) -> Placement {
        let (a, b) = (self.polylines[i][k], self.polylines[i][k + 1]);
        let ab = offset(a, b);
        let len_sq = dot(ab, ab);
        let t = if len_sq > 0.0 { dot(offset(a, start), ab) / len_sq } else { 0.0 };
        Placement { polyline: i, edge: k, t }
    }
}

/// Pull a piece's cut ends back inside the region; `None` drops the piece.
fn settle_endpoints(mut piece: Path, region: &[Path]) -> Option<Path> {
    let last = piece.len() - 1;
    piece[0] = pull_inside(piece[0], piece[1], region)?;
    piece[last] = pull_inside(piece[last], piece[last - 1], region)?;
    (piece[0] != piece[1] && piece[last] != piece[last - 1]).then_some(piece)
}

/// Grid steps a rounded cut point may be moved toward its neighbour.
const MAX_PULL_STEPS: i32 = 3;

fn pull_inside(end: Point, toward: Point, region: &[Path]) -> Option<Point> {
    if locate_even_odd(region, end) != PointLocation::Outside {
        return Some(end);
    }

    let (dx, dy) = offset(end, toward);
    let len = dx.hypot(dy);

    (1..=MAX_PULL_STEPS)
        .map(f64::from)
        .take_while(|&step| step < len)
        .map(|step| {
            Point::new(
                end.x + (dx * step / len).round() as Coord,
                end.y + (dy * step / len).round() as Coord,
            )
        })
        .find(|&p| locate_even_odd(region, p) != PointLocation::Outside)
}

fn min_point(a: Point, b: Point) -> Point {
    Point::new(a.x.min(b.x), a.y.min(b.y))
}

fn max_point(a: Point, b: Point) -> Point {
    Point::new(a.x.max(b.x), a.y.max(b.y))
}

fn dot(u: (f64, f64), v: (f64, f64)) -> f64 {
    u.0 * v.0 + u.1 * v.1
}

/// `to - from` per axis, exact before the conversion to `f64`.
fn offset(from: Point, to: Point) -> (f64, f64) {
    ((to.x as i128 - from.x as i128) as f64, (to.y as i128 - from.y as i128) as f64)
}

/// Squared distance from `p` to the segment `a`-`b`.
fn distance_sq(a: Point, b: Point, p: Point) -> f64 {
    let (abx, aby) = offset(a, b);
    let (apx, apy) = offset(a, p);
    let len_sq = abx * abx + aby * aby;
    let t = if len_sq > 0.0 { ((apx * abx + apy * aby) / len_sq).clamp(0.0, 1.0) } else { 0.0 };
    let (ex, ey) = (apx - t * abx, apy - t * aby);
    ex * ex + ey * ey
}
