//! Point-in-polygon classification and ring nesting.
//!
//! All tests run in exact integer arithmetic. Differences are taken in
//! `i128` and cross products are compared as 128-bit magnitudes, so any two
//! `i64` points give an exact orientation.

use std::cmp::Ordering;

use crate::geometry::{Path, Paths, Point};

/// Where a point sits relative to a closed path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointLocation {
    Outside,
    Inside,
    OnBoundary,
}

/// A product of two `i128` factors of at most 65 significant bits, kept as
/// sign and magnitude so it cannot overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WideProduct {
    negative: bool,
    magnitude: u128,
}

impl WideProduct {
    fn new(a: i128, b: i128) -> Self {
        let magnitude = a.unsigned_abs() * b.unsigned_abs();
        Self { negative: magnitude != 0 && (a < 0) != (b < 0), magnitude }
    }
}

impl Ord for WideProduct {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, false) => self.magnitude.cmp(&other.magnitude),
            (true, true) => other.magnitude.cmp(&self.magnitude),
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
        }
    }
}

impl PartialOrd for WideProduct {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sign of the z component of `(b - a) × (p - a)`.
///
/// `Greater` when `p` is left of `a`→`b`, `Less` when right, `Equal` when
/// the three points are collinear.
pub(crate) fn orientation(a: Point, b: Point, p: Point) -> Ordering {
    let (ax, ay) = (a.x as i128, a.y as i128);
    let lhs = WideProduct::new(b.x as i128 - ax, p.y as i128 - ay);
    let rhs = WideProduct::new(b.y as i128 - ay, p.x as i128 - ax);
    lhs.cmp(&rhs)
}

/// True if `p` lies on the closed segment `a`-`b`.
#[inline]
pub(crate) fn on_segment(a: Point, b: Point, p: Point) -> bool {
    orientation(a, b, p) == Ordering::Equal
        && (a.x.min(b.x)..=a.x.max(b.x)).contains(&p.x)
        && (a.y.min(b.y)..=a.y.max(b.y)).contains(&p.y)
}

// ============================================================================
// POINT IN POLYGON (Ray Casting, exact)
// ============================================================================

/// Classify a point against a single closed path.
///
/// Casts a ray to the right and counts edge crossings; any edge the point
/// lies on short-circuits to `OnBoundary`. Paths with fewer than three
/// points have no interior and report `Outside`.
pub fn locate(path: &[Point], point: Point) -> PointLocation {
    let n = path.len();
    if n < 3 {
        return PointLocation::Outside;
    }

    let mut inside = false;
    let mut j = n - 1;

    for i in 0..n {
        let (a, b) = (path[j], path[i]);

        if on_segment(a, b, point) {
            return PointLocation::OnBoundary;
        }

        // Edge straddles the ray's y; the crossing is right of the point
        // when the point is left of an upward edge or right of a downward one.
        if (a.y > point.y) != (b.y > point.y)
            && (orientation(a, b, point) == Ordering::Greater) == (b.y > a.y)
        {
            inside = !inside;
        }

        j = i;
    }

    if inside {
        PointLocation::Inside
    } else {
        PointLocation::Outside
    }
}

/// True if `point` is inside `path`; points on the border map to `border_result`.
pub fn inside(path: &[Point], point: Point, border_result: bool) -> bool {
    match locate(path, point) {
        PointLocation::Inside => true,
        PointLocation::Outside => false,
        PointLocation::OnBoundary => border_result,
    }
}

/// True if `point` is inside any path of the collection.
///
/// Union semantics: holes are NOT subtracted. Good enough for coarse
/// triage against disjoint areas; use [`locate_even_odd`] when holes matter.
pub fn inside_any(paths: &[Path], point: Point, border_result: bool) -> bool {
    paths.iter().any(|path| inside(path, point, border_result))
}

/// Classify a point against a whole ring collection with the even-odd rule.
///
/// A point inside an outer contour and inside one of its holes is outside.
/// Touching any ring's boundary wins over parity.
pub fn locate_even_odd(paths: &[Path], point: Point) -> PointLocation {
    let mut inside = false;
    for path in paths {
        match locate(path, point) {
            PointLocation::OnBoundary => return PointLocation::OnBoundary,
            PointLocation::Inside => inside = !inside,
            PointLocation::Outside => {}
        }
    }
    if inside {
        PointLocation::Inside
    } else {
        PointLocation::Outside
    }
}

// ============================================================================
// AREA & NESTING
// ============================================================================

/// Twice the signed area (shoelace). Positive for counter-clockwise rings.
///
/// Exact while the ring fits the clipping range; beyond that the sum
/// saturates, which still keeps the sign of any ring that is not
/// astronomically thin.
pub fn signed_area2(path: &[Point]) -> i128 {
    let n = path.len();
    if n < 3 {
        return 0;
    }
    let mut j = n - 1;
    let mut area = 0i128;
    for i in 0..n {
        let term = (path[j].x as i128 * path[i].y as i128)
            .saturating_sub(path[i].x as i128 * path[j].y as i128);
        area = area.saturating_add(term);
        j = i;
    }
    area
}

/// An outer contour with the holes directly inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Counter-clockwise outer contour.
    pub outer: Path,
    /// Clockwise holes.
    pub holes: Paths,
}

/// True if ring `inner` sits inside ring `outer`.
///
/// Decided by the first vertex of `inner` that is not on `outer`'s boundary.
/// Identical rings are not considered nested.
fn ring_inside(inner: &[Point], outer: &[Point]) -> bool {
    inner
        .iter()
        .map(|&p| locate(outer, p))
        .find(|&loc| loc != PointLocation::OnBoundary)
        .is_some_and(|loc| loc == PointLocation::Inside)
}

fn oriented(path: &[Point], ccw: bool) -> Path {
    let mut ring = path.to_vec();
    if (signed_area2(&ring) > 0) != ccw {
        ring.reverse();
    }
    ring
}

/// Group an unlabeled ring collection into polygons-with-holes.
///
/// A ring's depth is the number of other rings containing it. Even depth
/// makes an outer contour, odd depth a hole of its innermost containing
/// ring. Rings with fewer than three points or zero area are dropped.
pub fn nest_rings(paths: &[Path]) -> Vec<Region> {
    let rings: Vec<&Path> = paths
        .iter()
        .filter(|path| path.len() >= 3 && signed_area2(path) != 0)
        .collect();

    let containers: Vec<Vec<usize>> = rings
        .iter()
        .enumerate()
        .map(|(i, ring)| {
            rings
                .iter()
                .enumerate()
                .filter(|&(j, other)| j != i && ring_inside(ring, other))
                .map(|(j, _)| j)
                .collect()
        })
        .collect();

    let depth = |i: usize| containers[i].len();

    let mut regions: Vec<Region> = Vec::new();
    let mut region_of: Vec<Option<usize>> = vec![None; rings.len()];

    for (i, ring) in rings.iter().enumerate() {
        if depth(i) % 2 == 0 {
            region_of[i] = Some(regions.len());
            regions.push(Region { outer: oriented(ring, true), holes: Vec::new() });
        }
    }

    for (i, ring) in rings.iter().enumerate() {
        if depth(i) % 2 == 0 {
            continue;
        }
        // The innermost container is the one nested deepest itself.
        let parent = containers[i]
            .iter()
            .copied()
            .filter(|&j| depth(j) + 1 == depth(i))
            .find_map(|j| region_of[j]);
        if let Some(parent) = parent {
            regions[parent].holes.push(oriented(ring, false));
        }
    }

    regions
}
