//! Core geometry types for infill generation.
//!
//! Everything is stored as fixed-precision integers in the slicer's
//! micrometre scale. Floats only appear transiently (rotation, curve sizing)
//! and are truncated straight back into the integer domain.
//!
//! ## Rust Lesson #1: Operator Overloading
//!
//! `a + b` on a struct is just sugar for `Add::add(a, b)`. Implementing the
//! `std::ops` traits lets `Point` read like the vector math it is:
//!
//! ```text
//! let mid = origin + (a + b) * 0.5;
//! ```
//!
//! Division is the odd one out: it can fail, so it lives in a method that
//! returns `Result` instead of an operator that would have to panic.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::error::GeometryError;

/// Integer coordinate unit (micrometres).
pub type Coord = i64;

/// An ordered sequence of points. Open or closed is carried separately.
pub type Path = Vec<Point>;

/// A collection of paths, e.g. an outline with its holes.
pub type Paths = Vec<Path>;

/// A 2D point with integer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: Coord,
    pub y: Coord,
}

/// How a path's last point relates to its first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// A polyline; the last point is not joined back to the first.
    Open,
    /// A polygon; the last point is implicitly joined to the first.
    Closed,
}

impl Point {
    #[inline]
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// Rotate around the origin by `rad_angle` radians.
    ///
    /// The rotation runs in `f64` and the result is truncated toward zero.
    pub fn rotate(self, rad_angle: f64) -> Self {
        let (sin, cos) = rad_angle.sin_cos();
        let x = self.x as f64;
        let y = self.y as f64;
        Self::new((cos * x - sin * y) as Coord, (sin * x + cos * y) as Coord)
    }

    /// Divide both components by a scalar.
    pub fn try_div(self, divisor: Coord) -> Result<Self, GeometryError> {
        if divisor == 0 {
            return Err(GeometryError::DivideByZero);
        }
        Ok(Self::new(
            self.x.wrapping_div(divisor),
            self.y.wrapping_div(divisor),
        ))
    }

    /// Divide component-wise by another point.
    pub fn try_div_point(self, divisor: Point) -> Result<Self, GeometryError> {
        if divisor.x == 0 || divisor.y == 0 {
            return Err(GeometryError::DivideByZero);
        }
        Ok(Self::new(
            self.x.wrapping_div(divisor.x),
            self.y.wrapping_div(divisor.y),
        ))
    }

    /// Both components halved, truncating toward zero.
    #[inline]
    pub(crate) fn half(self) -> Self {
        Self::new(self.x / 2, self.y / 2)
    }
}

impl Neg for Point {
    type Output = Point;

    #[inline]
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Point {
    #[inline]
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<Coord> for Point {
    type Output = Point;

    #[inline]
    fn mul(self, rhs: Coord) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Point> for Coord {
    type Output = Point;

    #[inline]
    fn mul(self, rhs: Point) -> Point {
        rhs * self
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    /// Scale by a float, truncating each component toward zero.
    #[inline]
    fn mul(self, rhs: f64) -> Point {
        Point::new((self.x as f64 * rhs) as Coord, (self.y as f64 * rhs) as Coord)
    }
}

impl Mul<Point> for f64 {
    type Output = Point;

    #[inline]
    fn mul(self, rhs: Point) -> Point {
        rhs * self
    }
}

// ============================================================================
// BOUNDING BOX
// ============================================================================

/// Axis-aligned bounding box. `min <= max` componentwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    /// Saturates at `Coord::MAX` for boxes wider than the coordinate range.
    #[inline]
    pub fn width(&self) -> Coord {
        self.max.x.saturating_sub(self.min.x)
    }

    #[inline]
    pub fn height(&self) -> Coord {
        self.max.y.saturating_sub(self.min.y)
    }

    /// The larger of width and height.
    #[inline]
    pub fn max_extent(&self) -> Coord {
        self.width().max(self.height())
    }

    /// Center point, rounded toward `min`.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(midpoint(self.min.x, self.max.x), midpoint(self.min.y, self.max.y))
    }

    /// Inclusive containment test.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.y)
    }

    /// The box as a closed four-corner path, counter-clockwise from `min`.
    pub fn to_path(&self) -> Path {
        vec![
            self.min,
            Point::new(self.max.x, self.min.y),
            self.max,
            Point::new(self.min.x, self.max.y),
        ]
    }
}

/// Halfway between `a` and `b`, rounded toward `a`. Exact for any pair.
pub(crate) fn midpoint(a: Coord, b: Coord) -> Coord {
    (a as i128 + (b as i128 - a as i128) / 2) as Coord
}

/// Minimal axis-aligned box covering every point of every path.
///
/// Fails when the collection is empty or its first path is empty. Later
/// empty paths are simply skipped.
pub fn bounding_box(paths: &[Path]) -> Result<BoundingBox, GeometryError> {
    if paths.first().is_none_or(|path| path.is_empty()) {
        return Err(GeometryError::EmptyInput);
    }

    let mut min = Point::new(Coord::MAX, Coord::MAX);
    let mut max = Point::new(Coord::MIN, Coord::MIN);

    // One pass over every point; `flatten` walks the nested Vecs lazily.
    for point in paths.iter().flatten() {
        min.x = min.x.min(point.x);
        min.y = min.y.min(point.y);
        max.x = max.x.max(point.x);
        max.y = max.y.max(point.y);
    }

    Ok(BoundingBox { min, max })
}
