//! Geometric primitives used by the scene model.
//!
//! Scene coordinates are `f64` with Y growing downwards. Affine transforms
//! use euclid's row-vector convention (`x' = x·m11 + y·m21 + m31`), so
//! `a.then(&b)` applies `a` first.

use lyon::geom::euclid::default::{Point2D, Transform2D, Vector2D};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// Affine transform between coordinate spaces.
pub type Transform = Transform2D<f64>;

/// A 2D point (or offset) in item, scene or view space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (*other - *self).length()
    }

    /// Length of this point taken as a vector.
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// `|x| + |y|`
    pub fn manhattan_length(&self) -> f64 {
        self.x.abs() + self.y.abs()
    }

    /// Midpoint between two points.
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Apply an affine transform.
    pub fn transformed(&self, transform: &Transform) -> Point {
        let p = transform.transform_point(Point2D::new(self.x, self.y));
        Point::new(p.x, p.y)
    }

    /// Round each coordinate to the nearest multiple of `grid`. A zero grid
    /// leaves the point untouched.
    pub fn snapped(&self, grid: f64) -> Point {
        if grid <= 0.0 {
            return *self;
        }
        Point::new((self.x / grid).round() * grid, (self.y / grid).round() * grid)
    }

    pub(crate) fn to_lyon(self) -> lyon::math::Point {
        lyon::math::point(self.x as f32, self.y as f32)
    }

    pub(crate) fn to_vector(self) -> Vector2D<f64> {
        Vector2D::new(self.x, self.y)
    }

    /// Approximate equality within `eps` on both axes.
    pub fn approx_eq(&self, other: &Point, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Axis-aligned rectangle given by its top-left corner and size.
///
/// Width and height may be negative while an item is being resized past
/// its opposite edge; [`Rect::normalized`] yields the positive form.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Normalized rectangle spanning two corner points.
    pub fn from_points(p1: Point, p2: Point) -> Self {
        Rect::new(p1.x, p1.y, p2.x - p1.x, p2.y - p1.y).normalized()
    }

    /// Smallest rectangle containing every point, or `None` for an empty slice.
    pub fn bounding(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let (mut min, mut max) = (*first, *first);
        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Rect::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left(), self.top())
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// The four corners, clockwise from top-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left(), self.top()),
            Point::new(self.right(), self.top()),
            Point::new(self.right(), self.bottom()),
            Point::new(self.left(), self.bottom()),
        ]
    }

    pub fn normalized(&self) -> Rect {
        let mut r = *self;
        if r.width < 0.0 {
            r.x += r.width;
            r.width = -r.width;
        }
        if r.height < 0.0 {
            r.y += r.height;
            r.height = -r.height;
        }
        r
    }

    /// True when the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    /// Grow each edge outwards: left by `dx1`, top by `dy1`, right by `dx2`, bottom by `dy2`.
    pub fn adjusted(&self, dx1: f64, dy1: f64, dx2: f64, dy2: f64) -> Rect {
        Rect::new(
            self.x + dx1,
            self.y + dy1,
            self.width - dx1 + dx2,
            self.height - dy1 + dy2,
        )
    }

    pub fn translated(&self, delta: Point) -> Rect {
        Rect::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    pub fn contains_point(&self, p: &Point) -> bool {
        let r = self.normalized();
        p.x >= r.left() && p.x <= r.right() && p.y >= r.top() && p.y <= r.bottom()
    }

    /// True when `other` lies entirely inside this rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        let (r, o) = (self.normalized(), other.normalized());
        o.left() >= r.left() && o.right() <= r.right() && o.top() >= r.top() && o.bottom() <= r.bottom()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        let (r, o) = (self.normalized(), other.normalized());
        r.left() <= o.right() && o.left() <= r.right() && r.top() <= o.bottom() && o.top() <= r.bottom()
    }

    /// Bounding rectangle of both rectangles.
    pub fn united(&self, other: &Rect) -> Rect {
        let (r, o) = (self.normalized(), other.normalized());
        let left = r.left().min(o.left());
        let top = r.top().min(o.top());
        let right = r.right().max(o.right());
        let bottom = r.bottom().max(o.bottom());
        Rect::new(left, top, right - left, bottom - top)
    }

    /// Bounding rectangle of the transformed corners.
    pub fn transformed(&self, transform: &Transform) -> Rect {
        let corners = self.corners().map(|c| c.transformed(transform));
        Rect::bounding(&corners).unwrap_or_default()
    }

    pub(crate) fn to_lyon_box(self) -> lyon::math::Box2D {
        let r = self.normalized();
        lyon::math::Box2D::new(r.top_left().to_lyon(), r.bottom_right().to_lyon())
    }

    pub fn approx_eq(&self, other: &Rect, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps
            && (self.y - other.y).abs() <= eps
            && (self.width - other.width).abs() <= eps
            && (self.height - other.height).abs() <= eps
    }
}

/// Quarter-turn clockwise rotation (on a Y-down screen): `(x, y) → (−y, x)`.
pub fn quarter_turn(turns: u8) -> Transform {
    match turns % 4 {
        0 => Transform::identity(),
        1 => Transform::new(0.0, 1.0, -1.0, 0.0, 0.0, 0.0),
        2 => Transform::new(-1.0, 0.0, 0.0, -1.0, 0.0, 0.0),
        _ => Transform::new(0.0, -1.0, 1.0, 0.0, 0.0, 0.0),
    }
}

/// Horizontal mirror `(x, y) → (−x, y)`.
pub fn mirror_x() -> Transform {
    Transform::new(-1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
}

/// Linear scale factor of a transform (square root of the absolute determinant).
pub fn transform_scale(transform: &Transform) -> f64 {
    transform.determinant().abs().sqrt()
}

/// Value cached alongside the data it is derived from.
///
/// Caches never take part in equality: two items are equal when their
/// source data is equal.
#[derive(Debug, Clone, Default)]
pub struct Cached<T>(pub T);

impl<T> PartialEq for Cached<T> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<T> std::ops::Deref for Cached<T> {
    type Target = T;
    fn deref(&self) -> &T {
        &self.0
    }
}
