//! Geometry primitives shared by every space the editor works in.
//!
//! `Rect` is the persisted, integer document-space rectangle. `Point` and
//! `ScreenRect` are floating point and used for pointer, surface and
//! intermediate document positions before rounding.

use serde::{Deserialize, Serialize};

/// A floating point position in any of the three coordinate spaces.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Shorthand constructor.
#[inline]
pub const fn point(x: f32, y: f32) -> Point {
    Point { x, y }
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        point(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        point(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Integer rectangle in document units. Origin is the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Normalized rectangle spanning two corners, whatever the drag direction.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let left = a.x.min(b.x);
        let top = a.y.min(b.y);
        let right = a.x.max(b.x);
        let bottom = a.y.max(b.y);
        // Round the edges, not the size, so both corners land on the grid.
        let x = left.round() as i32;
        let y = top.round() as i32;
        Self {
            x,
            y,
            width: right.round() as i32 - x,
            height: bottom.round() as i32 - y,
        }
    }

    #[inline]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_positive(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn meets_minimum(&self, min: i32) -> bool {
        self.width >= min && self.height >= min
    }

    /// Inclusive point containment, matching how edges are hit.
    #[inline]
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.x as f32
            && p.x <= self.right() as f32
            && p.y >= self.y as f32
            && p.y <= self.bottom() as f32
    }

    /// True when `other` lies entirely inside `self` (edges may touch).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    pub const fn translated(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Express `self` relative to the origin of `container`.
    pub const fn relative_to(&self, container: &Rect) -> Rect {
        Rect::new(
            self.x - container.x,
            self.y - container.y,
            self.width,
            self.height,
        )
    }

    /// Inverse of [`Rect::relative_to`].
    pub const fn absolute_in(&self, container: &Rect) -> Rect {
        self.translated(container.x, container.y)
    }
}

/// Floating point rectangle in screen or surface pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenRect {
    pub origin: Point,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    pub const fn new(origin: Point, width: f32, height: f32) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    pub fn from_corners(a: Point, b: Point) -> Self {
        let origin = point(a.x.min(b.x), a.y.min(b.y));
        Self {
            origin,
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    pub fn max(&self) -> Point {
        point(self.origin.x + self.width, self.origin.y + self.height)
    }
}
