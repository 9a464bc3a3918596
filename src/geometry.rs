//! Integer geometric primitives for rasterization and layout.
//!
//! All coordinates are in surface pixels. A [`Rect`] is a top-left corner plus a
//! size; the pixels it covers are `top_left ..= top_left + size - 1` on each axis.

use serde::{Deserialize, Serialize};

/// A 2D point with integer pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
}

impl Point {
    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by the given offsets.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl std::ops::Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A width/height pair in pixels.
///
/// Sizes are signed so that layout arithmetic (absolute + relative components)
/// can go through negative intermediate values without wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Size {
    /// Zero size.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a new size.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero or negative.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// A rectangle defined by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner.
    pub top_left: Point,
    /// Extent.
    pub size: Size,
}

impl Rect {
    /// Create a rectangle from a corner and a size.
    #[must_use]
    pub const fn new(top_left: Point, size: Size) -> Self {
        Self { top_left, size }
    }

    /// Create a rectangle from raw coordinates.
    #[must_use]
    pub const fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(Point::new(x, y), Size::new(width, height))
    }

    /// Leftmost covered column.
    #[must_use]
    pub const fn left(&self) -> i32 {
        self.top_left.x
    }

    /// Topmost covered row.
    #[must_use]
    pub const fn top(&self) -> i32 {
        self.top_left.y
    }

    /// One past the rightmost covered column.
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.top_left.x + self.size.width
    }

    /// One past the bottom covered row.
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.top_left.y + self.size.height
    }

    /// True when the rectangle covers no pixel.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Check if a pixel lies inside the rectangle (edges inclusive).
    #[must_use]
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Check if `other` lies entirely inside this rectangle.
    #[must_use]
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.top() >= self.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Intersection of two rectangles, or `None` when they do not overlap.
    #[must_use]
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if left >= right || top >= bottom {
            return None;
        }
        Some(Rect::from_xywh(left, top, right - left, bottom - top))
    }

    /// Shrink by `amount` on every side.
    ///
    /// The inset is capped at half of each side, so the result never has a
    /// negative size and always lies inside `self`.
    #[must_use]
    pub fn inset(&self, amount: i32) -> Rect {
        let dx = amount.min(self.size.width / 2).max(0);
        let dy = amount.min(self.size.height / 2).max(0);
        Rect::from_xywh(
            self.left() + dx,
            self.top() + dy,
            (self.size.width - 2 * dx).max(0),
            (self.size.height - 2 * dy).max(0),
        )
    }

    /// Get the center point of the rectangle.
    #[must_use]
    pub const fn center(&self) -> Point {
        Point::new(
            self.top_left.x + self.size.width / 2,
            self.top_left.y + self.size.height / 2,
        )
    }
}
