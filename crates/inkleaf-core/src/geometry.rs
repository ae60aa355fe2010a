//! Geometric primitives for annotation strokes.
//!
//! This module provides the geometric types used to describe where strokes
//! sit on a page surface and how shapes are sized.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in raster-surface pixels
//! - [`Size`] - Extent of a surface or a placed image
//! - [`Bounds`] - Axis-aligned box spanned by a shape gesture
//!
//! # Coordinate System
//!
//! Coordinates are raster pixels of the drawing surface, not CSS pixels.
//! Callers convert pointer positions using the surface's
//! actual-to-displayed pixel ratio before handing them to the engine.
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```

use serde::{Deserialize, Serialize};

/// A 2D point in raster-surface coordinates.
///
/// Serializes as `{"x": .., "y": ..}`, the shape used inside persisted
/// annotation payloads.
///
/// # Examples
///
/// ```
/// # use inkleaf_core::geometry::Point;
/// let anchor = Point::new(100.0, 40.0);
/// let end = Point::new(60.0, 80.0);
///
/// let center = anchor.midpoint(end);
/// assert_eq!(center, Point::new(80.0, 60.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Component-wise difference, i.e. the vector from `other` to `self`.
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Length of the vector from the origin to this point.
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

/// Width and height in surface pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    pub fn scale(self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    /// True for a size with no extent on either axis.
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// An axis-aligned box stored as its minimum and maximum corners.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates the axis-aligned box spanned by two opposite corners.
    ///
    /// The corners may be given in any order; a drag that ends above or to
    /// the left of its anchor produces the same box as the reverse drag.
    ///
    /// # Examples
    ///
    /// ```
    /// # use inkleaf_core::geometry::{Bounds, Point};
    /// let bounds = Bounds::from_corners(Point::new(50.0, 50.0), Point::new(10.0, 10.0));
    /// assert_eq!(bounds.min_x(), 10.0);
    /// assert_eq!(bounds.min_y(), 10.0);
    /// assert_eq!(bounds.width(), 40.0);
    /// assert_eq!(bounds.height(), 40.0);
    /// ```
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    /// Places a box of `size` with its minimum corner at `top_left`.
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    pub fn center(self) -> Point {
        Point {
            x: (self.min_x + self.max_x) / 2.0,
            y: (self.min_y + self.max_y) / 2.0,
        }
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// The corner nearest the surface origin.
    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }

    pub fn to_size(self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Edges count as inside.
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_accessors() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(p.x(), 3.0);
        assert_eq!(p.y(), 4.0);
        assert_eq!(p.hypot(), 5.0);
    }

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(10.0, 20.0);
        let b = Point::new(4.0, -6.0);
        assert_eq!(a.add_point(b), Point::new(14.0, 14.0));
        assert_eq!(a.sub_point(b), Point::new(6.0, 26.0));
        assert_eq!(a.scale(0.5), Point::new(5.0, 10.0));
        assert_eq!(a.midpoint(b), Point::new(7.0, 7.0));
    }

    #[test]
    fn test_point_serializes_as_xy_object() {
        let json = serde_json::to_string(&Point::new(1.5, 2.0)).unwrap();
        assert_eq!(json, r#"{"x":1.5,"y":2.0}"#);

        let back: Point = serde_json::from_str(r#"{"x":7,"y":-3.25}"#).unwrap();
        assert_eq!(back, Point::new(7.0, -3.25));
    }

    #[test]
    fn test_size() {
        let size = Size::new(40.0, 20.0);
        assert_eq!(size.scale(0.5), Size::new(20.0, 10.0));
        assert!(!size.is_zero());
        assert!(Size::default().is_zero());
    }

    #[test]
    fn test_bounds_from_corners_normalizes() {
        let forward = Bounds::from_corners(Point::new(10.0, 10.0), Point::new(50.0, 50.0));
        let backward = Bounds::from_corners(Point::new(50.0, 50.0), Point::new(10.0, 10.0));
        assert_eq!(forward, backward);
        assert_eq!(backward.min_point(), Point::new(10.0, 10.0));
        assert_eq!(backward.to_size(), Size::new(40.0, 40.0));
    }

    #[test]
    fn test_bounds_mixed_corners() {
        let bounds = Bounds::from_corners(Point::new(30.0, 5.0), Point::new(10.0, 25.0));
        assert_eq!(bounds.min_x(), 10.0);
        assert_eq!(bounds.min_y(), 5.0);
        assert_eq!(bounds.max_x(), 30.0);
        assert_eq!(bounds.max_y(), 25.0);
        assert_eq!(bounds.center(), Point::new(20.0, 15.0));
    }

    #[test]
    fn test_bounds_from_top_left() {
        let bounds = Bounds::new_from_top_left(Point::new(5.0, 5.0), Size::new(10.0, 20.0));
        assert_eq!(bounds.max_x(), 15.0);
        assert_eq!(bounds.max_y(), 25.0);
        assert!(bounds.contains(Point::new(15.0, 25.0)));
        assert!(!bounds.contains(Point::new(15.1, 25.0)));
    }
}
