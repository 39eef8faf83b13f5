//! Geometric primitives for layout simulation and rendering.
//!
//! This module provides the fundamental geometric types used throughout Settle
//! for node positions, velocities, canvas sizes and world bounds.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in world space, also used as a 2D vector
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular region defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Settle uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! The engine itself is agnostic to the orientation of the Y axis; only the
//! SVG renderer relies on it.

use serde::{Deserialize, Serialize};

/// A 2D point representing a position in world coordinate space.
///
/// Points use `f32` coordinates and double as 2D vectors for velocities and
/// forces.
///
/// # Examples
///
/// ```
/// # use settle_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// // Vector addition
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// // Midpoint calculation
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Checks that neither coordinate is NaN or infinite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Returns the squared length of the vector
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Multiplies both coordinates by the given factor.
    ///
    /// # Examples
    ///
    /// ```
    /// # use settle_core::geometry::Point;
    /// let velocity = Point::new(10.0, -20.0);
    ///
    /// let damped = velocity.scale(0.5);
    /// assert_eq!(damped.x(), 5.0);
    /// assert_eq!(damped.y(), -10.0);
    /// ```
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Returns the point at `distance` from this one in the direction `angle` (radians)
    pub fn polar_offset(self, distance: f32, angle: f32) -> Self {
        Self {
            x: self.x + distance * angle.cos(),
            y: self.y + distance * angle.sin(),
        }
    }
}

/// Represents the dimensions of a canvas with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns the center point of a canvas of this size anchored at the origin
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Represents an axis-aligned rectangular region with minimum and maximum coordinates.
///
/// The force layout keeps every node inside its world bounds by clamping each
/// coordinate independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates new bounds from explicit coordinate ranges
    pub fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Creates the bounds of a canvas anchored at the origin, shrunk by `margin` on every side.
    ///
    /// # Examples
    ///
    /// ```
    /// # use settle_core::geometry::{Bounds, Size};
    /// let bounds = Bounds::from_canvas(Size::new(600.0, 450.0), 40.0);
    /// assert_eq!(bounds.min_x(), 40.0);
    /// assert_eq!(bounds.max_x(), 560.0);
    /// assert_eq!(bounds.min_y(), 40.0);
    /// assert_eq!(bounds.max_y(), 410.0);
    /// ```
    pub fn from_canvas(canvas: Size, margin: f32) -> Self {
        Self {
            min_x: margin,
            min_y: margin,
            max_x: canvas.width - margin,
            max_y: canvas.height - margin,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the area covered by the bounds
    pub fn area(self) -> f32 {
        self.width() * self.height()
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns true when every coordinate and extent is finite and neither range is inverted
    pub fn is_valid(self) -> bool {
        [self.min_x, self.min_y, self.max_x, self.max_y, self.width(), self.height()]
            .iter()
            .all(|v| v.is_finite())
            && self.min_x <= self.max_x
            && self.min_y <= self.max_y
    }

    /// Returns true if the point lies inside the bounds, edges included
    pub fn contains(self, point: Point) -> bool {
        (self.min_x..=self.max_x).contains(&point.x) && (self.min_y..=self.max_y).contains(&point.y)
    }

    /// Clamps a point into the bounds, each axis independently.
    ///
    /// # Examples
    ///
    /// ```
    /// # use settle_core::geometry::{Bounds, Point};
    /// let bounds = Bounds::new(0.0, 100.0, 0.0, 50.0);
    ///
    /// let clamped = bounds.clamp(Point::new(120.0, 25.0));
    /// assert_eq!(clamped, Point::new(100.0, 25.0));
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the bounds are not [valid](Self::is_valid).
    pub fn clamp(self, point: Point) -> Point {
        Point {
            x: point.x.clamp(self.min_x, self.max_x),
            y: point.y.clamp(self.min_y, self.max_y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(3.5, 4.2);
        assert_eq!(point.x(), 3.5);
        assert_eq!(point.y(), 4.2);
    }

    #[test]
    fn test_point_default() {
        let point = Point::default();
        assert!(point.is_zero());
    }

    #[test]
    fn test_point_is_finite() {
        assert!(Point::new(1.0, -2.0).is_finite());
        assert!(!Point::new(f32::NAN, 0.0).is_finite());
        assert!(!Point::new(0.0, f32::INFINITY).is_finite());
    }

    #[test]
    fn test_point_sub_and_hypot() {
        let d = Point::new(3.0, 4.0).sub_point(Point::default());
        assert_eq!(d.hypot(), 5.0);
        assert_eq!(d.length_squared(), 25.0);
    }

    #[test]
    fn test_point_polar_offset() {
        let p = Point::new(10.0, 10.0).polar_offset(5.0, 0.0);
        assert_eq!(p, Point::new(15.0, 10.0));
    }

    #[test]
    fn test_size_center() {
        assert_eq!(Size::new(600.0, 450.0).center(), Point::new(300.0, 225.0));
    }

    #[test]
    fn test_bounds_dimensions() {
        let bounds = Bounds::new(-10.0, 30.0, 0.0, 5.0);
        assert_eq!(bounds.width(), 40.0);
        assert_eq!(bounds.height(), 5.0);
        assert_eq!(bounds.area(), 200.0);
        assert_eq!(bounds.center(), Point::new(10.0, 2.5));
    }

    #[test]
    fn test_bounds_new_from_top_left() {
        let bounds = Bounds::new_from_top_left(Point::new(10.0, 20.0), Size::new(30.0, 40.0));
        assert_eq!(bounds.min_x(), 10.0);
        assert_eq!(bounds.min_y(), 20.0);
        assert_eq!(bounds.max_x(), 40.0);
        assert_eq!(bounds.max_y(), 60.0);
    }

    #[test]
    fn test_bounds_is_valid() {
        assert!(Bounds::new(0.0, 0.0, 0.0, 0.0).is_valid());
        assert!(!Bounds::new(10.0, 0.0, 0.0, 10.0).is_valid());
        assert!(!Bounds::new(0.0, 10.0, 10.0, 0.0).is_valid());
        assert!(!Bounds::new(0.0, f32::INFINITY, 0.0, 10.0).is_valid());
        assert!(!Bounds::new(f32::NAN, 10.0, 0.0, 10.0).is_valid());
        assert!(!Bounds::new(-f32::MAX, f32::MAX, 0.0, 10.0).is_valid());
    }

    #[test]
    fn test_bounds_contains_edges() {
        let bounds = Bounds::new(0.0, 10.0, 0.0, 10.0);
        assert!(bounds.contains(Point::new(0.0, 10.0)));
        assert!(bounds.contains(Point::new(5.0, 5.0)));
        assert!(!bounds.contains(Point::new(-0.1, 5.0)));
        assert!(!bounds.contains(Point::new(5.0, 10.1)));
    }

    #[test]
    fn test_bounds_clamp_each_axis() {
        let bounds = Bounds::new(0.0, 10.0, 0.0, 10.0);
        assert_eq!(bounds.clamp(Point::new(-5.0, 15.0)), Point::new(0.0, 10.0));
        assert_eq!(bounds.clamp(Point::new(3.0, 4.0)), Point::new(3.0, 4.0));
    }
}
