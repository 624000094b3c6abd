//! Geometric primitives for model space and chart canvas space.
//!
//! # Overview
//!
//! - [`Axis`] - One of the three global model axes
//! - [`Point3`] - A node coordinate in model space (metres, `f64`)
//! - [`Bounds3`] - Axis-aligned box around model points
//! - [`Point`] - A 2D coordinate on the chart canvas (`f32`)
//! - [`Size`] - Width and height dimensions on the canvas
//! - [`Bounds`] - A rectangular region of the canvas
//! - [`Insets`] - Padding values for four sides
//!
//! # Coordinate Systems
//!
//! Model space is the right-handed global system of the analysis model. Which
//! axis runs along the girders and which one points up is configuration, see
//! [`Axis`].
//!
//! The canvas uses the SVG convention:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// One of the three global model axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in `x, y, z` order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the lowercase axis name.
    pub fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" | "X" => Ok(Self::X),
            "y" | "Y" => Ok(Self::Y),
            "z" | "Z" => Ok(Self::Z),
            _ => Err(format!("invalid axis `{s}`, valid values: x, y, z")),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A point in model space.
///
/// # Examples
///
/// ```
/// # use girderline_core::geometry::{Axis, Point3};
/// let p = Point3::new(1.0, 2.0, 3.0);
/// assert_eq!(p.coordinate(Axis::Y), 2.0);
///
/// let lifted = p.offset(Axis::Z, 0.5);
/// assert_eq!(lifted, Point3::new(1.0, 2.0, 3.5));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Point3 {
    x: f64,
    y: f64,
    z: f64,
}

impl Point3 {
    /// Creates a point from its three coordinates.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns the x-coordinate.
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate.
    pub fn y(self) -> f64 {
        self.y
    }

    /// Returns the z-coordinate.
    pub fn z(self) -> f64 {
        self.z
    }

    /// Returns the coordinate along `axis`.
    pub fn coordinate(self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Returns a copy with the coordinate along `axis` replaced.
    pub fn with_coordinate(mut self, axis: Axis, value: f64) -> Self {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
        self
    }

    /// Returns a copy moved by `delta` along `axis`.
    pub fn offset(self, axis: Axis, delta: f64) -> Self {
        self.with_coordinate(axis, self.coordinate(axis) + delta)
    }
}

impl From<[f64; 3]> for Point3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Point3> for [f64; 3] {
    fn from(point: Point3) -> Self {
        [point.x, point.y, point.z]
    }
}

/// Axis-aligned bounding box in model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds3 {
    min: Point3,
    max: Point3,
}

impl Bounds3 {
    /// Creates bounds around a single point.
    pub fn from_point(point: Point3) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Creates the smallest bounds containing every point, or `None` when
    /// the iterator is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use girderline_core::geometry::{Axis, Bounds3, Point3};
    /// let bounds = Bounds3::from_points([
    ///     Point3::new(0.0, -1.0, 2.0),
    ///     Point3::new(4.0, 1.0, 2.0),
    /// ])
    /// .unwrap();
    /// assert_eq!(bounds.range(Axis::X), 4.0);
    /// assert_eq!(bounds.range(Axis::Z), 0.0);
    /// ```
    pub fn from_points(points: impl IntoIterator<Item = Point3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = Self::from_point(points.next()?);
        Some(points.fold(first, |bounds, point| bounds.include(point)))
    }

    /// Returns bounds grown to contain `point`.
    pub fn include(self, point: Point3) -> Self {
        Self {
            min: Point3::new(
                self.min.x.min(point.x),
                self.min.y.min(point.y),
                self.min.z.min(point.z),
            ),
            max: Point3::new(
                self.max.x.max(point.x),
                self.max.y.max(point.y),
                self.max.z.max(point.z),
            ),
        }
    }

    /// Returns the minimum corner.
    pub fn min(self) -> Point3 {
        self.min
    }

    /// Returns the maximum corner.
    pub fn max(self) -> Point3 {
        self.max
    }

    /// Returns the extent along `axis`.
    pub fn range(self, axis: Axis) -> f64 {
        self.max.coordinate(axis) - self.min.coordinate(axis)
    }

    /// Maps `point` into the unit cube spanned by these bounds.
    ///
    /// Each axis is scaled independently. An axis with zero extent maps to
    /// `0.5` so flat geometry sits in the middle of the cube.
    pub fn normalize(self, point: Point3) -> Point3 {
        let unit = |axis: Axis| {
            let range = self.range(axis);
            if range > 0.0 {
                (point.coordinate(axis) - self.min.coordinate(axis)) / range
            } else {
                0.5
            }
        };
        Point3::new(unit(Axis::X), unit(Axis::Y), unit(Axis::Z))
    }
}

/// A 2D point on the chart canvas.
///
/// # Examples
///
/// ```
/// # use girderline_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
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

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
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
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
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

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }
}

/// Represents spacing around an element (padding, margin, etc.)
/// with potentially different values for each side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates insets with individual values for each side, in CSS order
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn top(self) -> f32 {
        self.top
    }

    pub fn right(self) -> f32 {
        self.right
    }

    pub fn bottom(self) -> f32 {
        self.bottom
    }

    pub fn left(self) -> f32 {
        self.left
    }

    /// Sum of left and right insets
    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    /// Sum of top and bottom insets
    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_axis_from_str() {
        assert_eq!("Z".parse::<Axis>(), Ok(Axis::Z));
        assert!("w".parse::<Axis>().is_err());
    }

    #[test]
    fn test_point3_coordinate_accessors() {
        let p = Point3::new(1.0, 2.0, 3.0);
        for (axis, expected) in Axis::ALL.into_iter().zip([1.0, 2.0, 3.0]) {
            assert_approx_eq!(f64, p.coordinate(axis), expected);
        }
    }

    #[test]
    fn test_point3_offset_only_touches_one_axis() {
        let p = Point3::new(1.0, 2.0, 3.0).offset(Axis::Y, -4.0);
        assert_eq!(p, Point3::new(1.0, -2.0, 3.0));
    }

    #[test]
    fn test_point3_array_conversion() {
        let p = Point3::from([4.0, 5.0, 6.0]);
        let back: [f64; 3] = p.into();
        assert_eq!(back, [4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_bounds3_corners() {
        let bounds = Bounds3::from_points([
            Point3::new(4.0, -1.0, 2.0),
            Point3::new(0.0, 3.0, -2.0),
            Point3::new(2.0, 0.0, 0.0),
        ])
        .unwrap();
        assert_eq!(bounds.min(), Point3::new(0.0, -1.0, -2.0));
        assert_eq!(bounds.max(), Point3::new(4.0, 3.0, 2.0));
    }

    #[test]
    fn test_bounds3_empty_iterator() {
        assert!(Bounds3::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_bounds3_normalize_flat_axis_is_centered() {
        let bounds =
            Bounds3::from_points([Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 5.0, 0.0)])
                .unwrap();
        let unit = bounds.normalize(Point3::new(5.0, 5.0, 0.0));
        assert_approx_eq!(f64, unit.x(), 0.5);
        assert_approx_eq!(f64, unit.y(), 1.0);
        assert_approx_eq!(f64, unit.z(), 0.5);
    }


    #[test]
    fn test_bounds_from_top_left() {
        let bounds = Bounds::new_from_top_left(Point::new(10.0, 5.0), Size::new(100.0, 50.0));
        assert_approx_eq!(f32, bounds.max_x(), 110.0);
        assert_approx_eq!(f32, bounds.height(), 50.0);
        let center = bounds.center();
        assert_approx_eq!(f32, center.x(), 60.0);
        assert_approx_eq!(f32, center.y(), 30.0);
    }

    #[test]
    fn test_insets_sums() {
        let insets = Insets::new(5.0, 10.0, 15.0, 20.0);
        assert_approx_eq!(f32, insets.horizontal_sum(), 30.0);
        assert_approx_eq!(f32, insets.vertical_sum(), 20.0);
    }

    proptest! {
        #[test]
        fn normalized_points_stay_in_unit_cube(
            coords in prop::collection::vec((-1.0e3f64..1.0e3, -1.0e3f64..1.0e3, -1.0e3f64..1.0e3), 1..20)
        ) {
            let points: Vec<Point3> = coords.iter().map(|&(x, y, z)| Point3::new(x, y, z)).collect();
            let bounds = Bounds3::from_points(points.iter().copied()).unwrap();
            for point in points {
                let unit = bounds.normalize(point);
                for axis in Axis::ALL {
                    prop_assert!((0.0..=1.0).contains(&unit.coordinate(axis)));
                }
            }
        }
    }
}
