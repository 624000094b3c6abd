//! Orthographic projection of model space onto the canvas.
//!
//! Every model axis is first normalised to a unit cube so a long, flat bridge
//! deck and its force ribbons fill the view equally in all three directions.
//! The cube is then rotated by the camera azimuth (around the vertical axis)
//! and elevation (above the horizontal plane) and fitted into the canvas.

use girderline_core::geometry::{Axis, Bounds, Bounds3, Point, Point3};

use crate::config::ViewConfig;

/// Returns the horizontal axes that form a right-handed frame with `vertical`.
pub fn horizontal_axes(vertical: Axis) -> (Axis, Axis) {
    match vertical {
        Axis::Z => (Axis::X, Axis::Y),
        Axis::X => (Axis::Y, Axis::Z),
        Axis::Y => (Axis::Z, Axis::X),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Projection {
    bounds: Bounds3,
    vertical: Axis,
    horizontal: (Axis, Axis),
    // sin and cos of azimuth and elevation
    azimuth: (f64, f64),
    elevation: (f64, f64),
    scale: f64,
    origin: (f64, f64),
}

impl Projection {
    /// Fits the projected unit cube of `bounds` into `area`.
    pub fn new(bounds: Bounds3, view: ViewConfig, vertical: Axis, area: Bounds) -> Self {
        let mut projection = Self {
            bounds,
            vertical,
            horizontal: horizontal_axes(vertical),
            azimuth: view.azimuth().to_radians().sin_cos(),
            elevation: view.elevation().to_radians().sin_cos(),
            scale: 1.0,
            origin: (0.0, 0.0),
        };

        let corners: Vec<(f64, f64)> = (0..8)
            .map(|i| {
                let corner = |bit: u32| if i & (1 << bit) == 0 { -0.5 } else { 0.5 };
                projection.rotate(corner(0), corner(1), corner(2))
            })
            .collect();
        let (min_x, max_x, min_y, max_y) = corners.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
            |(x0, x1, y0, y1), &(x, y)| (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
        );

        let width = (max_x - min_x).max(f64::EPSILON);
        let height = (max_y - min_y).max(f64::EPSILON);
        projection.scale = (f64::from(area.width()) / width).min(f64::from(area.height()) / height);

        let center = area.center();
        projection.origin = (
            f64::from(center.x()) - projection.scale * (min_x + max_x) / 2.0,
            // screen y grows downwards
            f64::from(center.y()) + projection.scale * (min_y + max_y) / 2.0,
        );
        projection
    }

    // Rotates unit-cube coordinates (first horizontal, second horizontal, vertical)
    // into (screen right, screen up)
    fn rotate(&self, u: f64, v: f64, w: f64) -> (f64, f64) {
        let (sin_az, cos_az) = self.azimuth;
        let (sin_el, cos_el) = self.elevation;
        let right = -u * sin_az + v * cos_az;
        let up = -sin_el * (u * cos_az + v * sin_az) + w * cos_el;
        (right, up)
    }

    /// Projects a model point onto the canvas.
    pub fn project(&self, point: Point3) -> Point {
        let unit = self.bounds.normalize(point);
        let (right, up) = self.rotate(
            unit.coordinate(self.horizontal.0) - 0.5,
            unit.coordinate(self.horizontal.1) - 0.5,
            unit.coordinate(self.vertical) - 0.5,
        );
        Point::new(
            (self.origin.0 + right * self.scale) as f32,
            (self.origin.1 - up * self.scale) as f32,
        )
    }

    /// Returns the canvas direction of a unit step along `axis`.
    pub fn direction(&self, axis: Axis) -> Point {
        let component = |a: Axis| if a == axis { 1.0 } else { 0.0 };
        let (right, up) = self.rotate(
            component(self.horizontal.0),
            component(self.horizontal.1),
            component(self.vertical),
        );
        Point::new(right as f32, -up as f32)
    }
}
