//! Stroke definitions for chart lines.
//!
//! A [`StrokeDefinition`] bundles the SVG stroke attributes used by the
//! renderers: axes and grid lines, the member wireframe and the force lines.
//! Use [`apply_stroke!`](crate::apply_stroke!) to set them on an SVG element.
//!
//! | Property | SVG Attribute                      |
//! |----------|------------------------------------|
//! | `color`  | `stroke`, `stroke-opacity`         |
//! | `width`  | `stroke-width`                     |
//! | `style`  | `stroke-dasharray`                 |
//!
//! Line caps and joins are always rounded so adjacent element segments of a
//! force line meet without notches.

use crate::color::Color;

/// Dash pattern of a stroke.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeStyle {
    /// Continuous line (default)
    #[default]
    Solid,
    /// 6px dash, 4px gap; used for reference lines
    Dashed,
    /// 2px dot, 3px gap; used for grid lines
    Dotted,
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or `None` for solid lines
    pub fn to_svg_value(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("6,4"),
            Self::Dotted => Some("2,3"),
        }
    }
}

/// Color, width and dash pattern of a line.
///
/// # Examples
///
/// ```
/// use girderline_core::color::Color;
/// use girderline_core::draw::{StrokeDefinition, StrokeStyle};
///
/// let stroke = StrokeDefinition::dashed(Color::new("gray").unwrap(), 0.5);
/// assert_eq!(stroke.style(), StrokeStyle::Dashed);
/// assert_eq!(stroke.width(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    /// Creates a solid stroke with the given color and width.
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    /// Creates a dashed stroke.
    pub fn dashed(color: Color, width: f32) -> Self {
        Self::solid(color, width).with_style(StrokeStyle::Dashed)
    }

    /// Creates a dotted stroke.
    pub fn dotted(color: Color, width: f32) -> Self {
        Self::solid(color, width).with_style(StrokeStyle::Dotted)
    }

    /// Returns a copy with a different dash pattern.
    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the dash pattern.
    pub fn style(&self) -> StrokeStyle {
        self.style
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::solid(Color::default(), 1.0)
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// Sets color, opacity, width, rounded caps and joins, and the dash pattern
/// when the stroke is not solid. Fill is left untouched.
///
/// # Examples
///
/// ```
/// use girderline_core::color::Color;
/// use girderline_core::draw::StrokeDefinition;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::solid(Color::new("black").unwrap(), 2.0);
/// let line = svg_element::Line::new()
///     .set("x1", 0)
///     .set("y1", 0)
///     .set("x2", 10)
///     .set("y2", 0);
///
/// let line = girderline_core::apply_stroke!(line, &stroke);
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width())
            .set("stroke-linecap", "round")
            .set("stroke-linejoin", "round");

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}
