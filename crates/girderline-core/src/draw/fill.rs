//! Fill definitions for chart areas.

use crate::color::Color;

/// Color and opacity of a filled area.
///
/// The force diagrams shade the area between the force line and the zero
/// line with a translucent version of the line color.
///
/// # Examples
///
/// ```
/// use girderline_core::color::Color;
/// use girderline_core::draw::FillDefinition;
///
/// let fill = FillDefinition::translucent(Color::new("steelblue").unwrap(), 0.3);
/// assert_eq!(fill.opacity(), 0.3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillDefinition {
    color: Color,
    opacity: f32,
}

impl FillDefinition {
    /// Creates an opaque fill.
    pub fn solid(color: Color) -> Self {
        Self {
            color,
            opacity: 1.0,
        }
    }

    /// Creates a fill with the given opacity, clamped to `0.0..=1.0`.
    pub fn translucent(color: Color, opacity: f32) -> Self {
        Self {
            color,
            opacity: opacity.clamp(0.0, 1.0),
        }
    }

    /// Returns the fill color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the fill opacity.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }
}

/// Apply fill color and opacity to an SVG element.
#[macro_export]
macro_rules! apply_fill {
    ($element:expr, $fill:expr) => {{
        $element
            .set("fill", $fill.color().to_string())
            .set("fill-opacity", $fill.opacity() * $fill.color().alpha())
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translucent_clamps_opacity() {
        let fill = FillDefinition::translucent(Color::default(), 1.5);
        assert_eq!(fill.opacity(), 1.0);
        let fill = FillDefinition::translucent(Color::default(), -0.5);
        assert_eq!(fill.opacity(), 0.0);
    }

    #[test]
    fn test_apply_fill() {
        use svg::node::element::Rectangle;

        let fill = FillDefinition::translucent(Color::new("red").unwrap(), 0.5);
        let rendered = crate::apply_fill!(Rectangle::new(), &fill).to_string();
        assert!(rendered.contains("fill-opacity=\"0.5\""));
    }
}
