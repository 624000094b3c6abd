//! SVG rendering of girder and bridge force diagrams.
//!
//! [`SvgBuilder`] resolves the style and view configuration once and yields an
//! [`Svg`] renderer. The renderer draws into a [`LayeredOutput`] and assembles
//! the final [`Document`] with a background and fixed canvas size.

mod axis;
mod bridge;
mod girder;
mod projection;

use log::debug;
use svg::{Document, node::element as svg_element};

use girderline_core::{
    apply_fill,
    color::{Color, Palette},
    draw::{FillDefinition, LayeredOutput, RenderLayer},
    geometry::{Point, Size},
};

use crate::{
    config::{ModelConfig, StyleConfig, ViewConfig},
    export,
};

const DEFAULT_FONT_FAMILY: &str = "Arial, sans-serif";
const DEFAULT_BACKGROUND: &str = "white";
const TEXT_COLOR: &str = "#333333";
const GRID_COLOR: &str = "#d0d0d0";
const AXIS_COLOR: &str = "#555555";
const WIREFRAME_COLOR: &str = "#9a9a9a";

/// Builder for [`Svg`] renderers.
#[derive(Debug, Default)]
pub struct SvgBuilder<'a> {
    style: Option<&'a StyleConfig>,
    view: ViewConfig,
    model: ModelConfig,
}

impl<'a> SvgBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the style used for the background and girder colors.
    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Sets the camera of the 3D bridge diagram.
    pub fn with_view(mut self, view: ViewConfig) -> Self {
        self.view = view;
        self
    }

    /// Sets the model axis conventions.
    pub fn with_model(mut self, model: ModelConfig) -> Self {
        self.model = model;
        self
    }

    /// Resolves the configuration into a renderer.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Style`] if a configured color is invalid.
    pub fn build(self) -> Result<Svg, export::Error> {
        let (background, palette) = match self.style {
            Some(style) => (
                style.background_color().map_err(export::Error::Style)?,
                style.palette().map_err(export::Error::Style)?,
            ),
            None => (None, Palette::default()),
        };
        let background = match background {
            Some(color) => color,
            None => Color::new(DEFAULT_BACKGROUND).map_err(export::Error::Style)?,
        };

        Ok(Svg {
            background,
            palette,
            text_color: Color::new(TEXT_COLOR).map_err(export::Error::Style)?,
            grid_color: Color::new(GRID_COLOR).map_err(export::Error::Style)?,
            axis_color: Color::new(AXIS_COLOR).map_err(export::Error::Style)?,
            wireframe_color: Color::new(WIREFRAME_COLOR).map_err(export::Error::Style)?,
            view: self.view,
            model: self.model,
        })
    }
}

/// SVG renderer with resolved colors and view settings.
#[derive(Debug, Clone)]
pub struct Svg {
    background: Color,
    palette: Palette,
    text_color: Color,
    grid_color: Color,
    axis_color: Color,
    wireframe_color: Color,
    view: ViewConfig,
    model: ModelConfig,
}

/// Horizontal anchoring of a text label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

impl Svg {
    /// Returns the color assigned to the girder at `index`.
    pub fn girder_color(&self, index: usize) -> Color {
        self.palette.color(index)
    }

    /// Wraps layered content into a document of the given size.
    fn document(&self, size: Size, output: LayeredOutput) -> Document {
        debug!(width = size.width(), height = size.height(); "Assembling SVG document");

        let mut background = LayeredOutput::new();
        let rect = svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", size.width())
            .set("height", size.height());
        let rect = apply_fill!(rect, &FillDefinition::solid(self.background));
        background.add_to_layer(RenderLayer::Background, Box::new(rect));
        background.merge(output);

        background.render().into_iter().fold(
            Document::new()
                .set("viewBox", format!("0 0 {} {}", size.width(), size.height()))
                .set("width", size.width())
                .set("height", size.height())
                .set("font-family", DEFAULT_FONT_FAMILY),
            |doc, node| doc.add(node),
        )
    }

    fn text(&self, content: &str, position: Point, font_size: f32, anchor: Anchor) -> svg_element::Text {
        svg_element::Text::new(content)
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", anchor.to_svg_value())
            .set("dominant-baseline", "middle")
            .set("font-size", font_size)
            .set("fill", self.text_color.to_string())
    }
}

/// Formats canvas points as an SVG `points` attribute.
fn points_attribute(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{:.2},{:.2}", p.x(), p.y()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats canvas points as a closed SVG path.
fn closed_path_data(points: &[Point]) -> String {
    let mut data = String::new();
    for (i, p) in points.iter().enumerate() {
        let command = if i == 0 { 'M' } else { 'L' };
        data.push_str(&format!("{command} {:.2} {:.2} ", p.x(), p.y()));
    }
    data.push('Z');
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_with_default_style() {
        let svg = SvgBuilder::new().build().unwrap();
        assert_eq!(svg.background.to_string(), "white");
        assert_eq!(svg.girder_color(0), Palette::default().color(0));
    }

    #[test]
    fn test_build_rejects_invalid_background() {
        let style: StyleConfig = toml::from_str(r#"background_color = "nope""#).unwrap();
        let err = SvgBuilder::new().with_style(&style).build().unwrap_err();
        assert!(matches!(err, export::Error::Style(_)));
    }

    #[test]
    fn test_document_has_background_and_size() {
        let svg = SvgBuilder::new().build().unwrap();
        let doc = svg.document(Size::new(200.0, 100.0), LayeredOutput::new());
        let rendered = doc.to_string();
        assert!(rendered.contains(r#"viewBox="0 0 200 100""#));
        assert!(rendered.contains(r#"data-layer="background""#));
        assert!(rendered.contains(r#"fill="white""#));
    }

    #[test]
    fn test_points_attribute() {
        let points = [Point::new(1.0, 2.0), Point::new(3.5, 4.25)];
        assert_eq!(points_attribute(&points), "1.00,2.00 3.50,4.25");
        assert_eq!(closed_path_data(&points), "M 1.00 2.00 L 3.50 4.25 Z");
    }
}
