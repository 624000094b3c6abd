//! 3D extruded force diagram of the whole bridge.

use log::debug;
use svg::{Document, node::element as svg_element};

use girderline_core::{
    apply_fill, apply_stroke,
    draw::{FillDefinition, LayeredOutput, RenderLayer, StrokeDefinition},
    force::ForceKind,
    geometry::{Axis, Bounds, Bounds3, Point, Point3, Size},
};

use super::{Anchor, Svg, closed_path_data, points_attribute, projection::Projection};
use crate::{series::GirderSeries, structure::BridgeGeometry};

const CANVAS_SIZE: Size = Size::new(960.0, 720.0);
const LEGEND_WIDTH: f32 = 180.0;
const TITLE_HEIGHT: f32 = 60.0;
const PADDING: f32 = 30.0;
const TRIAD_LENGTH: f32 = 40.0;
const RIBBON_OPACITY: f32 = 0.2;

impl Svg {
    /// Renders the member wireframe with one extruded force line per girder.
    ///
    /// Girder colors follow the order of `lines`.
    pub fn render_bridge(
        &self,
        geometry: &BridgeGeometry,
        lines: &[GirderSeries],
        kind: ForceKind,
        scale: f64,
    ) -> Document {
        let vertical = self.model.vertical_axis();
        let bounds = lines
            .iter()
            .flat_map(GirderSeries::samples)
            .map(|sample| sample.extruded())
            .fold(geometry.bounds(), |bounds, point| match bounds {
                Some(bounds) => Some(bounds.include(point)),
                None => Some(Bounds3::from_point(point)),
            })
            .unwrap_or_else(|| Bounds3::from_point(Point3::default()));

        let area = Bounds::new_from_top_left(
            Point::new(PADDING, TITLE_HEIGHT),
            Size::new(
                CANVAS_SIZE.width() - LEGEND_WIDTH - 2.0 * PADDING,
                CANVAS_SIZE.height() - TITLE_HEIGHT - 2.0 * PADDING,
            ),
        );
        let projection = Projection::new(bounds, self.view, vertical, area);
        debug!(
            azimuth = self.view.azimuth(),
            elevation = self.view.elevation(),
            girders = lines.len();
            "Projecting bridge"
        );

        let mut output = LayeredOutput::new();
        output.merge(self.render_wireframe(geometry, &projection));
        for (index, line) in lines.iter().enumerate() {
            output.merge(self.render_extruded_line(line, index, &projection));
        }
        output.merge(self.render_legend(lines));
        output.merge(self.render_triad(&projection));

        output.add_to_layer(
            RenderLayer::Text,
            Box::new(
                self.text(
                    &format!("{} ({}), vertical scale {}", kind.label(), kind.unit(), scale),
                    Point::new(CANVAS_SIZE.width() / 2.0, 30.0),
                    18.0,
                    Anchor::Middle,
                )
                .set("font-weight", "bold"),
            ),
        );

        self.document(CANVAS_SIZE, output)
    }

    fn render_wireframe(&self, geometry: &BridgeGeometry, projection: &Projection) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        let mut data = String::new();
        for (id, _) in geometry.members() {
            if let Ok((start, end)) = geometry.member_endpoints(id) {
                let (a, b) = (projection.project(start), projection.project(end));
                data.push_str(&format!(
                    "M {:.2} {:.2} L {:.2} {:.2} ",
                    a.x(),
                    a.y(),
                    b.x(),
                    b.y()
                ));
            }
        }
        if data.is_empty() {
            return output;
        }

        let path = svg_element::Path::new()
            .set("d", data.trim_end())
            .set("fill", "none");
        let stroke = StrokeDefinition::solid(self.wireframe_color.with_alpha(0.6), 0.75);
        output.add_to_layer(RenderLayer::Wireframe, Box::new(apply_stroke!(path, &stroke)));
        output
    }

    fn render_extruded_line(
        &self,
        line: &GirderSeries,
        index: usize,
        projection: &Projection,
    ) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let color = self.girder_color(index);
        let base_stroke = StrokeDefinition::dashed(color.with_alpha(0.5), 1.0);
        let hanger_stroke = StrokeDefinition::solid(color.with_alpha(0.4), 0.5);

        for run in line.runs() {
            let base: Vec<Point> = run.iter().map(|s| projection.project(s.base())).collect();
            let extruded: Vec<Point> = run.iter().map(|s| projection.project(s.extruded())).collect();

            let base_line = svg_element::Polyline::new()
                .set("points", points_attribute(&base))
                .set("fill", "none");
            output.add_to_layer(RenderLayer::Wireframe, Box::new(apply_stroke!(base_line, &base_stroke)));

            let outline: Vec<Point> = extruded.iter().chain(base.iter().rev()).copied().collect();
            let ribbon = svg_element::Path::new().set("d", closed_path_data(&outline));
            let ribbon = apply_fill!(ribbon, &FillDefinition::translucent(color, RIBBON_OPACITY));
            output.add_to_layer(RenderLayer::Area, Box::new(ribbon));

            for (low, high) in base.iter().zip(&extruded) {
                let hanger = svg_element::Line::new()
                    .set("x1", low.x())
                    .set("y1", low.y())
                    .set("x2", high.x())
                    .set("y2", high.y());
                output.add_to_layer(RenderLayer::Area, Box::new(apply_stroke!(hanger, &hanger_stroke)));
            }

            let force_line = svg_element::Polyline::new()
                .set("points", points_attribute(&extruded))
                .set("fill", "none")
                .set("data-girder", line.name());
            let force_line = apply_stroke!(force_line, &StrokeDefinition::solid(color, 2.0));
            output.add_to_layer(RenderLayer::Line, Box::new(force_line));
        }

        output
    }

    fn render_legend(&self, lines: &[GirderSeries]) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let left = CANVAS_SIZE.width() - LEGEND_WIDTH;

        for (index, line) in lines.iter().enumerate() {
            let y = TITLE_HEIGHT + 20.0 + index as f32 * 24.0;
            let swatch = svg_element::Line::new()
                .set("x1", left)
                .set("y1", y)
                .set("x2", left + 24.0)
                .set("y2", y);
            let swatch = apply_stroke!(swatch, &StrokeDefinition::solid(self.girder_color(index), 3.0));
            output.add_to_layer(RenderLayer::Line, Box::new(swatch));
            output.add_to_layer(
                RenderLayer::Text,
                Box::new(self.text(line.name(), Point::new(left + 32.0, y), 12.0, Anchor::Start)),
            );
        }

        output
    }

    // Small axis indicator in the lower left corner
    fn render_triad(&self, projection: &Projection) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let origin = Point::new(PADDING + TRIAD_LENGTH, CANVAS_SIZE.height() - PADDING - TRIAD_LENGTH);
        let stroke = StrokeDefinition::solid(self.axis_color, 1.0);

        for axis in Axis::ALL {
            let direction = projection.direction(axis);
            let end = origin.add_point(direction.scale(TRIAD_LENGTH));
            let label = origin.add_point(direction.scale(TRIAD_LENGTH + 10.0));

            let line = svg_element::Line::new()
                .set("x1", origin.x())
                .set("y1", origin.y())
                .set("x2", end.x())
                .set("y2", end.y());
            output.add_to_layer(RenderLayer::Grid, Box::new(apply_stroke!(line, &stroke)));
            output.add_to_layer(
                RenderLayer::Text,
                Box::new(self.text(axis.name(), label, 11.0, Anchor::Middle)),
            );
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use girderline_core::{
        force::ForceComponent,
        identifier::{ElementId, NodeId, element_ids},
    };
    use ndarray::Array2;

    use super::*;
    use crate::{
        config::ModelConfig,
        dataset::Dataset,
        export::svg::SvgBuilder,
        series::ForceSeries,
        structure::{Girder, Member},
    };

    // Two parallel girders of two members each, joined by one cross beam
    fn deck() -> (BridgeGeometry, Vec<Girder>) {
        let mut nodes = BTreeMap::new();
        for (id, x, y) in [
            (1, 0.0, 0.0),
            (2, 5.0, 0.0),
            (3, 10.0, 0.0),
            (4, 0.0, 3.0),
            (5, 5.0, 3.0),
            (6, 10.0, 3.0),
        ] {
            nodes.insert(NodeId::new(id), Point3::new(x, y, 0.0));
        }
        let members = BTreeMap::from([
            (ElementId::new(1), Member::new(NodeId::new(1), NodeId::new(2))),
            (ElementId::new(2), Member::new(NodeId::new(2), NodeId::new(3))),
            (ElementId::new(3), Member::new(NodeId::new(4), NodeId::new(5))),
            (ElementId::new(4), Member::new(NodeId::new(5), NodeId::new(6))),
            (ElementId::new(9), Member::new(NodeId::new(2), NodeId::new(5))),
        ]);
        let geometry = BridgeGeometry::from_tables(nodes, members).unwrap();
        let girders = vec![
            Girder::new("North", element_ids(&[1, 2])),
            Girder::new("South", element_ids(&[3, 4])),
        ];
        (geometry, girders)
    }

    fn lines(geometry: &BridgeGeometry, girders: &[Girder]) -> Vec<GirderSeries> {
        let components = ForceComponent::ALL.iter().map(|c| c.name().to_string()).collect();
        // Start values positive, end values negative
        let forces = Array2::from_shape_fn((4, 4), |(row, col)| {
            let sign = if col % 2 == 0 { 1.0 } else { -1.0 };
            (row as f64 + 1.0) * sign
        });
        let dataset = Dataset::from_parts(element_ids(&[1, 2, 3, 4]), components, forces).unwrap();
        let series = ForceSeries::build(&dataset.select(&element_ids(&[1, 2, 3, 4])).unwrap());
        girders
            .iter()
            .map(|girder| {
                GirderSeries::build(
                    girder,
                    geometry,
                    &series,
                    ForceKind::Moment,
                    0.5,
                    ModelConfig::default(),
                )
            })
            .collect()
    }

    #[test]
    fn test_render_bridge() {
        let (geometry, girders) = deck();
        let lines = lines(&geometry, &girders);
        let svg = SvgBuilder::new().build().unwrap();
        let rendered = svg.render_bridge(&geometry, &lines, ForceKind::Moment, 0.5).to_string();

        assert!(rendered.contains(r#"data-layer="wireframe""#));
        assert!(rendered.contains(r#"data-girder="North""#));
        assert!(rendered.contains(r#"data-girder="South""#));
        assert!(rendered.contains("Bending Moment Mz (kN·m), vertical scale 0.5"));
        // Two base lines and two force lines
        assert_eq!(rendered.matches("<polyline").count(), 4);
    }

    #[test]
    fn test_legend_uses_palette_order() {
        let (geometry, girders) = deck();
        let lines = lines(&geometry, &girders);
        let svg = SvgBuilder::new().build().unwrap();
        let rendered = svg.render_bridge(&geometry, &lines, ForceKind::Moment, 0.5).to_string();

        assert!(rendered.contains(&svg.girder_color(0).to_string()));
        assert!(rendered.contains(&svg.girder_color(1).to_string()));
        assert!(!rendered.contains(&svg.girder_color(2).to_string()));
    }

    #[test]
    fn test_render_bridge_without_girders() {
        let (geometry, _) = deck();
        let svg = SvgBuilder::new().build().unwrap();
        let rendered = svg.render_bridge(&geometry, &[], ForceKind::Shear, 1.0).to_string();
        assert!(rendered.contains(r#"data-layer="wireframe""#));
        assert!(!rendered.contains("<polyline"));
    }

    #[test]
    fn test_render_empty_geometry() {
        let svg = SvgBuilder::new().build().unwrap();
        let rendered = svg
            .render_bridge(&BridgeGeometry::default(), &[], ForceKind::Shear, 1.0)
            .to_string();
        assert!(rendered.contains("<svg"));
        assert!(!rendered.contains(r#"data-layer="wireframe""#));
    }
}
