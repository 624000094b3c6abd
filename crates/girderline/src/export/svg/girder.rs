//! 2D force diagrams of a single girder.
//!
//! Two stacked panels share the station axis: shear on top, bending moment
//! below. Each contiguous run of samples becomes a polyline with a filled
//! area down to the zero line.

use svg::{Document, node::element as svg_element};

use girderline_core::{
    apply_fill, apply_stroke,
    color::Color,
    draw::{FillDefinition, LayeredOutput, RenderLayer, StrokeDefinition},
    force::ForceKind,
    geometry::{Bounds, Insets, Point, Size},
};

use super::{
    Anchor, Svg,
    axis::{LinearScale, Ticks},
    closed_path_data, points_attribute,
};
use crate::series::GirderSeries;

const CANVAS_WIDTH: f32 = 820.0;
const PANEL_HEIGHT: f32 = 240.0;
const PANEL_GAP: f32 = 70.0;
const PLOT_INSETS: Insets = Insets::new(60.0, 30.0, 60.0, 90.0);
const X_TICKS: usize = 8;
const Y_TICKS: usize = 5;
const AREA_OPACITY: f32 = 0.25;

impl Svg {
    /// Renders the shear and moment panels of one girder.
    ///
    /// `color_index` selects the girder color from the palette.
    pub fn render_girder(
        &self,
        shear: &GirderSeries,
        moment: &GirderSeries,
        color_index: usize,
    ) -> Document {
        let size = Size::new(
            CANVAS_WIDTH,
            PLOT_INSETS.vertical_sum() + 2.0 * PANEL_HEIGHT + PANEL_GAP,
        );
        let plot_width = CANVAS_WIDTH - PLOT_INSETS.horizontal_sum();
        let top_panel = Bounds::new_from_top_left(
            Point::new(PLOT_INSETS.left(), PLOT_INSETS.top()),
            Size::new(plot_width, PANEL_HEIGHT),
        );
        let bottom_panel = Bounds::new_from_top_left(
            Point::new(PLOT_INSETS.left(), PLOT_INSETS.top() + PANEL_HEIGHT + PANEL_GAP),
            Size::new(plot_width, PANEL_HEIGHT),
        );

        let stations = merge_ranges(shear.station_range(), moment.station_range()).unwrap_or((0.0, 1.0));
        let x_ticks = Ticks::nice(stations.0, stations.1, X_TICKS);
        let x_scale = LinearScale::new(stations, (top_panel.min_x(), top_panel.max_x()));
        let color = self.girder_color(color_index);

        let mut output = LayeredOutput::new();
        output.add_to_layer(
            RenderLayer::Text,
            Box::new(
                self.text(shear.name(), Point::new(size.width() / 2.0, 28.0), 18.0, Anchor::Middle)
                    .set("font-weight", "bold"),
            ),
        );

        for (series, area) in [(shear, top_panel), (moment, bottom_panel)] {
            output.merge(self.render_panel(series, area, x_scale, &x_ticks, color));
        }

        output.add_to_layer(
            RenderLayer::Text,
            Box::new(self.text(
                &format!("Station along {} axis", self.model.longitudinal_axis()),
                Point::new(bottom_panel.center().x(), bottom_panel.max_y() + 40.0),
                12.0,
                Anchor::Middle,
            )),
        );

        self.document(size, output)
    }

    fn render_panel(
        &self,
        series: &GirderSeries,
        area: Bounds,
        x_scale: LinearScale,
        x_ticks: &Ticks,
        color: Color,
    ) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let kind = series.kind();

        let (low, high) = series.value_range().unwrap_or((0.0, 0.0));
        let y_ticks = Ticks::nice(low.min(0.0), high.max(0.0), Y_TICKS);
        let y_scale = LinearScale::new((y_ticks.start(), y_ticks.end()), (area.max_y(), area.min_y()));

        self.render_grid(&mut output, area, x_scale, x_ticks, y_scale, &y_ticks);

        let zero = y_scale.map(0.0);
        let zero_line = svg_element::Line::new()
            .set("x1", area.min_x())
            .set("y1", zero)
            .set("x2", area.max_x())
            .set("y2", zero);
        let zero_line = apply_stroke!(zero_line, &StrokeDefinition::solid(self.axis_color, 1.0));
        output.add_to_layer(RenderLayer::Grid, Box::new(zero_line));

        for run in series.runs() {
            let points: Vec<Point> = run
                .iter()
                .map(|sample| Point::new(x_scale.map(sample.station()), y_scale.map(sample.value())))
                .collect();
            let (Some(first), Some(last)) = (points.first(), points.last()) else {
                continue;
            };

            let mut outline = Vec::with_capacity(points.len() + 2);
            outline.push(Point::new(first.x(), zero));
            outline.extend(points.iter().copied());
            outline.push(Point::new(last.x(), zero));
            let fill = svg_element::Path::new().set("d", closed_path_data(&outline));
            let fill = apply_fill!(fill, &FillDefinition::translucent(color, AREA_OPACITY));
            output.add_to_layer(RenderLayer::Area, Box::new(fill));

            let line = svg_element::Polyline::new()
                .set("points", points_attribute(&points))
                .set("fill", "none");
            let line = apply_stroke!(line, &StrokeDefinition::solid(color, 2.0));
            output.add_to_layer(RenderLayer::Line, Box::new(line));

            for point in &points {
                let marker = svg_element::Circle::new()
                    .set("cx", point.x())
                    .set("cy", point.y())
                    .set("r", 2.5);
                let marker = apply_fill!(marker, &FillDefinition::solid(color));
                output.add_to_layer(RenderLayer::Marker, Box::new(marker));
            }
        }

        if series.is_empty() {
            output.add_to_layer(
                RenderLayer::Text,
                Box::new(self.text("No data", area.center(), 14.0, Anchor::Middle)),
            );
        }

        output.add_to_layer(
            RenderLayer::Text,
            Box::new(
                self.text(
                    &panel_title(kind),
                    Point::new(area.min_x(), area.min_y() - 16.0),
                    14.0,
                    Anchor::Start,
                )
                .set("font-weight", "bold"),
            ),
        );

        output
    }

    fn render_grid(
        &self,
        output: &mut LayeredOutput,
        area: Bounds,
        x_scale: LinearScale,
        x_ticks: &Ticks,
        y_scale: LinearScale,
        y_ticks: &Ticks,
    ) {
        let grid = StrokeDefinition::dotted(self.grid_color, 1.0);

        let frame = svg_element::Rectangle::new()
            .set("x", area.min_x())
            .set("y", area.min_y())
            .set("width", area.width())
            .set("height", area.height())
            .set("fill", "none");
        let frame = apply_stroke!(frame, &StrokeDefinition::solid(self.axis_color, 1.0));
        output.add_to_layer(RenderLayer::Grid, Box::new(frame));

        for value in y_ticks.values() {
            let y = y_scale.map(value);
            let line = svg_element::Line::new()
                .set("x1", area.min_x())
                .set("y1", y)
                .set("x2", area.max_x())
                .set("y2", y);
            output.add_to_layer(RenderLayer::Grid, Box::new(apply_stroke!(line, &grid)));
            output.add_to_layer(
                RenderLayer::Text,
                Box::new(self.text(
                    &y_ticks.label(value),
                    Point::new(area.min_x() - 8.0, y),
                    11.0,
                    Anchor::End,
                )),
            );
        }

        let (x_min, x_max) = x_scale.domain();
        let tolerance = x_ticks.step() * 1e-6;
        for value in x_ticks
            .values()
            .into_iter()
            .filter(|v| *v >= x_min - tolerance && *v <= x_max + tolerance)
        {
            let x = x_scale.map(value);
            let line = svg_element::Line::new()
                .set("x1", x)
                .set("y1", area.min_y())
                .set("x2", x)
                .set("y2", area.max_y());
            output.add_to_layer(RenderLayer::Grid, Box::new(apply_stroke!(line, &grid)));
            output.add_to_layer(
                RenderLayer::Text,
                Box::new(self.text(
                    &x_ticks.label(value),
                    Point::new(x, area.max_y() + 16.0),
                    11.0,
                    Anchor::Middle,
                )),
            );
        }
    }
}

fn panel_title(kind: ForceKind) -> String {
    format!("{} ({})", kind.label(), kind.unit())
}

fn merge_ranges(a: Option<(f64, f64)>, b: Option<(f64, f64)>) -> Option<(f64, f64)> {
    match (a, b) {
        (Some((a0, a1)), Some((b0, b1))) => Some((a0.min(b0), a1.max(b1))),
        (range, None) | (None, range) => range,
    }
}
