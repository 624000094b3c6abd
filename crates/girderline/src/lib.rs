//! Girderline - Shear and bending moment diagrams for bridge girders.
//!
//! Girderline loads element end forces from a structural-analysis results
//! file, picks out the elements that form each longitudinal girder, and
//! renders the force distribution as SVG: a 2D shear/moment chart per girder
//! and a 3D view of the whole deck with every girder's force extruded
//! vertically.
//!
//! # Pipeline
//!
//! 1. [`dataset`] - open the results file and select girder elements
//! 2. [`series`] - build named component series and position them on the model
//! 3. `export` - render the positioned series to SVG
//!
//! [`PlotBuilder`] drives all three stages from one [`AppConfig`].

pub mod config;
pub mod dataset;
pub mod series;
pub mod structure;

mod error;
mod export;

pub use girderline_core::{color, draw, force, geometry, identifier};

pub use error::GirderlineError;
pub use export::Error as ExportError;

use std::path::Path;

use indexmap::IndexSet;
use log::{debug, info};

use config::AppConfig;
use dataset::Dataset;
use export::svg::{Svg, SvgBuilder};
use force::ForceKind;
use series::{ForceSeries, GirderSeries};
use structure::{BridgeGeometry, Girder};

/// Builder for loading results and rendering girder diagrams.
///
/// # Examples
///
/// ```rust,no_run
/// use girderline::{PlotBuilder, config::AppConfig, force::ForceKind};
///
/// let builder = PlotBuilder::new(AppConfig::default());
///
/// let dataset = builder.load_dataset("results.json").expect("Failed to load results");
/// let geometry = builder.load_geometry("geometry.json").expect("Failed to load geometry");
/// let series = builder.extract(&dataset, &geometry).expect("Failed to extract girders");
///
/// let girder = builder.config().primary_girder().expect("No girders configured");
/// let svg = builder
///     .render_girder_svg(&series, &geometry, girder)
///     .expect("Failed to render girder");
/// let bridge = builder
///     .render_bridge_svg(&series, &geometry, ForceKind::Moment)
///     .expect("Failed to render bridge");
/// ```
#[derive(Debug, Default)]
pub struct PlotBuilder {
    config: AppConfig,
}

impl PlotBuilder {
    /// Create a new plot builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration used by this builder.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Opens a results file, reading the configured force variable.
    ///
    /// # Errors
    ///
    /// Returns [`GirderlineError::Dataset`] if the file is missing or cannot
    /// be read.
    pub fn load_dataset(&self, path: impl AsRef<Path>) -> Result<Dataset, GirderlineError> {
        Ok(Dataset::open_with_variable(
            path,
            self.config.dataset().variable(),
        )?)
    }

    /// Loads the node and member tables.
    ///
    /// # Errors
    ///
    /// Returns [`GirderlineError::Geometry`] if the file is missing, malformed
    /// or has members referencing unknown nodes.
    pub fn load_geometry(&self, path: impl AsRef<Path>) -> Result<BridgeGeometry, GirderlineError> {
        Ok(BridgeGeometry::load(path)?)
    }

    /// Extracts the force series of every configured girder element.
    ///
    /// Every girder element must exist in both the member table and the
    /// results. Elements shared by several girders are extracted once.
    ///
    /// # Errors
    ///
    /// Returns [`GirderlineError::Geometry`] for elements missing from the
    /// member table and [`GirderlineError::Dataset`] for elements missing from
    /// the results.
    pub fn extract(
        &self,
        dataset: &Dataset,
        geometry: &BridgeGeometry,
    ) -> Result<ForceSeries, GirderlineError> {
        let girders = self.config.girders();
        geometry.check_girders(girders)?;

        let elements: IndexSet<_> = girders
            .iter()
            .flat_map(|girder| girder.elements().iter().copied())
            .collect();
        let requested: Vec<_> = elements.into_iter().collect();

        let selection = dataset.select(&requested)?;
        info!(
            girders = girders.len(),
            elements = selection.len();
            "Extracted {} elements", selection.len()
        );

        Ok(ForceSeries::build(&selection))
    }

    /// Builds the positioned force line of one girder.
    pub fn girder_series(
        &self,
        series: &ForceSeries,
        geometry: &BridgeGeometry,
        girder: &Girder,
        kind: ForceKind,
    ) -> GirderSeries {
        GirderSeries::build(
            girder,
            geometry,
            series,
            kind,
            self.config.scale(kind),
            *self.config.model(),
        )
    }

    /// Renders the stacked shear and moment chart of one girder to SVG.
    ///
    /// # Errors
    ///
    /// Returns [`GirderlineError::Export`] if the configured style is invalid.
    pub fn render_girder_svg(
        &self,
        series: &ForceSeries,
        geometry: &BridgeGeometry,
        girder: &Girder,
    ) -> Result<String, GirderlineError> {
        info!(girder = girder.name(); "Rendering girder diagram");

        let shear = self.girder_series(series, geometry, girder, ForceKind::Shear);
        let moment = self.girder_series(series, geometry, girder, ForceKind::Moment);
        let color_index = self
            .config
            .girders()
            .iter()
            .position(|g| g.name() == girder.name())
            .unwrap_or_default();

        let document = self.svg()?.render_girder(&shear, &moment, color_index);
        debug!(girder = girder.name(); "SVG document rendered");
        Ok(document.to_string())
    }

    /// Renders the extruded 3D view of all configured girders to SVG.
    ///
    /// # Errors
    ///
    /// Returns [`GirderlineError::Export`] if the configured style is invalid.
    pub fn render_bridge_svg(
        &self,
        series: &ForceSeries,
        geometry: &BridgeGeometry,
        kind: ForceKind,
    ) -> Result<String, GirderlineError> {
        info!(kind = kind.name(); "Rendering bridge diagram");

        let lines: Vec<GirderSeries> = self
            .config
            .girders()
            .iter()
            .map(|girder| self.girder_series(series, geometry, girder, kind))
            .collect();

        let document = self
            .svg()?
            .render_bridge(geometry, &lines, kind, self.config.scale(kind));
        debug!(kind = kind.name(); "SVG document rendered");
        Ok(document.to_string())
    }

    fn svg(&self) -> Result<Svg, GirderlineError> {
        Ok(SvgBuilder::new()
            .with_style(self.config.style())
            .with_view(*self.config.view())
            .with_model(*self.config.model())
            .build()?)
    }
}
