//! Configuration types for Girderline plotting.
//!
//! This module provides the configuration structures that control which
//! elements form each girder, how force values are exaggerated, and how the
//! diagrams are viewed and styled. All types implement [`serde::Deserialize`]
//! for loading from TOML files.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining every section below.
//! - [`DatasetConfig`] - Name of the force variable inside the results file.
//! - [`ModelConfig`] - Which model axes are vertical and longitudinal.
//! - [`PlotConfig`] - Primary girder and per-force visual scales.
//! - [`ViewConfig`] - Camera angles of the 3D bridge diagram.
//! - [`StyleConfig`] - Background color and girder palette.
//!
//! # Example
//!
//! ```
//! # use girderline::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.girders().len(), 5);
//! assert_eq!(config.primary_girder().map(|g| g.name()), Some("Girder 3"));
//! assert!(config.validate().is_ok());
//! ```

use std::{
    collections::{HashMap, HashSet},
    path::PathBuf,
};

use serde::Deserialize;
use thiserror::Error;

use girderline_core::{
    color::{Color, Palette},
    force::ForceKind,
    geometry::Axis,
    identifier::element_ids,
};

use crate::{dataset::DEFAULT_VARIABLE, structure::Girder};

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    dataset: DatasetConfig,
    model: ModelConfig,
    plot: PlotConfig,
    view: ViewConfig,
    style: StyleConfig,
    girders: Vec<Girder>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig::default(),
            model: ModelConfig::default(),
            plot: PlotConfig::default(),
            view: ViewConfig::default(),
            style: StyleConfig::default(),
            girders: default_girders(),
        }
    }
}

// Girders of the reference model, edge to edge
fn default_girders() -> Vec<Girder> {
    [
        ("Girder 1", [13, 22, 31, 40, 49, 58, 67, 76, 81]),
        ("Girder 2", [14, 23, 32, 41, 50, 59, 68, 77, 82]),
        ("Girder 3", [15, 24, 33, 42, 51, 60, 69, 78, 83]),
        ("Girder 4", [16, 25, 34, 43, 52, 61, 70, 79, 84]),
        ("Girder 5", [17, 26, 35, 44, 53, 62, 71, 80, 85]),
    ]
    .into_iter()
    .map(|(name, tags)| Girder::new(name, element_ids(&tags)))
    .collect()
}

impl AppConfig {
    /// Returns a copy of this configuration with the girder list replaced.
    pub fn with_girders(mut self, girders: Vec<Girder>) -> Self {
        self.girders = girders;
        self
    }

    /// Returns a copy of this configuration with the given primary girder.
    pub fn with_primary_girder(mut self, name: impl Into<String>) -> Self {
        self.plot.primary_girder = Some(name.into());
        self
    }

    /// Returns the dataset configuration.
    pub fn dataset(&self) -> &DatasetConfig {
        &self.dataset
    }

    /// Returns the model axis configuration.
    pub fn model(&self) -> &ModelConfig {
        &self.model
    }

    /// Returns the plot configuration.
    pub fn plot(&self) -> &PlotConfig {
        &self.plot
    }

    /// Returns the 3D view configuration.
    pub fn view(&self) -> &ViewConfig {
        &self.view
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns all configured girders in drawing order.
    pub fn girders(&self) -> &[Girder] {
        &self.girders
    }

    /// Looks up a girder by name.
    pub fn girder(&self, name: &str) -> Option<&Girder> {
        self.girders.iter().find(|girder| girder.name() == name)
    }

    /// Returns the girder drawn as the 2D diagram by default.
    ///
    /// When no primary girder is configured this is the middle girder of the
    /// list, which is the central girder for a symmetric deck.
    pub fn primary_girder(&self) -> Option<&Girder> {
        match &self.plot.primary_girder {
            Some(name) => self.girder(name),
            None => self.girders.get(self.girders.len() / 2),
        }
    }

    /// Returns the visual scale for a force kind.
    pub fn scale(&self, kind: ForceKind) -> f64 {
        match kind {
            ForceKind::Moment => self.plot.moment_scale,
            ForceKind::Shear => self.plot.shear_scale,
        }
    }

    /// Checks the configuration for inconsistent values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dataset.variable.trim().is_empty() {
            return Err(ConfigError::Validation(
                "dataset.variable must not be empty".to_string(),
            ));
        }

        if self.model.vertical_axis == self.model.longitudinal_axis {
            return Err(ConfigError::Validation(format!(
                "model.vertical_axis and model.longitudinal_axis are both `{}`",
                self.model.vertical_axis
            )));
        }

        for (key, value) in [
            ("plot.moment_scale", self.plot.moment_scale),
            ("plot.shear_scale", self.plot.shear_scale),
            ("view.azimuth", self.view.azimuth),
            ("view.elevation", self.view.elevation),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a finite number, got {value}"
                )));
            }
        }

        if self.girders.is_empty() {
            return Err(ConfigError::Validation(
                "at least one girder must be configured".to_string(),
            ));
        }

        let mut names = HashSet::new();
        let mut slugs = HashMap::new();
        for girder in &self.girders {
            if girder.elements().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "girder `{}` has no elements",
                    girder.name()
                )));
            }
            if !names.insert(girder.name()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate girder name `{}`",
                    girder.name()
                )));
            }
            let slug = girder.slug();
            if slug.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "girder name `{}` needs at least one ASCII letter or digit",
                    girder.name()
                )));
            }
            if let Some(other) = slugs.insert(slug, girder.name()) {
                return Err(ConfigError::Validation(format!(
                    "girders `{other}` and `{}` would write the same output file",
                    girder.name()
                )));
            }
        }

        if let Some(name) = &self.plot.primary_girder {
            if self.girder(name).is_none() {
                return Err(ConfigError::Validation(format!(
                    "plot.primary_girder `{name}` is not a configured girder"
                )));
            }
        }

        self.style.background_color().map_err(ConfigError::Validation)?;
        self.style.palette().map_err(ConfigError::Validation)?;

        Ok(())
    }
}

/// Location of the force data inside the results file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    variable: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            variable: DEFAULT_VARIABLE.to_string(),
        }
    }
}

impl DatasetConfig {
    /// Returns the name of the force variable.
    pub fn variable(&self) -> &str {
        &self.variable
    }
}

/// Axis conventions of the analysis model.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    vertical_axis: Axis,
    longitudinal_axis: Axis,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            vertical_axis: Axis::Z,
            longitudinal_axis: Axis::X,
        }
    }
}

impl ModelConfig {
    /// Returns the axis along which forces are extruded.
    pub fn vertical_axis(&self) -> Axis {
        self.vertical_axis
    }

    /// Returns the axis along which girders run.
    pub fn longitudinal_axis(&self) -> Axis {
        self.longitudinal_axis
    }
}

/// Girder selection and visual exaggeration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    primary_girder: Option<String>,
    moment_scale: f64,
    shear_scale: f64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            primary_girder: None,
            moment_scale: ForceKind::Moment.default_scale(),
            shear_scale: ForceKind::Shear.default_scale(),
        }
    }
}

impl PlotConfig {
    /// Returns the configured primary girder name, if any.
    pub fn primary_girder(&self) -> Option<&str> {
        self.primary_girder.as_deref()
    }

    /// Returns the vertical exaggeration applied to bending moments.
    pub fn moment_scale(&self) -> f64 {
        self.moment_scale
    }

    /// Returns the vertical exaggeration applied to shear forces.
    pub fn shear_scale(&self) -> f64 {
        self.shear_scale
    }
}

/// Camera angles of the 3D diagram, in degrees.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    azimuth: f64,
    elevation: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            azimuth: -60.0,
            elevation: 30.0,
        }
    }
}

impl ViewConfig {
    /// Creates a view from azimuth and elevation angles in degrees.
    pub fn new(azimuth: f64, elevation: f64) -> Self {
        Self { azimuth, elevation }
    }

    /// Rotation around the vertical axis.
    pub fn azimuth(&self) -> f64 {
        self.azimuth
    }

    /// Angle above the horizontal plane.
    pub fn elevation(&self) -> f64 {
        self.elevation
    }
}

/// Visual styling configuration for rendered diagrams.
///
/// Fields that are not set fall back to renderer defaults.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: Option<String>,
    palette: Option<Vec<String>>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the girder palette, falling back to the default palette.
    ///
    /// # Errors
    ///
    /// Returns an error if any palette entry cannot be parsed.
    pub fn palette(&self) -> Result<Palette, String> {
        match &self.palette {
            Some(colors) => Palette::parse(colors.as_slice())
                .map_err(|err| format!("Invalid palette color in config: {err}")),
            None => Ok(Palette::default()),
        }
    }
}
