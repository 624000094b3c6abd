//! Force components and force kinds.
//!
//! Element end forces are stored in the results dataset along a `Component`
//! dimension. Girderline only needs four of them: the bending moment `Mz` and
//! the shear force `Vy`, each at the element's start (`i`) and end (`j`).
//!
//! # Overview
//!
//! - [`ForceComponent`] - One named per-element value (`Mz_i`, `Mz_j`, `Vy_i`, `Vy_j`)
//! - [`ForceKind`] - Moment or shear, grouping a start and an end component

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a component or force kind name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseForceError {
    #[error("unknown force component `{0}`, valid values: Mz_i, Mz_j, Vy_i, Vy_j")]
    Component(String),

    #[error("unknown force kind `{0}`, valid values: moment, shear")]
    Kind(String),
}

/// A named force component stored per element in the results dataset.
///
/// # Examples
///
/// ```
/// use girderline_core::force::ForceComponent;
///
/// assert_eq!(ForceComponent::MomentStart.name(), "Mz_i");
/// assert_eq!("Vy_j".parse::<ForceComponent>().unwrap(), ForceComponent::ShearEnd);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ForceComponent {
    /// Bending moment at the element's start node (`Mz_i`)
    MomentStart,
    /// Bending moment at the element's end node (`Mz_j`)
    MomentEnd,
    /// Shear force at the element's start node (`Vy_i`)
    ShearStart,
    /// Shear force at the element's end node (`Vy_j`)
    ShearEnd,
}

impl ForceComponent {
    /// All components, in dataset order.
    pub const ALL: [ForceComponent; 4] = [
        Self::MomentStart,
        Self::MomentEnd,
        Self::ShearStart,
        Self::ShearEnd,
    ];

    /// Returns the name used for this component in the dataset.
    pub fn name(self) -> &'static str {
        match self {
            Self::MomentStart => "Mz_i",
            Self::MomentEnd => "Mz_j",
            Self::ShearStart => "Vy_i",
            Self::ShearEnd => "Vy_j",
        }
    }

    /// Returns the force kind this component belongs to.
    pub fn kind(self) -> ForceKind {
        match self {
            Self::MomentStart | Self::MomentEnd => ForceKind::Moment,
            Self::ShearStart | Self::ShearEnd => ForceKind::Shear,
        }
    }
}

impl FromStr for ForceComponent {
    type Err = ParseForceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|component| component.name() == s)
            .ok_or_else(|| ParseForceError::Component(s.to_string()))
    }
}

impl fmt::Display for ForceComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The kind of internal force drawn in a diagram.
///
/// Each kind pairs a start and an end [`ForceComponent`] and carries the
/// default vertical exaggeration used by the extruded 3D view.
///
/// # Examples
///
/// ```
/// use girderline_core::force::{ForceComponent, ForceKind};
///
/// let (start, end) = ForceKind::Shear.components();
/// assert_eq!(start, ForceComponent::ShearStart);
/// assert_eq!(end, ForceComponent::ShearEnd);
/// assert_eq!(ForceKind::Moment.default_scale(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForceKind {
    /// Bending moment `Mz`
    #[default]
    Moment,
    /// Shear force `Vy`
    Shear,
}

impl ForceKind {
    /// Returns the `(start, end)` components of this kind.
    pub fn components(self) -> (ForceComponent, ForceComponent) {
        match self {
            Self::Moment => (ForceComponent::MomentStart, ForceComponent::MomentEnd),
            Self::Shear => (ForceComponent::ShearStart, ForceComponent::ShearEnd),
        }
    }

    /// Default vertical exaggeration for the extruded view.
    ///
    /// This is a visual factor only: the force value multiplied by it is added
    /// to the vertical coordinate of the girder so the diagram stands out of
    /// the deck. It has no physical meaning.
    pub fn default_scale(self) -> f64 {
        match self {
            Self::Moment => 0.5,
            Self::Shear => 1.0,
        }
    }

    /// Lowercase identifier, used in file names and configuration.
    pub fn name(self) -> &'static str {
        match self {
            Self::Moment => "moment",
            Self::Shear => "shear",
        }
    }

    /// Human-readable chart title.
    pub fn label(self) -> &'static str {
        match self {
            Self::Moment => "Bending Moment Mz",
            Self::Shear => "Shear Force Vy",
        }
    }

    /// Unit label for chart axes.
    pub fn unit(self) -> &'static str {
        match self {
            Self::Moment => "kN·m",
            Self::Shear => "kN",
        }
    }
}

impl FromStr for ForceKind {
    type Err = ParseForceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "moment" | "mz" => Ok(Self::Moment),
            "shear" | "vy" => Ok(Self::Shear),
            _ => Err(ParseForceError::Kind(s.to_string())),
        }
    }
}

impl fmt::Display for ForceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
