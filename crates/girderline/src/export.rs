//! Export of girder force series to output formats.
//!
//! # Pipeline Position
//!
//! ```text
//! Results file
//!     ↓ dataset
//! Selection
//!     ↓ series
//! GirderSeries (positioned samples)
//!     ↓ export (this module)
//! SVG document
//! ```
//!
//! # Available Backends
//!
//! - [`svg`]: SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], which converts into
//! [`GirderlineError::Export`] at the crate boundary.
//!
//! [`GirderlineError::Export`]: crate::GirderlineError::Export

/// SVG export backend.
pub mod svg;

use thiserror::Error;

/// Errors that can occur during diagram export.
#[derive(Debug, Error)]
pub enum Error {
    /// The configured style could not be applied.
    #[error("Invalid style: {0}")]
    Style(String),
}
