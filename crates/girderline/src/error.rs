//! Error types for Girderline operations.
//!
//! This module provides the main error type [`GirderlineError`] which wraps
//! the failures of each pipeline stage: configuration, dataset loading,
//! geometry lookup and SVG export.

use std::io;

use thiserror::Error;

use crate::{config::ConfigError, dataset::DatasetError, export, structure::GeometryError};

/// The main error type for Girderline operations.
///
/// Every variant except [`GirderlineError::Io`] carries a stage-specific error
/// enum, so callers can match on the exact failure.
#[derive(Debug, Error)]
pub enum GirderlineError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("Export error: {0}")]
    Export(#[from] export::Error),
}
