//! Results dataset loading and element selection.
//!
//! A [`Dataset`] holds the element end forces of one analysis run as a dense
//! `(Element, Component)` table. It is read once from disk, kept in memory,
//! and never written back. [`Dataset::select`] restricts it to the elements
//! of one or more girders.
//!
//! # Supported formats
//!
//! | Extension | Reader                                             |
//! |-----------|----------------------------------------------------|
//! | `.json`   | xarray `to_dict()` layout, always available         |
//! | `.nc`     | NetCDF, requires the `netcdf` cargo feature          |

mod json;
#[cfg(feature = "netcdf")]
mod nc;

use std::{
    fmt,
    path::{Path, PathBuf},
};

use indexmap::IndexSet;
use log::{debug, error, info};
use ndarray::{Array2, ArrayView1, Axis};
use thiserror::Error;

use girderline_core::identifier::ElementId;

use crate::structure::join_ids;

/// Default name of the force variable in a results file.
pub const DEFAULT_VARIABLE: &str = "forces";

/// Errors raised while loading a dataset or selecting from it.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("results file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read results file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed results file {}: {message}", path.display())]
    Malformed { path: PathBuf, message: String },

    #[error("unsupported results format `{}`", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("force table has shape {actual:?}, expected {expected:?} (elements, components)")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("element {0} appears more than once in the results")]
    DuplicateElement(ElementId),

    #[error("elements not found in the results: {}", join_ids(.0))]
    UnknownElements(Vec<ElementId>),
}

/// Element end forces of one analysis run.
#[derive(Debug, Clone)]
pub struct Dataset {
    source: Option<PathBuf>,
    elements: IndexSet<ElementId>,
    components: IndexSet<String>,
    forces: Array2<f64>,
}

impl Dataset {
    /// Opens a results file using the default force variable name.
    ///
    /// # Errors
    ///
    /// See [`Dataset::open_with_variable`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        Self::open_with_variable(path, DEFAULT_VARIABLE)
    }

    /// Opens a results file, reading forces from the named variable.
    ///
    /// The reader is picked from the file extension. The file is closed once
    /// its contents are in memory.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::NotFound`] for a missing file,
    /// [`DatasetError::UnsupportedFormat`] for an unknown extension, and
    /// [`DatasetError::Malformed`] when the content does not describe an
    /// `(Element, Component)` force table.
    pub fn open_with_variable(
        path: impl AsRef<Path>,
        variable: &str,
    ) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        if !path.exists() {
            error!(path = path.display().to_string(); "Results file not found");
            return Err(DatasetError::NotFound(path.to_path_buf()));
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        debug!(path = path.display().to_string(), extension:?, variable; "Opening results file");

        let mut dataset = match extension.as_deref() {
            Some("json") => json::read(path, variable)?,
            #[cfg(feature = "netcdf")]
            Some("nc") => nc::read(path, variable)?,
            _ => return Err(DatasetError::UnsupportedFormat(path.to_path_buf())),
        };
        dataset.source = Some(path.to_path_buf());

        info!(
            path = path.display().to_string(),
            elements = dataset.len(),
            components = dataset.components.len();
            "Dataset loaded"
        );
        Ok(dataset)
    }

    /// Builds a dataset from in-memory parts.
    ///
    /// `forces` must have one row per element and one column per component.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::ShapeMismatch`] for a wrongly shaped table and
    /// [`DatasetError::DuplicateElement`] when an element appears twice.
    pub fn from_parts(
        elements: Vec<ElementId>,
        components: Vec<String>,
        forces: Array2<f64>,
    ) -> Result<Self, DatasetError> {
        let expected = (elements.len(), components.len());
        if forces.dim() != expected {
            return Err(DatasetError::ShapeMismatch {
                expected,
                actual: forces.dim(),
            });
        }

        let mut element_set = IndexSet::with_capacity(elements.len());
        for element in elements {
            if !element_set.insert(element) {
                return Err(DatasetError::DuplicateElement(element));
            }
        }

        Ok(Self {
            source: None,
            elements: element_set,
            components: components.into_iter().collect(),
            forces,
        })
    }

    /// Returns the file the dataset was read from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Returns the element identifiers in file order.
    pub fn elements(&self) -> &IndexSet<ElementId> {
        &self.elements
    }

    /// Returns the component names in file order.
    pub fn components(&self) -> &IndexSet<String> {
        &self.components
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the dataset has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns `true` if the dataset holds forces for `element`.
    pub fn contains(&self, element: ElementId) -> bool {
        self.elements.contains(&element)
    }

    /// Restricts the dataset to `requested`, keeping the requested order.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::UnknownElements`] listing every requested
    /// identifier that is not in the dataset.
    pub fn select(&self, requested: &[ElementId]) -> Result<Selection, DatasetError> {
        let mut rows = Vec::with_capacity(requested.len());
        let mut missing = Vec::new();
        for &element in requested {
            match self.elements.get_index_of(&element) {
                Some(row) => rows.push(row),
                None => missing.push(element),
            }
        }

        if !missing.is_empty() {
            return Err(DatasetError::UnknownElements(missing));
        }

        Ok(Selection {
            elements: requested.to_vec(),
            components: self.components.clone(),
            forces: self.forces.select(Axis(0), &rows),
        })
    }

    /// Restricts the dataset to `requested`, reporting failures in the log.
    ///
    /// This is the non-propagating counterpart of [`Dataset::select`]: an
    /// unknown identifier is logged as an error and yields `None`.
    pub fn extract(&self, requested: &[ElementId]) -> Option<Selection> {
        match self.select(requested) {
            Ok(selection) => {
                info!(
                    requested = requested.len(),
                    found = selection.len();
                    "Extracted {} elements", selection.len()
                );
                Some(selection)
            }
            Err(err) => {
                error!(requested = requested.len(), err:%; "Element extraction failed");
                None
            }
        }
    }
}

/// Forces of a requested subset of elements, in requested order.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    elements: Vec<ElementId>,
    components: IndexSet<String>,
    forces: Array2<f64>,
}

impl Selection {
    /// Returns the selected element identifiers in requested order.
    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    /// Returns the component names available in the selection.
    pub fn components(&self) -> &IndexSet<String> {
        &self.components
    }

    /// Returns the number of selected records.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the values of one component, one per selected element.
    pub fn column(&self, component: &str) -> Option<ArrayView1<'_, f64>> {
        let index = self.components.get_index_of(component)?;
        Some(self.forces.column(index))
    }

    /// Returns the raw force table, one row per selected element.
    pub fn forces(&self) -> &Array2<f64> {
        &self.forces
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} elements x {} components",
            self.elements.len(),
            self.components.len()
        )
    }
}
