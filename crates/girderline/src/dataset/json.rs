//! Reader for the xarray `to_dict()` JSON layout.
//!
//! ```json
//! {
//!   "coords": {
//!     "Element":   { "dims": ["Element"],   "data": [1, 2] },
//!     "Component": { "dims": ["Component"], "data": ["Mz_i", "Mz_j", "Vy_i", "Vy_j"] }
//!   },
//!   "data_vars": {
//!     "forces": { "dims": ["Element", "Component"], "data": [[0, 0, 0, 0], [0, 0, 0, 0]] }
//!   }
//! }
//! ```
//!
//! The force variable may also be stored as `[Component, Element]`. `null`
//! entries are read as `NaN`.

use std::{collections::HashMap, fs, path::Path};

use log::{debug, trace};
use ndarray::Array2;
use serde::{Deserialize, de::DeserializeOwned};

use girderline_core::identifier::ElementId;

use super::{Dataset, DatasetError};

pub(super) const ELEMENT_DIM: &str = "Element";
pub(super) const COMPONENT_DIM: &str = "Component";

#[derive(Deserialize)]
struct DatasetFile {
    #[serde(default)]
    coords: HashMap<String, Variable>,
    #[serde(default)]
    data_vars: HashMap<String, Variable>,
}

#[derive(Deserialize)]
struct Variable {
    dims: Vec<String>,
    data: serde_json::Value,
}

pub(super) fn read(path: &Path, variable: &str) -> Result<Dataset, DatasetError> {
    let malformed = |message: String| DatasetError::Malformed {
        path: path.to_path_buf(),
        message,
    };

    let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut file: DatasetFile =
        serde_json::from_str(&content).map_err(|err| malformed(err.to_string()))?;

    let elements: Vec<ElementId> = coordinate(&mut file, ELEMENT_DIM).map_err(malformed)?;
    let components: Vec<String> = coordinate(&mut file, COMPONENT_DIM).map_err(malformed)?;
    trace!(elements:?, components:?; "Coordinates read");

    let forces = file
        .data_vars
        .remove(variable)
        .ok_or_else(|| malformed(format!("data variable `{variable}` not found")))?;
    let rows: Vec<Vec<Option<f64>>> = serde_json::from_value(forces.data)
        .map_err(|err| malformed(format!("data variable `{variable}`: {err}")))?;

    let dims: Vec<&str> = forces.dims.iter().map(String::as_str).collect();
    let table = match dims.as_slice() {
        [ELEMENT_DIM, COMPONENT_DIM] => to_array(&rows, components.len()).map_err(malformed)?,
        [COMPONENT_DIM, ELEMENT_DIM] => {
            debug!(variable; "Transposing (Component, Element) force table");
            to_array(&rows, elements.len())
                .map_err(malformed)?
                .reversed_axes()
                .as_standard_layout()
                .into_owned()
        }
        other => {
            return Err(malformed(format!(
                "data variable `{variable}` has dimensions {other:?}, expected [\"{ELEMENT_DIM}\", \"{COMPONENT_DIM}\"]"
            )));
        }
    };

    Dataset::from_parts(elements, components, table)
}

fn coordinate<T: DeserializeOwned>(file: &mut DatasetFile, name: &str) -> Result<Vec<T>, String> {
    // xarray writes dimension coordinates under `coords`; older dumps put them in `data_vars`
    let variable = file
        .coords
        .remove(name)
        .or_else(|| file.data_vars.remove(name))
        .ok_or_else(|| format!("coordinate `{name}` not found"))?;
    serde_json::from_value(variable.data).map_err(|err| format!("coordinate `{name}`: {err}"))
}

/// Builds a table from nested rows. `empty_width` is the column count used
/// when there are no rows at all.
fn to_array(rows: &[Vec<Option<f64>>], empty_width: usize) -> Result<Array2<f64>, String> {
    let width = rows.first().map_or(empty_width, Vec::len);
    if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
        return Err(format!(
            "row {index} has {} values, expected {width}",
            row.len()
        ));
    }

    let values = rows
        .iter()
        .flatten()
        .map(|value| value.unwrap_or(f64::NAN))
        .collect();
    Array2::from_shape_vec((rows.len(), width), values).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use float_cmp::assert_approx_eq;
    use girderline_core::identifier::element_ids;
    use tempfile::NamedTempFile;

    use super::*;

    fn write_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_element_major_table() {
        let file = write_json(
            r#"{
                "coords": {
                    "Element": {"dims": ["Element"], "data": [10, 20]},
                    "Component": {"dims": ["Component"], "data": ["Mz_i", "Vy_i"]}
                },
                "data_vars": {
                    "forces": {"dims": ["Element", "Component"], "data": [[1.5, -2.0], [3.0, null]]}
                }
            }"#,
        );

        let dataset = read(file.path(), "forces").unwrap();
        assert_eq!(dataset.len(), 2);
        let selection = dataset.select(&element_ids(&[20])).unwrap();
        assert_approx_eq!(f64, selection.column("Mz_i").unwrap()[0], 3.0);
        assert!(selection.column("Vy_i").unwrap()[0].is_nan());
    }

    #[test]
    fn test_read_component_major_table_is_transposed() {
        let file = write_json(
            r#"{
                "coords": {
                    "Element": {"dims": ["Element"], "data": [1, 2, 3]},
                    "Component": {"dims": ["Component"], "data": ["Mz_i", "Mz_j"]}
                },
                "data_vars": {
                    "member_forces": {"dims": ["Component", "Element"], "data": [[1, 2, 3], [4, 5, 6]]}
                }
            }"#,
        );

        let dataset = read(file.path(), "member_forces").unwrap();
        let selection = dataset.select(&element_ids(&[2])).unwrap();
        assert_approx_eq!(f64, selection.column("Mz_i").unwrap()[0], 2.0);
        assert_approx_eq!(f64, selection.column("Mz_j").unwrap()[0], 5.0);
    }

    #[test]
    fn test_missing_variable_is_malformed() {
        let file = write_json(
            r#"{
                "coords": {
                    "Element": {"dims": ["Element"], "data": [1]},
                    "Component": {"dims": ["Component"], "data": ["Mz_i"]}
                },
                "data_vars": {}
            }"#,
        );

        let err = read(file.path(), "forces").unwrap_err();
        assert!(err.to_string().contains("data variable `forces` not found"));
    }

    #[test]
    fn test_ragged_rows_are_malformed() {
        let file = write_json(
            r#"{
                "coords": {
                    "Element": {"dims": ["Element"], "data": [1, 2]},
                    "Component": {"dims": ["Component"], "data": ["Mz_i", "Mz_j"]}
                },
                "data_vars": {
                    "forces": {"dims": ["Element", "Component"], "data": [[1, 2], [3]]}
                }
            }"#,
        );

        let err = read(file.path(), "forces").unwrap_err();
        assert!(matches!(err, DatasetError::Malformed { .. }));
    }

    #[test]
    fn test_read_file_without_elements() {
        let file = write_json(
            r#"{
                "coords": {
                    "Element": {"dims": ["Element"], "data": []},
                    "Component": {"dims": ["Component"], "data": ["Mz_i", "Mz_j", "Vy_i", "Vy_j"]}
                },
                "data_vars": {
                    "forces": {"dims": ["Element", "Component"], "data": []}
                }
            }"#,
        );

        let dataset = read(file.path(), "forces").unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.components().len(), 4);
        assert_eq!(dataset.select(&[]).unwrap().forces().dim(), (0, 4));
    }

    #[test]
    fn test_not_json_is_malformed() {
        let file = write_json("Element,Mz_i\n1,2\n");
        assert!(matches!(
            read(file.path(), "forces"),
            Err(DatasetError::Malformed { .. })
        ));
    }
}
