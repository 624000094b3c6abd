//! Reader for NetCDF results files written by xarray.

use std::path::Path;

use log::debug;
use ndarray::Array2;

use girderline_core::identifier::ElementId;

use super::{
    Dataset, DatasetError,
    json::{COMPONENT_DIM, ELEMENT_DIM},
};

pub(super) fn read(path: &Path, variable: &str) -> Result<Dataset, DatasetError> {
    let malformed = |message: String| DatasetError::Malformed {
        path: path.to_path_buf(),
        message,
    };

    let file = netcdf::open(path).map_err(|err| malformed(err.to_string()))?;

    let element_var = file
        .variable(ELEMENT_DIM)
        .ok_or_else(|| malformed(format!("coordinate `{ELEMENT_DIM}` not found")))?;
    let elements = element_var
        .get_values::<i64, _>(..)
        .map_err(|err| malformed(format!("coordinate `{ELEMENT_DIM}`: {err}")))?
        .into_iter()
        .map(|tag| {
            u32::try_from(tag)
                .map(ElementId::new)
                .map_err(|_| malformed(format!("element tag {tag} is out of range")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let component_var = file
        .variable(COMPONENT_DIM)
        .ok_or_else(|| malformed(format!("coordinate `{COMPONENT_DIM}` not found")))?;
    let components = (0..component_var.len())
        .map(|index| {
            component_var
                .get_string(index)
                .map(|name| name.trim_end_matches('\0').to_string())
                .map_err(|err| malformed(format!("coordinate `{COMPONENT_DIM}`: {err}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let forces = file
        .variable(variable)
        .ok_or_else(|| malformed(format!("data variable `{variable}` not found")))?;
    let dims: Vec<String> = forces.dimensions().iter().map(|dim| dim.name()).collect();
    let values = forces
        .get_values::<f64, _>(..)
        .map_err(|err| malformed(format!("data variable `{variable}`: {err}")))?;

    let shape_error = |err: ndarray::ShapeError| malformed(err.to_string());
    let table = match dims.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        [ELEMENT_DIM, COMPONENT_DIM] => {
            Array2::from_shape_vec((elements.len(), components.len()), values)
                .map_err(shape_error)?
        }
        [COMPONENT_DIM, ELEMENT_DIM] => {
            debug!(variable; "Transposing (Component, Element) force table");
            Array2::from_shape_vec((components.len(), elements.len()), values)
                .map_err(shape_error)?
                .reversed_axes()
                .as_standard_layout()
                .into_owned()
        }
        other => {
            return Err(malformed(format!(
                "data variable `{variable}` has dimensions {other:?}"
            )));
        }
    };

    // `file` is dropped here, closing the handle
    Dataset::from_parts(elements, components, table)
}
