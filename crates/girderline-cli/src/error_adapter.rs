//! Error adapter for converting GirderlineError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Each error is
//! tagged with a stable code and, where the fix is usually the same, a help
//! line.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use girderline::{
    GirderlineError,
    config::ConfigError,
    dataset::DatasetError,
    structure::GeometryError,
};

/// Adapter implementing [`MietteDiagnostic`] for [`GirderlineError`].
pub struct ErrorAdapter<'a>(pub &'a GirderlineError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            GirderlineError::Io(_) => "girderline::io",
            GirderlineError::Config(_) => "girderline::config",
            GirderlineError::Dataset(_) => "girderline::dataset",
            GirderlineError::Geometry(_) => "girderline::geometry",
            GirderlineError::Export(_) => "girderline::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        help_text(self.0).map(|help| Box::new(help) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

fn help_text(err: &GirderlineError) -> Option<&'static str> {
    let help = match err {
        GirderlineError::Config(ConfigError::Parse(_)) => {
            "check the TOML syntax of the configuration file"
        }
        GirderlineError::Config(ConfigError::MissingFile(_)) => {
            "pass an existing file with --config, or omit it to use the defaults"
        }
        GirderlineError::Config(ConfigError::Validation(_)) => {
            "fix the named setting; girder names must match a [[girders]] entry"
        }
        GirderlineError::Dataset(DatasetError::NotFound(_)) => "check the results file path",
        GirderlineError::Dataset(DatasetError::UnsupportedFormat(_)) => {
            "use a .json results file, or build with the `netcdf` feature to read .nc files"
        }
        GirderlineError::Dataset(DatasetError::Malformed { .. }) => {
            "expected an xarray to_dict() document with Element and Component coordinates"
        }
        GirderlineError::Dataset(DatasetError::UnknownElements(_)) => {
            "the [[girders]] element lists must match the element tags of the results file"
        }
        GirderlineError::Geometry(GeometryError::NotFound(_)) => "check the --geometry path",
        GirderlineError::Geometry(GeometryError::UnknownGirderMembers { .. }) => {
            "every girder element must be listed in the geometry `members` table"
        }
        _ => return None,
    };
    Some(help)
}

/// Wrap a [`GirderlineError`] for rendering by miette.
pub fn to_reportable(err: &GirderlineError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}

#[cfg(test)]
mod tests {
    use std::{io, path::PathBuf};

    use girderline::identifier::ElementId;

    use super::*;

    fn code(err: &GirderlineError) -> String {
        to_reportable(err).code().unwrap().to_string()
    }

    #[test]
    fn test_codes_per_stage() {
        let io_err = GirderlineError::Io(io::Error::new(io::ErrorKind::Other, "disk"));
        assert_eq!(code(&io_err), "girderline::io");

        let dataset_err = GirderlineError::from(DatasetError::NotFound(PathBuf::from("r.json")));
        assert_eq!(code(&dataset_err), "girderline::dataset");

        let geometry_err = GirderlineError::from(GeometryError::UnknownMember(ElementId::new(3)));
        assert_eq!(code(&geometry_err), "girderline::geometry");

        let config_err = GirderlineError::from(ConfigError::Validation("bad".to_string()));
        assert_eq!(code(&config_err), "girderline::config");
    }

    #[test]
    fn test_help_for_unknown_elements() {
        let err = GirderlineError::from(DatasetError::UnknownElements(vec![ElementId::new(9)]));
        let adapter = to_reportable(&err);
        let help = adapter.help().unwrap().to_string();
        assert!(help.contains("[[girders]]"));
        assert_eq!(adapter.to_string(), "elements not found in the results: 9");
    }

    #[test]
    fn test_no_help_for_io() {
        let err = GirderlineError::Io(io::Error::new(io::ErrorKind::Other, "disk"));
        assert!(to_reportable(&err).help().is_none());
    }

    #[test]
    fn test_graphical_report_contains_code() {
        let err = GirderlineError::from(DatasetError::NotFound(PathBuf::from("missing.json")));
        let reporter =
            miette::GraphicalReportHandler::new_themed(miette::GraphicalTheme::unicode_nocolor());
        let mut rendered = String::new();
        reporter
            .render_report(&mut rendered, &to_reportable(&err))
            .unwrap();
        assert!(rendered.contains("girderline::dataset"));
        assert!(rendered.contains("missing.json"));
    }
}
