//! CLI logic for the Girderline diagram tool.
//!
//! This module contains the core CLI logic: it loads the configuration, runs
//! the results file through the [`PlotBuilder`] pipeline and writes one SVG
//! per requested girder plus the 3D bridge diagram.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::info;

use girderline::{
    GirderlineError, PlotBuilder,
    config::{AppConfig, ConfigError},
    structure::Girder,
};

/// Run the Girderline CLI application
///
/// This function processes the results file through the Girderline pipeline
/// and writes the resulting SVG files to the output directory.
///
/// # Errors
///
/// Returns `GirderlineError` for:
/// - File I/O errors
/// - Configuration loading errors, including unknown `--girder` names
/// - Missing or malformed results and geometry files
/// - Girder elements missing from the results or the member table
pub fn run(args: &Args) -> Result<(), GirderlineError> {
    info!(
        dataset = args.dataset,
        geometry = args.geometry,
        output_dir = args.output_dir;
        "Processing results"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let girders = requested_girders(&app_config, &args.girders)?;

    let builder = PlotBuilder::new(app_config);
    let dataset = builder.load_dataset(&args.dataset)?;
    let geometry = builder.load_geometry(&args.geometry)?;
    let series = builder.extract(&dataset, &geometry)?;

    let output_dir = Path::new(&args.output_dir);
    fs::create_dir_all(output_dir)?;

    for girder in &girders {
        let svg = builder.render_girder_svg(&series, &geometry, girder)?;
        write_svg(output_dir.join(format!("girder-{}.svg", girder.slug())), &svg)?;
    }

    let svg = builder.render_bridge_svg(&series, &geometry, args.force)?;
    write_svg(output_dir.join(format!("bridge-{}.svg", args.force.name())), &svg)?;

    Ok(())
}

/// Resolves `--girder` names, falling back to the primary girder.
fn requested_girders(config: &AppConfig, names: &[String]) -> Result<Vec<Girder>, ConfigError> {
    if names.is_empty() {
        return config
            .primary_girder()
            .cloned()
            .map(|girder| vec![girder])
            .ok_or_else(|| ConfigError::Validation("no primary girder configured".to_string()));
    }

    names
        .iter()
        .map(|name| {
            config.girder(name).cloned().ok_or_else(|| {
                let known: Vec<&str> = config.girders().iter().map(Girder::name).collect();
                ConfigError::Validation(format!(
                    "unknown girder `{name}`, configured girders: {}",
                    known.join(", ")
                ))
            })
        })
        .collect()
}

fn write_svg(path: PathBuf, svg: &str) -> Result<(), GirderlineError> {
    fs::write(&path, svg)?;
    info!(output_file = path.display().to_string(); "SVG exported successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_girder_is_primary() {
        let girders = requested_girders(&AppConfig::default(), &[]).unwrap();
        assert_eq!(girders.len(), 1);
        assert_eq!(girders[0].name(), "Girder 3");
    }

    #[test]
    fn test_named_girders_keep_order() {
        let names = vec!["Girder 5".to_string(), "Girder 1".to_string()];
        let girders = requested_girders(&AppConfig::default(), &names).unwrap();
        let resolved: Vec<&str> = girders.iter().map(Girder::name).collect();
        assert_eq!(resolved, vec!["Girder 5", "Girder 1"]);
    }

    #[test]
    fn test_unknown_girder_name() {
        let names = vec!["Girder 42".to_string()];
        let err = requested_girders(&AppConfig::default(), &names).unwrap_err();
        assert!(err.to_string().contains("unknown girder `Girder 42`"));
    }
}
