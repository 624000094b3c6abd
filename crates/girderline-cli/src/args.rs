//! Command-line argument definitions for the Girderline CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the input files, which diagrams are
//! rendered, where they are written, configuration file selection, and
//! logging verbosity.

use clap::Parser;

use girderline::force::ForceKind;

/// Command-line arguments for the Girderline diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the results dataset (.json, or .nc with the `netcdf` feature)
    #[arg(help = "Path to the results dataset")]
    pub dataset: String,

    /// Path to the node and member geometry file (JSON)
    #[arg(short, long)]
    pub geometry: String,

    /// Directory the SVG files are written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,

    /// Force drawn in the 3D bridge diagram (moment or shear)
    #[arg(short, long, default_value = "moment")]
    pub force: ForceKind,

    /// Girder to draw as a 2D diagram; repeat for several. Defaults to the primary girder
    #[arg(long = "girder", value_name = "NAME")]
    pub girders: Vec<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let args = Args::try_parse_from(["girderline", "results.json", "--geometry", "geo.json"]).unwrap();
        assert_eq!(args.dataset, "results.json");
        assert_eq!(args.geometry, "geo.json");
        assert_eq!(args.output_dir, ".");
        assert_eq!(args.force, ForceKind::Moment);
        assert!(args.girders.is_empty());
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_parse_repeated_girders_and_force() {
        let args = Args::try_parse_from([
            "girderline",
            "results.json",
            "-g",
            "geo.json",
            "--force",
            "Vy",
            "--girder",
            "Girder 1",
            "--girder",
            "Girder 5",
        ])
        .unwrap();
        assert_eq!(args.force, ForceKind::Shear);
        assert_eq!(args.girders, vec!["Girder 1", "Girder 5"]);
    }

    #[test]
    fn test_invalid_force_is_rejected() {
        let result = Args::try_parse_from(["girderline", "r.json", "-g", "g.json", "-f", "torsion"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_geometry_is_required() {
        assert!(Args::try_parse_from(["girderline", "results.json"]).is_err());
    }
}
