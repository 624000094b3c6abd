//! Integration tests for the PlotBuilder API
//!
//! The tests write a small five-girder deck to a temporary directory: nine
//! elements per girder along x, girders spaced along y, cross beams between
//! neighbouring girders at every node.

use std::{fs, path::PathBuf};

use serde_json::json;
use tempfile::TempDir;

use girderline::{
    GirderlineError, PlotBuilder,
    config::AppConfig,
    dataset::{Dataset, DatasetError},
    force::{ForceComponent, ForceKind},
    identifier::{ElementId, element_ids},
    structure::{BridgeGeometry, Girder},
};

const GIRDERS: u32 = 5;
const ELEMENTS_PER_GIRDER: u32 = 9;
const SPAN: f64 = 36.0;

// Element tag of the `index`-th element of girder `girder`, as in the reference model
fn element_tag(girder: u32, index: u32) -> u32 {
    if index < 8 {
        13 + girder + 9 * index
    } else {
        81 + girder
    }
}

fn node_tag(girder: u32, station: u32) -> u32 {
    girder * 100 + station + 1
}

struct Fixture {
    _dir: TempDir,
    dataset: PathBuf,
    geometry: PathBuf,
}

fn fixture(components: &[&str]) -> Fixture {
    let dir = TempDir::new().unwrap();

    let mut nodes = serde_json::Map::new();
    let mut members = serde_json::Map::new();
    for girder in 0..GIRDERS {
        for station in 0..=ELEMENTS_PER_GIRDER {
            let x = SPAN * f64::from(station) / f64::from(ELEMENTS_PER_GIRDER);
            nodes.insert(
                node_tag(girder, station).to_string(),
                json!([x, 2.5 * f64::from(girder), 0.0]),
            );
        }
        for index in 0..ELEMENTS_PER_GIRDER {
            members.insert(
                element_tag(girder, index).to_string(),
                json!([node_tag(girder, index), node_tag(girder, index + 1)]),
            );
        }
    }
    // Cross beams
    let mut cross_tag = 1000;
    for girder in 0..GIRDERS - 1 {
        for station in 0..=ELEMENTS_PER_GIRDER {
            members.insert(
                cross_tag.to_string(),
                json!([node_tag(girder, station), node_tag(girder + 1, station)]),
            );
            cross_tag += 1;
        }
    }

    let mut elements: Vec<u32> = members.keys().map(|k| k.parse().unwrap()).collect();
    elements.sort_unstable();

    // Simply supported girders under uniform load: parabolic moment, linear shear
    let load = 10.0;
    let forces: Vec<Vec<f64>> = elements
        .iter()
        .map(|&tag| {
            let position = (0..GIRDERS)
                .flat_map(|g| (0..ELEMENTS_PER_GIRDER).map(move |i| (g, i)))
                .find(|&(g, i)| element_tag(g, i) == tag);
            let Some((_, index)) = position else {
                return vec![0.0; components.len()];
            };
            let length = SPAN / f64::from(ELEMENTS_PER_GIRDER);
            let (xi, xj) = (f64::from(index) * length, f64::from(index + 1) * length);
            let moment = |x: f64| load * x * (SPAN - x) / 2.0;
            let shear = |x: f64| load * (SPAN / 2.0 - x);
            components
                .iter()
                .map(|&name| match name {
                    "Mz_i" => moment(xi),
                    "Mz_j" => moment(xj),
                    "Vy_i" => shear(xi),
                    "Vy_j" => shear(xj),
                    _ => 0.0,
                })
                .collect()
        })
        .collect();

    let dataset = json!({
        "coords": {
            "Element": {"dims": ["Element"], "data": elements},
            "Component": {"dims": ["Component"], "data": components},
        },
        "data_vars": {
            "forces": {"dims": ["Element", "Component"], "data": forces},
        },
    });
    let geometry = json!({"nodes": nodes, "members": members});

    let dataset_path = dir.path().join("results.json");
    let geometry_path = dir.path().join("geometry.json");
    fs::write(&dataset_path, dataset.to_string()).unwrap();
    fs::write(&geometry_path, geometry.to_string()).unwrap();

    Fixture {
        _dir: dir,
        dataset: dataset_path,
        geometry: geometry_path,
    }
}

fn full_fixture() -> Fixture {
    fixture(&["Mz_i", "Mz_j", "Vy_i", "Vy_j"])
}

#[test]
fn test_default_girders_match_generated_model() {
    let config = AppConfig::default();
    for (g, girder) in config.girders().iter().enumerate() {
        let expected: Vec<u32> = (0..ELEMENTS_PER_GIRDER)
            .map(|i| element_tag(g as u32, i))
            .collect();
        assert_eq!(girder.elements(), element_ids(&expected).as_slice());
    }
}

#[test]
fn test_central_girder_yields_nine_records() {
    let fixture = full_fixture();
    let builder = PlotBuilder::default();
    let dataset = builder.load_dataset(&fixture.dataset).expect("Failed to load dataset");

    let central = builder.config().primary_girder().unwrap();
    assert_eq!(
        central.elements(),
        element_ids(&[15, 24, 33, 42, 51, 60, 69, 78, 83]).as_slice()
    );

    let selection = dataset.extract(central.elements()).expect("Central girder should be present");
    assert_eq!(selection.len(), 9);
    assert_eq!(selection.elements(), central.elements());
}

#[test]
fn test_all_girders_yield_forty_five_unique_records() {
    let fixture = full_fixture();
    let builder = PlotBuilder::default();
    let dataset = builder.load_dataset(&fixture.dataset).unwrap();
    let geometry = builder.load_geometry(&fixture.geometry).unwrap();

    let series = builder.extract(&dataset, &geometry).expect("Failed to extract girders");
    assert_eq!(series.len(), 45);
    assert!(series.missing_components().is_empty());
    for component in ForceComponent::ALL {
        assert_eq!(series.component(component).map(<[f64]>::len), Some(45));
    }
}

#[test]
fn test_unknown_element_is_lookup_failure() {
    let fixture = full_fixture();
    let dataset = Dataset::open(&fixture.dataset).unwrap();

    let requested = element_ids(&[15, 24, 999_999]);
    assert!(dataset.extract(&requested).is_none());
    match dataset.select(&requested) {
        Err(DatasetError::UnknownElements(missing)) => {
            assert_eq!(missing, vec![ElementId::new(999_999)]);
        }
        other => panic!("expected UnknownElements, got {other:?}"),
    }
}

#[test]
fn test_girder_outside_member_table_is_geometry_error() {
    let fixture = full_fixture();
    let config = AppConfig::default().with_girders(vec![Girder::new("Ghost", element_ids(&[15, 4242]))]);
    let builder = PlotBuilder::new(config);
    let dataset = builder.load_dataset(&fixture.dataset).unwrap();
    let geometry = builder.load_geometry(&fixture.geometry).unwrap();

    let err = builder.extract(&dataset, &geometry).unwrap_err();
    assert!(matches!(err, GirderlineError::Geometry(_)), "unexpected error: {err}");
    assert!(err.to_string().contains("4242"));
}

#[test]
fn test_missing_component_is_warning_only() {
    let fixture = fixture(&["Mz_i", "Mz_j", "Vy_i"]);
    let builder = PlotBuilder::default();
    let dataset = builder.load_dataset(&fixture.dataset).unwrap();
    let geometry = builder.load_geometry(&fixture.geometry).unwrap();

    let series = builder.extract(&dataset, &geometry).unwrap();
    assert_eq!(series.missing_components(), &[ForceComponent::ShearEnd]);
    assert!(series.component(ForceComponent::MomentStart).is_some());

    // Moment renders normally; shear has no complete element and renders empty
    let girder = builder.config().primary_girder().unwrap();
    let moment = builder.girder_series(&series, &geometry, girder, ForceKind::Moment);
    let shear = builder.girder_series(&series, &geometry, girder, ForceKind::Shear);
    assert_eq!(moment.runs().len(), 1);
    assert!(shear.is_empty());
    assert_eq!(shear.gaps().len(), 9);

    let svg = builder.render_girder_svg(&series, &geometry, girder).unwrap();
    assert!(svg.contains("No data"));
}

#[test]
fn test_extruded_offsets_use_configured_scales() {
    let fixture = full_fixture();
    let builder = PlotBuilder::default();
    let dataset = builder.load_dataset(&fixture.dataset).unwrap();
    let geometry = builder.load_geometry(&fixture.geometry).unwrap();
    let series = builder.extract(&dataset, &geometry).unwrap();
    let girder = builder.config().primary_girder().unwrap();

    for (kind, scale) in [(ForceKind::Moment, 0.5), (ForceKind::Shear, 1.0)] {
        let line = builder.girder_series(&series, &geometry, girder, kind);
        assert_eq!(line.scale(), scale);
        for sample in line.samples() {
            assert_eq!(sample.extruded().z() - sample.base().z(), sample.value() * scale);
            assert_eq!(sample.extruded().x(), sample.base().x());
            assert_eq!(sample.extruded().y(), sample.base().y());
        }
    }
}

#[test]
fn test_loading_twice_is_deterministic() {
    let fixture = full_fixture();
    let builder = PlotBuilder::default();
    let central = builder.config().primary_girder().unwrap().clone();

    let first = Dataset::open(&fixture.dataset).unwrap().select(central.elements()).unwrap();
    let second = Dataset::open(&fixture.dataset).unwrap().select(central.elements()).unwrap();
    assert_eq!(first, second);

    let geometry = BridgeGeometry::load(&fixture.geometry).unwrap();
    let build = || {
        let dataset = builder.load_dataset(&fixture.dataset).unwrap();
        let series = builder.extract(&dataset, &geometry).unwrap();
        let line = builder.girder_series(&series, &geometry, &central, ForceKind::Moment);
        (series, line)
    };
    assert_eq!(build(), build());
}

#[test]
fn test_render_outputs() {
    let fixture = full_fixture();
    let builder = PlotBuilder::default();
    let dataset = builder.load_dataset(&fixture.dataset).unwrap();
    let geometry = builder.load_geometry(&fixture.geometry).unwrap();
    let series = builder.extract(&dataset, &geometry).unwrap();

    let girder = builder.config().primary_girder().unwrap();
    let svg = builder.render_girder_svg(&series, &geometry, girder).unwrap();
    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains("Girder 3"));

    let bridge = builder.render_bridge_svg(&series, &geometry, ForceKind::Shear).unwrap();
    for girder in builder.config().girders() {
        assert!(bridge.contains(&format!(r#"data-girder="{}""#, girder.name())));
    }
}

#[test]
fn test_missing_results_file() {
    let builder = PlotBuilder::default();
    let err = builder.load_dataset("definitely/missing.json").unwrap_err();
    assert!(matches!(
        err,
        GirderlineError::Dataset(DatasetError::NotFound(_))
    ));
}
