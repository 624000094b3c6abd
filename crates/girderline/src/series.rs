//! Force series construction.
//!
//! This module turns a [`Selection`] of raw force records into plottable
//! series:
//!
//! - [`ForceSeries`] - the four named component series indexed by element
//! - [`GirderSeries`] - one force kind along one girder, as runs of
//!   [`Sample`]s positioned in model space
//!
//! Missing data never aborts a build. A missing component is reported once
//! with a warning; a missing value, unresolvable geometry or a break in the
//! node chain ends the current run and is recorded as a [`Gap`].

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use log::{debug, warn};

use girderline_core::{
    force::{ForceComponent, ForceKind},
    geometry::{Axis, Point3},
    identifier::{ElementId, NodeId},
};

use crate::{config::ModelConfig, dataset::Selection, structure::BridgeGeometry, structure::Girder};

/// Returns the visual vertical offset for a force value.
///
/// The offset exaggerates the force for display. It is not a physical
/// displacement.
///
/// # Examples
///
/// ```
/// use girderline::series::vertical_offset;
///
/// assert_eq!(vertical_offset(120.0, 0.5), 60.0);
/// assert_eq!(vertical_offset(-8.0, 1.0), -8.0);
/// ```
pub fn vertical_offset(value: f64, scale: f64) -> f64 {
    value * scale
}

/// Moves `point` along the vertical `axis` by the scaled force value.
pub fn extrude(point: Point3, value: f64, scale: f64, axis: Axis) -> Point3 {
    point.offset(axis, vertical_offset(value, scale))
}

/// The four force component series of a selection, indexed by element.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceSeries {
    elements: IndexSet<ElementId>,
    values: IndexMap<ForceComponent, Vec<f64>>,
    missing: Vec<ForceComponent>,
}

impl ForceSeries {
    /// Builds the component series from a selection.
    ///
    /// Components absent from the selection are logged and reported by
    /// [`ForceSeries::missing_components`]; the others stay usable. When an
    /// element was selected more than once only its first record is kept.
    pub fn build(selection: &Selection) -> Self {
        let mut elements = IndexSet::with_capacity(selection.len());
        let mut rows = Vec::with_capacity(selection.len());
        for (row, &element) in selection.elements().iter().enumerate() {
            if elements.insert(element) {
                rows.push(row);
            }
        }

        let mut values = IndexMap::new();
        let mut missing = Vec::new();
        for component in ForceComponent::ALL {
            match selection.column(component.name()) {
                Some(column) => {
                    values.insert(component, rows.iter().map(|&row| column[row]).collect());
                }
                None => {
                    warn!(component = component.name(); "Missing variable in results");
                    missing.push(component);
                }
            }
        }

        debug!(
            elements = elements.len(),
            components = values.len(),
            missing = missing.len();
            "Force series built"
        );

        Self {
            elements,
            values,
            missing,
        }
    }

    /// Returns the elements covered by the series, in selection order.
    pub fn elements(&self) -> &IndexSet<ElementId> {
        &self.elements
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if no element was selected.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the components absent from the source selection.
    pub fn missing_components(&self) -> &[ForceComponent] {
        &self.missing
    }

    /// Returns all values of a component, aligned with [`ForceSeries::elements`].
    pub fn component(&self, component: ForceComponent) -> Option<&[f64]> {
        self.values.get(&component).map(Vec::as_slice)
    }

    /// Returns one value, or `None` if the component, the element or the
    /// value itself is missing.
    pub fn value(&self, component: ForceComponent, element: ElementId) -> Option<f64> {
        let index = self.elements.get_index_of(&element)?;
        let value = *self.values.get(&component)?.get(index)?;
        (!value.is_nan()).then_some(value)
    }

    /// Returns the start and end values of a force kind for one element.
    pub fn endpoint_values(&self, kind: ForceKind, element: ElementId) -> (Option<f64>, Option<f64>) {
        let (start, end) = kind.components();
        (self.value(start, element), self.value(end, element))
    }
}

/// One plotted point of a girder force line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    element: ElementId,
    node: NodeId,
    station: f64,
    value: f64,
    base: Point3,
    extruded: Point3,
}

impl Sample {
    /// Element the value belongs to.
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Node the sample sits on.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Position along the longitudinal axis.
    pub fn station(&self) -> f64 {
        self.station
    }

    /// Raw force value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Node coordinate.
    pub fn base(&self) -> Point3 {
        self.base
    }

    /// Node coordinate offset vertically by the scaled force.
    pub fn extruded(&self) -> Point3 {
        self.extruded
    }
}

/// Why a girder force line was interrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapReason {
    /// The element has no start or end value for the force kind.
    MissingValue,
    /// The element or one of its nodes is not in the geometry tables.
    MissingGeometry,
    /// The element does not start where the previous one ended.
    Discontinuity { previous_end: NodeId, start: NodeId },
}

impl fmt::Display for GapReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingValue => write!(f, "missing value"),
            Self::MissingGeometry => write!(f, "missing geometry"),
            Self::Discontinuity {
                previous_end,
                start,
            } => write!(f, "node {start} does not follow node {previous_end}"),
        }
    }
}

/// A break in a girder force line, recorded before `element`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    element: ElementId,
    reason: GapReason,
}

impl Gap {
    /// Element at which the line breaks.
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Why the line breaks there.
    pub fn reason(&self) -> GapReason {
        self.reason
    }
}

/// One force kind along one girder, positioned in model space.
#[derive(Debug, Clone, PartialEq)]
pub struct GirderSeries {
    name: String,
    kind: ForceKind,
    scale: f64,
    runs: Vec<Vec<Sample>>,
    gaps: Vec<Gap>,
}

impl GirderSeries {
    /// Builds the force line of `girder` for one force kind.
    ///
    /// Each element contributes a sample at its start node and one at its end
    /// node, so values jump at shared nodes where the end force of one element
    /// differs from the start force of the next. Consecutive elements are
    /// joined into a run while they share nodes and have data.
    pub fn build(
        girder: &Girder,
        geometry: &BridgeGeometry,
        series: &ForceSeries,
        kind: ForceKind,
        scale: f64,
        model: ModelConfig,
    ) -> Self {
        let vertical = model.vertical_axis();
        let longitudinal = model.longitudinal_axis();

        let mut runs = Vec::new();
        let mut gaps = Vec::new();
        let mut current: Vec<Sample> = Vec::new();

        let mut break_run = |current: &mut Vec<Sample>, element: ElementId, reason: GapReason| {
            warn!(
                girder = girder.name(),
                element = element.get(),
                kind = kind.name(),
                reason = reason.to_string();
                "Gap in girder force line"
            );
            gaps.push(Gap { element, reason });
            if !current.is_empty() {
                runs.push(std::mem::take(current));
            }
        };

        for &element in girder.elements() {
            let (Some(member), Ok((start_point, end_point))) =
                (geometry.member(element), geometry.member_endpoints(element))
            else {
                break_run(&mut current, element, GapReason::MissingGeometry);
                continue;
            };

            let (Some(start_value), Some(end_value)) = series.endpoint_values(kind, element) else {
                break_run(&mut current, element, GapReason::MissingValue);
                continue;
            };

            let previous_end = current.last().map(Sample::node);
            if let Some(previous_end) = previous_end {
                if previous_end != member.start() {
                    break_run(
                        &mut current,
                        element,
                        GapReason::Discontinuity {
                            previous_end,
                            start: member.start(),
                        },
                    );
                }
            }

            for (node, point, value) in [
                (member.start(), start_point, start_value),
                (member.end(), end_point, end_value),
            ] {
                current.push(Sample {
                    element,
                    node,
                    station: point.coordinate(longitudinal),
                    value,
                    base: point,
                    extruded: extrude(point, value, scale, vertical),
                });
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }

        debug!(
            girder = girder.name(),
            kind = kind.name(),
            runs = runs.len(),
            gaps = gaps.len();
            "Girder series built"
        );

        Self {
            name: girder.name().to_string(),
            kind,
            scale,
            runs,
            gaps,
        }
    }

    /// Returns the girder name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Force kind plotted by this line.
    pub fn kind(&self) -> ForceKind {
        self.kind
    }

    /// Returns the visual scale applied to the extruded points.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the contiguous runs of samples.
    pub fn runs(&self) -> &[Vec<Sample>] {
        &self.runs
    }

    /// Returns the recorded gaps in girder order.
    pub fn gaps(&self) -> &[Gap] {
        &self.gaps
    }

    /// Iterates over all samples of all runs.
    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.runs.iter().flatten()
    }

    /// Returns `true` if no element produced a sample.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Returns the smallest and largest station.
    pub fn station_range(&self) -> Option<(f64, f64)> {
        min_max(self.samples().map(Sample::station))
    }

    /// Returns the smallest and largest raw value.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        min_max(self.samples().map(Sample::value))
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, value| match acc {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
}
