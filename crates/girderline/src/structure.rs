//! Static bridge geometry: node coordinates, member connectivity and girders.
//!
//! The analysis model describes the bridge as a grid of nodes joined by
//! members. Both tables are fixed input data; Girderline never derives or
//! edits them. A [`Girder`] picks an ordered chain of members out of that grid.
//!
//! Geometry files are JSON documents keyed by model tag:
//!
//! ```json
//! {
//!   "nodes":   { "1": [0.0, 0.0, 0.0], "2": [3.0, 0.0, 0.0] },
//!   "members": { "15": [1, 2] }
//! }
//! ```

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use girderline_core::{
    geometry::{Bounds3, Point3},
    identifier::{ElementId, NodeId},
};

/// Errors raised while loading or querying the geometry tables.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("geometry file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read geometry file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed geometry file {}: {message}", path.display())]
    Malformed { path: PathBuf, message: String },

    #[error("member {member} references unknown node {node}")]
    DanglingMember { member: ElementId, node: NodeId },

    #[error("member {0} is not in the member table")]
    UnknownMember(ElementId),

    #[error("girder `{girder}` references elements missing from the member table: {}", join_ids(.elements))]
    UnknownGirderMembers {
        girder: String,
        elements: Vec<ElementId>,
    },
}

pub(crate) fn join_ids(ids: &[ElementId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A member of the analysis model, connecting two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Member {
    start: NodeId,
    end: NodeId,
}

impl Member {
    /// Creates a member from its start (`i`) and end (`j`) nodes.
    pub fn new(start: NodeId, end: NodeId) -> Self {
        Self { start, end }
    }

    /// Returns the start node.
    pub fn start(self) -> NodeId {
        self.start
    }

    /// Returns the end node.
    pub fn end(self) -> NodeId {
        self.end
    }
}

/// A named, ordered chain of elements forming one longitudinal girder.
///
/// The element order is the order in which the girder is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Girder {
    name: String,
    elements: Vec<ElementId>,
}

impl Girder {
    /// Creates a girder from a name and its ordered elements.
    pub fn new(name: impl Into<String>, elements: Vec<ElementId>) -> Self {
        Self {
            name: name.into(),
            elements,
        }
    }

    /// Returns the girder name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the ordered element identifiers.
    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    /// Returns a file-name friendly version of the name.
    ///
    /// # Examples
    ///
    /// ```
    /// use girderline::structure::Girder;
    ///
    /// let girder = Girder::new("Girder 3 (central)", Vec::new());
    /// assert_eq!(girder.slug(), "girder-3-central");
    /// ```
    pub fn slug(&self) -> String {
        let mut slug = String::with_capacity(self.name.len());
        for c in self.name.chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c.to_ascii_lowercase());
            } else if !slug.ends_with('-') {
                slug.push('-');
            }
        }
        slug.trim_matches('-').to_string()
    }
}

#[derive(Deserialize)]
struct GeometryFile {
    nodes: BTreeMap<NodeId, Point3>,
    members: BTreeMap<ElementId, [NodeId; 2]>,
}

/// Node and member lookup tables of the bridge model.
#[derive(Debug, Clone, Default)]
pub struct BridgeGeometry {
    nodes: BTreeMap<NodeId, Point3>,
    members: BTreeMap<ElementId, Member>,
}

impl BridgeGeometry {
    /// Builds the geometry from in-memory tables.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DanglingMember`] when a member references a
    /// node that is not in the node table.
    pub fn from_tables(
        nodes: BTreeMap<NodeId, Point3>,
        members: BTreeMap<ElementId, Member>,
    ) -> Result<Self, GeometryError> {
        for (&member, connectivity) in &members {
            for node in [connectivity.start, connectivity.end] {
                if !nodes.contains_key(&node) {
                    return Err(GeometryError::DanglingMember { member, node });
                }
            }
        }
        Ok(Self { nodes, members })
    }

    /// Loads the geometry tables from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file is missing, cannot be read, is not a
    /// valid geometry document, or contains dangling members.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GeometryError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GeometryError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|source| GeometryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: GeometryFile =
            serde_json::from_str(&content).map_err(|err| GeometryError::Malformed {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;

        let members = file
            .members
            .into_iter()
            .map(|(id, [start, end])| (id, Member::new(start, end)))
            .collect();
        let geometry = Self::from_tables(file.nodes, members)?;

        info!(
            path = path.display().to_string(),
            nodes = geometry.nodes.len(),
            members = geometry.members.len();
            "Geometry loaded"
        );
        Ok(geometry)
    }

    /// Returns the coordinate of `node`.
    pub fn node(&self, node: NodeId) -> Option<Point3> {
        self.nodes.get(&node).copied()
    }

    /// Returns the connectivity of `member`.
    pub fn member(&self, member: ElementId) -> Option<Member> {
        self.members.get(&member).copied()
    }

    /// Returns the start and end coordinates of `member`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::UnknownMember`] when the member is not in the
    /// member table.
    pub fn member_endpoints(&self, member: ElementId) -> Result<(Point3, Point3), GeometryError> {
        let connectivity = self
            .member(member)
            .ok_or(GeometryError::UnknownMember(member))?;
        // `from_tables` guarantees both nodes exist
        match (self.node(connectivity.start), self.node(connectivity.end)) {
            (Some(start), Some(end)) => Ok((start, end)),
            (None, _) => Err(GeometryError::DanglingMember {
                member,
                node: connectivity.start,
            }),
            (_, None) => Err(GeometryError::DanglingMember {
                member,
                node: connectivity.end,
            }),
        }
    }

    /// Iterates over all members in tag order.
    pub fn members(&self) -> impl Iterator<Item = (ElementId, Member)> + '_ {
        self.members.iter().map(|(&id, &member)| (id, member))
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of members.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Returns the bounds of all node coordinates.
    pub fn bounds(&self) -> Option<Bounds3> {
        Bounds3::from_points(self.nodes.values().copied())
    }

    /// Checks that every girder element exists in the member table.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::UnknownGirderMembers`] for the first girder
    /// with missing members, listing all of them.
    pub fn check_girders(&self, girders: &[Girder]) -> Result<(), GeometryError> {
        for girder in girders {
            let missing: Vec<ElementId> = girder
                .elements()
                .iter()
                .copied()
                .filter(|id| !self.members.contains_key(id))
                .collect();
            if !missing.is_empty() {
                return Err(GeometryError::UnknownGirderMembers {
                    girder: girder.name().to_string(),
                    elements: missing,
                });
            }
            debug!(girder = girder.name(); "Girder members resolved");
        }
        Ok(())
    }
}
