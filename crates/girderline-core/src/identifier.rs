//! Identifiers for structural model entities.
//!
//! Elements and nodes are addressed by the integer tags assigned by the
//! analysis model. The two newtypes keep them from being mixed up: a girder is
//! a list of [`ElementId`], while a member connects two [`NodeId`].

use std::{fmt, num::ParseIntError, str::FromStr};

use serde::{Deserialize, Serialize};

/// Identifier of a structural element (member) in the analysis model.
///
/// # Examples
///
/// ```
/// use girderline_core::identifier::ElementId;
///
/// let id = ElementId::new(15);
/// assert_eq!(id.get(), 15);
/// assert_eq!(id.to_string(), "15");
/// assert_eq!("24".parse::<ElementId>().unwrap(), ElementId::new(24));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ElementId(u32);

impl ElementId {
    /// Creates an element identifier from its model tag.
    pub const fn new(tag: u32) -> Self {
        Self(tag)
    }

    /// Returns the model tag.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ElementId {
    fn from(tag: u32) -> Self {
        Self(tag)
    }
}

impl FromStr for ElementId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a node (joint) in the analysis model.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a node identifier from its model tag.
    pub const fn new(tag: u32) -> Self {
        Self(tag)
    }

    /// Returns the model tag.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for NodeId {
    fn from(tag: u32) -> Self {
        Self(tag)
    }
}

impl FromStr for NodeId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Converts a slice of raw tags into element identifiers.
///
/// # Examples
///
/// ```
/// use girderline_core::identifier::{ElementId, element_ids};
///
/// let ids = element_ids(&[15, 24, 33]);
/// assert_eq!(ids, vec![ElementId::new(15), ElementId::new(24), ElementId::new(33)]);
/// ```
pub fn element_ids(tags: &[u32]) -> Vec<ElementId> {
    tags.iter().copied().map(ElementId::new).collect()
}
