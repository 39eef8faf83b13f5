//! Position snapshots.

use indexmap::IndexMap;
use serde::Serialize;

use settle_core::{geometry::Point, identifier::NodeId};

/// An owned snapshot of node positions, in node insertion order.
///
/// Snapshots are copies: changing one never affects the layout that produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Positions(IndexMap<NodeId, Point>);

impl Positions {
    /// Returns the position of a node, if present
    pub fn get(&self, id: NodeId) -> Option<Point> {
        self.0.get(&id).copied()
    }

    /// Returns a mutable reference to a node's position in this snapshot
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Point> {
        self.0.get_mut(&id)
    }

    /// Iterates over `(id, position)` pairs in node insertion order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Point)> + '_ {
        self.0.iter().map(|(id, point)| (*id, *point))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(NodeId, Point)> for Positions {
    fn from_iter<I: IntoIterator<Item = (NodeId, Point)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
