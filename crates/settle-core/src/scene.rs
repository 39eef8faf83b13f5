//! Scene model shared between the dataset provider, the layout engine and renderers.
//!
//! A [`Scene`] is pure data: labelled, colored nodes with initial positions
//! and radii, plus weighted edges between them. It carries no behavior; the
//! force layout reads positions and radii from it, renderers read labels and
//! colors.

use serde::Serialize;

use crate::{geometry::Point, identifier::NodeId};

/// The role a node plays in the activity network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A product the activity was recorded in (outer ring)
    Product,
    /// A behavioral cluster of events (inner ring)
    Cluster,
}

/// A labelled node with its initial placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneNode {
    id: NodeId,
    label: String,
    kind: NodeKind,
    color: String,
    value: f32,
    position: Point,
    radius: f32,
}

impl SceneNode {
    /// Creates a new scene node.
    ///
    /// # Arguments
    ///
    /// * `id` - Unique node identifier
    /// * `label` - Display label
    /// * `kind` - Product or cluster
    /// * `color` - CSS color string used when rendering
    /// * `value` - Magnitude the radius was derived from
    /// * `position` - Initial position
    /// * `radius` - Drawing radius
    pub fn new(
        id: NodeId,
        label: impl Into<String>,
        kind: NodeKind,
        color: impl Into<String>,
        value: f32,
        position: Point,
        radius: f32,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            kind,
            color: color.into(),
            value,
            position,
            radius,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Returns the initial position
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

/// A weighted relation between two scene nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneEdge {
    source: NodeId,
    target: NodeId,
    weight: f32,
}

impl SceneEdge {
    pub fn new(source: NodeId, target: NodeId, weight: f32) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }
}

/// A complete node/edge set ready for layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scene {
    nodes: Vec<SceneNode>,
    edges: Vec<SceneEdge>,
}

impl Scene {
    pub fn new(nodes: Vec<SceneNode>, edges: Vec<SceneEdge>) -> Self {
        Self { nodes, edges }
    }

    /// Returns the nodes in insertion order
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// Returns the edges in insertion order
    pub fn edges(&self) -> &[SceneEdge] {
        &self.edges
    }

    /// Looks up a node by identifier
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Returns true when the scene has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
