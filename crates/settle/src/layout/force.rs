//! Force-directed layout engine
//!
//! This module implements an incremental spring-repulsion simulation. Each
//! call to [`ForceLayout::step`] advances the simulation by exactly one tick:
//!
//! 1. **Repulsion**: every unordered node pair pushes apart with magnitude
//!    `repulsion_strength / dist²`, where `dist` is floored at `1.0`.
//! 2. **Attraction**: every edge pulls its endpoints towards
//!    `ideal_edge_length` with magnitude `(dist - ideal) * spring_stiffness`.
//!    Edges whose endpoints coincide contribute nothing for that tick.
//! 3. **Integration**: velocities are damped, added to positions, and
//!    positions are clamped into the world bounds. Velocity is left as-is
//!    on a clamp.
//!
//! Forces are applied directly to velocities, so node mass is implicitly one.
//! The repulsion pass is O(n²); the engine targets tens of nodes.

use std::collections::HashMap;

use log::{debug, trace, warn};
use serde::Deserialize;

use settle_core::{
    geometry::{Bounds, Point, Size},
    identifier::NodeId,
    scene::Scene,
};

use super::positions::Positions;
use crate::error::ConfigurationError;

/// Convergence threshold on the sum of squared node speeds.
pub const DEFAULT_CONVERGENCE_EPSILON: f32 = 1e-4;

/// Repulsion used for a world the size of the reference canvas.
const REFERENCE_REPULSION: f32 = 2000.0;

/// The reference canvas the default repulsion was tuned for.
const REFERENCE_CANVAS: Size = Size::new(600.0, 450.0);

/// Distance floor in the repulsion pass.
const MIN_REPULSION_DISTANCE: f32 = 1.0;

/// Consecutive calm steps before a layout counts as settled.
pub const SETTLE_WINDOW: usize = 10;

/// A simulated node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    id: NodeId,
    position: Point,
    velocity: Point,
    radius: f32,
}

impl Node {
    /// Create a node at rest
    pub fn new(id: NodeId, position: Point, radius: f32) -> Self {
        Self {
            id,
            position,
            velocity: Point::default(),
            radius,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn velocity(&self) -> Point {
        self.velocity
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

/// A weighted edge between two nodes.
///
/// The weight does not enter the force computation; renderers use it for
/// stroke width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    source: NodeId,
    target: NodeId,
    weight: f32,
}

impl Edge {
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

/// Physical constants and world bounds for a [`ForceLayout`].
///
/// Every field has a default, so a partial TOML table deserializes cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForceConfig {
    repulsion_strength: Option<f32>,
    spring_stiffness: f32,
    ideal_edge_length: f32,
    damping: f32,
    bounds: Bounds,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self::new(Bounds::from_canvas(REFERENCE_CANVAS, 40.0))
    }
}

impl ForceConfig {
    /// Create a configuration with default constants for the given world bounds
    pub fn new(bounds: Bounds) -> Self {
        Self {
            repulsion_strength: None,
            spring_stiffness: 0.01,
            ideal_edge_length: 100.0,
            damping: 0.9,
            bounds,
        }
    }

    /// Set the pairwise repulsion coefficient
    pub fn set_repulsion_strength(&mut self, strength: f32) -> &mut Self {
        self.repulsion_strength = Some(strength);
        self
    }

    /// Set the spring stiffness for edge forces
    pub fn set_spring_stiffness(&mut self, stiffness: f32) -> &mut Self {
        self.spring_stiffness = stiffness;
        self
    }

    /// Set the rest length of edges
    pub fn set_ideal_edge_length(&mut self, length: f32) -> &mut Self {
        self.ideal_edge_length = length;
        self
    }

    /// Set the per-tick velocity damping factor
    pub fn set_damping(&mut self, damping: f32) -> &mut Self {
        self.damping = damping;
        self
    }

    /// Set the world bounds
    pub fn set_bounds(&mut self, bounds: Bounds) -> &mut Self {
        self.bounds = bounds;
        self
    }

    /// Returns the repulsion coefficient.
    ///
    /// Unless set explicitly, this is the reference repulsion scaled by the
    /// ratio of the world area to the reference canvas area.
    pub fn repulsion_strength(&self) -> f32 {
        self.repulsion_strength.unwrap_or_else(|| {
            let reference_area = REFERENCE_CANVAS.width() * REFERENCE_CANVAS.height();
            REFERENCE_REPULSION * self.bounds.area() / reference_area
        })
    }

    pub fn spring_stiffness(&self) -> f32 {
        self.spring_stiffness
    }

    pub fn ideal_edge_length(&self) -> f32 {
        self.ideal_edge_length
    }

    pub fn damping(&self) -> f32 {
        self.damping
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Check every value against its domain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidBounds`] or
    /// [`ConfigurationError::OutOfRange`] for the first offending value.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.bounds.is_valid() {
            return Err(ConfigurationError::InvalidBounds(self.bounds));
        }

        let repulsion = self.repulsion_strength();
        if !(repulsion.is_finite() && repulsion > 0.0) {
            return Err(ConfigurationError::OutOfRange {
                name: "repulsion_strength",
                value: repulsion,
                expected: "a finite value > 0",
            });
        }
        if !(self.spring_stiffness > 0.0 && self.spring_stiffness < 1.0) {
            return Err(ConfigurationError::OutOfRange {
                name: "spring_stiffness",
                value: self.spring_stiffness,
                expected: "a value in (0, 1)",
            });
        }
        if !(self.ideal_edge_length.is_finite() && self.ideal_edge_length > 0.0) {
            return Err(ConfigurationError::OutOfRange {
                name: "ideal_edge_length",
                value: self.ideal_edge_length,
                expected: "a finite value > 0",
            });
        }
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(ConfigurationError::OutOfRange {
                name: "damping",
                value: self.damping,
                expected: "a value in (0, 1)",
            });
        }
        Ok(())
    }
}

/// Edge endpoints resolved to node indices
#[derive(Debug, Clone, Copy)]
struct Spring {
    source: usize,
    target: usize,
}

/// Force-directed layout engine.
///
/// Owns its nodes exclusively. The node and edge sets are fixed at
/// construction; only positions and velocities change.
///
/// # Examples
///
/// ```
/// use settle::layout::{Edge, ForceConfig, ForceLayout, Node};
/// use settle_core::{geometry::{Bounds, Point}, identifier::NodeId};
///
/// let nodes = vec![
///     Node::new(NodeId::new(0), Point::new(0.0, 0.0), 10.0),
///     Node::new(NodeId::new(1), Point::new(10.0, 0.0), 10.0),
/// ];
/// let edges = vec![Edge::new(NodeId::new(0), NodeId::new(1), 1.0)];
/// let mut config = ForceConfig::new(Bounds::new(-500.0, 500.0, -500.0, 500.0));
/// config.set_repulsion_strength(1.0);
///
/// let mut layout = ForceLayout::new(nodes, edges, config).expect("valid layout");
/// layout.settle(1000, 1e-6);
///
/// let positions = layout.positions();
/// let a = positions.get(NodeId::new(0)).unwrap();
/// let b = positions.get(NodeId::new(1)).unwrap();
/// assert!((b.sub_point(a).hypot() - 100.0).abs() < 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct ForceLayout {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    springs: Vec<Spring>,
    config: ForceConfig,
    repulsion_strength: f32,
    ticks: u64,
}

impl ForceLayout {
    /// Create a force layout.
    ///
    /// Initial positions outside the world bounds are clamped into them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if `nodes` is empty, a node id repeats,
    /// a node has a non-finite position or a negative or non-finite radius,
    /// an edge references an unknown id, connects a node to itself or has a
    /// negative or non-finite weight, or a configuration value is out of range.
    pub fn new(
        nodes: Vec<Node>,
        edges: Vec<Edge>,
        config: ForceConfig,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;

        if nodes.is_empty() {
            return Err(ConfigurationError::EmptyNodes);
        }

        let mut index: HashMap<NodeId, usize> = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if !node.position.is_finite() {
                return Err(ConfigurationError::InvalidNode {
                    id: node.id,
                    reason: "position is not finite",
                });
            }
            if !(node.radius.is_finite() && node.radius >= 0.0) {
                return Err(ConfigurationError::InvalidNode {
                    id: node.id,
                    reason: "radius must be finite and >= 0",
                });
            }
            if index.insert(node.id, i).is_some() {
                return Err(ConfigurationError::DuplicateNode(node.id));
            }
        }

        let springs = edges
            .iter()
            .enumerate()
            .map(|(i, edge)| {
                let lookup = |id: NodeId| {
                    index
                        .get(&id)
                        .copied()
                        .ok_or(ConfigurationError::UnknownNode { edge: i, id })
                };
                let source = lookup(edge.source)?;
                let target = lookup(edge.target)?;
                if source == target {
                    return Err(ConfigurationError::SelfLoop {
                        edge: i,
                        id: edge.source,
                    });
                }
                if !(edge.weight.is_finite() && edge.weight >= 0.0) {
                    return Err(ConfigurationError::InvalidEdgeWeight {
                        edge: i,
                        weight: edge.weight,
                    });
                }
                Ok(Spring { source, target })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let bounds = config.bounds();
        let nodes: Vec<Node> = nodes
            .into_iter()
            .map(|node| Node {
                position: bounds.clamp(node.position),
                velocity: Point::default(),
                ..node
            })
            .collect();

        let repulsion_strength = config.repulsion_strength();
        debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            repulsion_strength,
            spring_stiffness = config.spring_stiffness(),
            ideal_edge_length = config.ideal_edge_length(),
            damping = config.damping();
            "Force layout constructed"
        );

        Ok(Self {
            nodes,
            edges,
            springs,
            config,
            repulsion_strength,
            ticks: 0,
        })
    }

    /// Create a force layout from a scene's nodes and edges.
    ///
    /// # Errors
    ///
    /// See [`ForceLayout::new`].
    pub fn from_scene(scene: &Scene, config: ForceConfig) -> Result<Self, ConfigurationError> {
        let nodes = scene
            .nodes()
            .iter()
            .map(|node| Node::new(node.id(), node.position(), node.radius()))
            .collect();
        let edges = scene
            .edges()
            .iter()
            .map(|edge| Edge::new(edge.source(), edge.target(), edge.weight()))
            .collect();
        Self::new(nodes, edges, config)
    }

    /// Advance the simulation by one tick.
    pub fn step(&mut self) {
        self.apply_repulsion();
        self.apply_attraction();
        self.integrate();
        self.ticks += 1;

        trace!(
            tick = self.ticks,
            kinetic_energy = self.kinetic_energy();
            "Force layout step"
        );
    }

    /// Step until settled or `max_ticks` steps have run.
    ///
    /// Settling is judged by a [`SettleDetector`], so a spring passing through
    /// a turning point does not end the run. Always runs at least one step
    /// when `max_ticks > 0`. Returns the number of steps taken.
    pub fn settle(&mut self, max_ticks: usize, epsilon: f32) -> usize {
        let mut detector = SettleDetector::new(epsilon);
        for tick in 1..=max_ticks {
            self.step();
            if detector.observe(self) {
                debug!(ticks = tick; "Force layout settled");
                return tick;
            }
        }
        max_ticks
    }

    /// Returns a snapshot of every node position.
    pub fn positions(&self) -> Positions {
        self.nodes
            .iter()
            .map(|node| (node.id, node.position))
            .collect()
    }

    /// Returns true when the sum of squared node speeds is below `epsilon`.
    pub fn is_converged(&self, epsilon: f32) -> bool {
        self.kinetic_energy() < epsilon
    }

    /// Sum of squared node speeds
    pub fn kinetic_energy(&self) -> f32 {
        self.nodes
            .iter()
            .map(|node| node.velocity.length_squared())
            .sum()
    }

    /// Number of completed steps
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Returns the nodes in insertion order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn config(&self) -> &ForceConfig {
        &self.config
    }

    /// Pairwise repulsion, applied equal and opposite to each pair
    fn apply_repulsion(&mut self) {
        let strength = self.repulsion_strength;
        let count = self.nodes.len();

        for i in 0..count {
            for j in (i + 1)..count {
                let trans = self.nodes[j].position.sub_point(self.nodes[i].position);

                // Avoid division by zero
                let distance = trans.hypot().max(MIN_REPULSION_DISTANCE);

                let force = strength / (distance * distance);
                let push = trans.scale(force / distance);

                self.nodes[i].velocity = self.nodes[i].velocity.sub_point(push);
                self.nodes[j].velocity = self.nodes[j].velocity.add_point(push);
            }
        }
    }

    /// Spring forces along edges
    fn apply_attraction(&mut self) {
        let stiffness = self.config.spring_stiffness;
        let ideal = self.config.ideal_edge_length;
        let nodes = &mut self.nodes;

        for spring in &self.springs {
            let trans = nodes[spring.target]
                .position
                .sub_point(nodes[spring.source].position);
            let distance = trans.hypot();

            // No direction for coincident endpoints
            if distance == 0.0 {
                continue;
            }

            let force = (distance - ideal) * stiffness;
            let unit = Point::new(trans.x() / distance, trans.y() / distance);
            let pull = unit.scale(force);

            nodes[spring.source].velocity = nodes[spring.source].velocity.add_point(pull);
            nodes[spring.target].velocity = nodes[spring.target].velocity.sub_point(pull);
        }
    }

    /// Damp, move and clamp
    fn integrate(&mut self) {
        let damping = self.config.damping;
        let bounds = self.config.bounds;

        for node in &mut self.nodes {
            let velocity = node.velocity.scale(damping);
            node.velocity = if velocity.is_finite() {
                velocity
            } else {
                warn!(node = node.id.value(); "Non-finite velocity reset to zero");
                Point::default()
            };
            node.position = bounds.clamp(node.position.add_point(node.velocity));
        }
    }
}

/// Decides when a stepped layout has come to rest.
///
/// Kinetic energy dips towards zero at every turning point of an underdamped
/// spring. A layout is settled once its energy stayed below `epsilon` for
/// [`SETTLE_WINDOW`] consecutive steps and did not rise on the last of them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleDetector {
    epsilon: f32,
    calm: usize,
    previous: f32,
}

impl SettleDetector {
    pub fn new(epsilon: f32) -> Self {
        Self {
            epsilon,
            calm: 0,
            previous: f32::INFINITY,
        }
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Record the state of `layout` after a step. Returns true once settled.
    pub fn observe(&mut self, layout: &ForceLayout) -> bool {
        let energy = layout.kinetic_energy();
        self.calm = if layout.is_converged(self.epsilon) {
            self.calm + 1
        } else {
            0
        };
        let falling = energy <= self.previous;
        self.previous = energy;

        self.calm >= SETTLE_WINDOW && falling
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn bounds() -> Bounds {
        Bounds::new(-200.0, 200.0, -150.0, 150.0)
    }

    fn layout_strategy() -> impl Strategy<Value = ForceLayout> {
        let nodes = prop::collection::vec((-250.0f32..250.0, -200.0f32..200.0), 1..12);
        let config = (
            1.0f32..20_000.0,
            0.001f32..0.5,
            1.0f32..2000.0,
            0.05f32..0.99,
        );
        (nodes, config, prop::collection::vec((0usize..12, 0usize..12), 0..20)).prop_map(
            |(points, (repulsion, stiffness, ideal, damping), pairs)| {
                let count = points.len();
                let nodes = points
                    .into_iter()
                    .enumerate()
                    .map(|(i, (x, y))| Node::new(NodeId::new(i as u32), Point::new(x, y), 5.0))
                    .collect();
                let edges = pairs
                    .into_iter()
                    .map(|(a, b)| (a % count, b % count))
                    .filter(|(a, b)| a != b)
                    .map(|(a, b)| Edge::new(NodeId::new(a as u32), NodeId::new(b as u32), 1.0))
                    .collect();
                let mut config = ForceConfig::new(bounds());
                config
                    .set_repulsion_strength(repulsion)
                    .set_spring_stiffness(stiffness)
                    .set_ideal_edge_length(ideal)
                    .set_damping(damping);
                ForceLayout::new(nodes, edges, config).expect("strategy builds valid layouts")
            },
        )
    }

    proptest! {
        #[test]
        fn positions_stay_in_bounds_and_finite(mut layout in layout_strategy(), ticks in 1usize..60) {
            for _ in 0..ticks {
                layout.step();
                for node in layout.nodes() {
                    prop_assert!(bounds().contains(node.position()));
                    prop_assert!(node.position().is_finite());
                    prop_assert!(node.velocity().is_finite());
                }
            }
        }

        #[test]
        fn stepping_is_deterministic(layout in layout_strategy(), ticks in 1usize..30) {
            let mut a = layout.clone();
            let mut b = layout;
            for _ in 0..ticks {
                a.step();
                b.step();
            }
            prop_assert_eq!(a.positions(), b.positions());
        }
    }
}
