//! Scene construction for the activity network.
//!
//! Products form an outer ring, behavioral clusters an inner ring, and each
//! product is linked to the clusters its events fall into. The resulting
//! [`Scene`] is the initial state the force layout relaxes from.

use std::{collections::HashMap, f32::consts::PI};

use log::debug;

use settle_core::{
    geometry::{Point, Size},
    identifier::NodeId,
    scene::{NodeKind, Scene, SceneEdge, SceneNode},
};

use crate::activity::{ActivityData, ClusterId};

/// Fill colors for product nodes, cycled when there are more products.
pub const PRODUCT_COLORS: [&str; 6] = [
    "#ef4444", "#3b82f6", "#22c55e", "#f59e0b", "#6366f1", "#ec4899",
];

/// Fill colors for cluster nodes, indexed by cluster id.
pub const CLUSTER_COLORS: [&str; 10] = [
    "#8b5cf6", "#ec4899", "#06b6d4", "#10b981", "#f59e0b", "#3b82f6", "#f43f5e", "#a855f7",
    "#14b8a6", "#eab308",
];

/// Placement options for [`build_scene`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneOptions {
    canvas: Size,
    max_products: usize,
    max_clusters: usize,
    product_ring: f32,
    cluster_ring: f32,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            canvas: Size::new(600.0, 450.0),
            max_products: 6,
            max_clusters: 4,
            product_ring: 150.0,
            cluster_ring: 70.0,
        }
    }
}

impl SceneOptions {
    /// Creates options for a canvas of the given size with default ring settings
    pub fn new(canvas: Size) -> Self {
        Self {
            canvas,
            ..Self::default()
        }
    }

    /// Set the maximum number of product nodes
    pub fn set_max_products(&mut self, count: usize) -> &mut Self {
        self.max_products = count;
        self
    }

    /// Set the maximum number of cluster nodes
    pub fn set_max_clusters(&mut self, count: usize) -> &mut Self {
        self.max_clusters = count;
        self
    }

    /// Set the outer and inner ring radii
    pub fn set_rings(&mut self, product_ring: f32, cluster_ring: f32) -> &mut Self {
        self.product_ring = product_ring;
        self.cluster_ring = cluster_ring;
        self
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }
}

/// Node radius grows with the number of events it represents
fn product_radius(count: usize) -> f32 {
    15.0 + count as f32 / 200.0
}

fn cluster_radius(size: usize) -> f32 {
    12.0 + size as f32 / 200.0
}

/// Builds the network scene from normalized activity data.
///
/// Product nodes take ids `0..p` and cluster nodes `p..p + c`. Edges run from
/// each product to every cluster containing at least one of its events, with
/// the event count as weight.
pub fn build_scene(data: &ActivityData, options: &SceneOptions) -> Scene {
    let center = options.canvas.center();
    let products = &data.products[..data.products.len().min(options.max_products)];
    let clusters = &data.clusters[..data.clusters.len().min(options.max_clusters)];

    let mut nodes = Vec::with_capacity(products.len() + clusters.len());

    for (index, product) in products.iter().enumerate() {
        let angle = index as f32 / products.len() as f32 * 2.0 * PI - PI / 2.0;
        nodes.push(SceneNode::new(
            NodeId::new(index as u32),
            product.name.clone(),
            NodeKind::Product,
            PRODUCT_COLORS[index % PRODUCT_COLORS.len()],
            product.count as f32,
            center.polar_offset(options.product_ring, angle),
            product_radius(product.count),
        ));
    }

    // Clusters share the inner ring evenly, however many are shown
    for (index, cluster) in clusters.iter().enumerate() {
        let angle = index as f32 / clusters.len() as f32 * 2.0 * PI;
        nodes.push(SceneNode::new(
            NodeId::new((products.len() + index) as u32),
            cluster.label.clone(),
            NodeKind::Cluster,
            CLUSTER_COLORS[usize::from(cluster.id) % CLUSTER_COLORS.len()],
            cluster.size as f32,
            center.polar_offset(options.cluster_ring, angle),
            cluster_radius(cluster.size),
        ));
    }

    let mut memberships: HashMap<(&str, ClusterId), usize> = HashMap::new();
    for event in &data.events {
        *memberships
            .entry((event.product.as_str(), event.cluster))
            .or_default() += 1;
    }

    let mut edges = Vec::new();
    for (product_index, product) in products.iter().enumerate() {
        for (cluster_index, cluster) in clusters.iter().enumerate() {
            let Some(&weight) = memberships.get(&(product.name.as_str(), cluster.id)) else {
                continue;
            };
            edges.push(SceneEdge::new(
                NodeId::new(product_index as u32),
                NodeId::new((products.len() + cluster_index) as u32),
                weight as f32,
            ));
        }
    }

    debug!(
        products = products.len(),
        clusters = clusters.len(),
        edges = edges.len();
        "Activity network scene built"
    );

    Scene::new(nodes, edges)
}
