//! Error types for Settle operations.
//!
//! This module provides [`ConfigurationError`], the only error the force
//! layout can raise, and [`SettleError`], which wraps every error condition
//! of the loading, layout and export pipeline.

use std::io;

use thiserror::Error;

use settle_core::{geometry::Bounds, identifier::NodeId};
use settle_dataset::DatasetError;

/// Invalid input to [`ForceLayout::new`](crate::layout::ForceLayout::new).
///
/// Raised synchronously at construction; a layout that was constructed never
/// fails afterwards.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("Layout requires at least one node")]
    EmptyNodes,

    #[error("Node id {0} appears more than once")]
    DuplicateNode(NodeId),

    #[error("Node {id} is invalid: {reason}")]
    InvalidNode { id: NodeId, reason: &'static str },

    #[error("Edge {edge} references unknown node id {id}")]
    UnknownNode { edge: usize, id: NodeId },

    #[error("Edge {edge} connects node {id} to itself")]
    SelfLoop { edge: usize, id: NodeId },

    #[error("Edge {edge} has invalid weight {weight}; expected a finite value >= 0")]
    InvalidEdgeWeight { edge: usize, weight: f32 },

    #[error("Configuration value `{name}` = {value} is out of range; expected {expected}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        expected: &'static str,
    },

    #[error("World bounds {0:?} are not finite or have min greater than max")]
    InvalidBounds(Bounds),
}

/// The main error type for Settle operations.
#[derive(Debug, Error)]
pub enum SettleError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Configuration file error: {0}")]
    ConfigFile(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
