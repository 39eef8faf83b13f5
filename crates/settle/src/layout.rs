//! Force-directed layout.
//!
//! This module relaxes a node/edge graph towards a locally stable arrangement,
//! one animation tick at a time, so a renderer can show it settling live.
//!
//! # Pipeline Position
//!
//! ```text
//! Activity export
//!     ↓ settle_dataset
//! Scene
//!     ↓ layout (this module), one step() per frame
//! Positions
//!     ↓ driver / export
//! Output
//! ```
//!
//! # Submodules
//!
//! - [`force`] - The force layout engine and its configuration
//! - [`positions`] - Read-only position snapshots handed to renderers

pub mod force;
pub mod positions;

pub use force::{
    DEFAULT_CONVERGENCE_EPSILON, Edge, ForceConfig, ForceLayout, Node, SETTLE_WINDOW,
    SettleDetector,
};
pub use positions::Positions;
