//! Settle Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Settle layout
//! engine, its dataset provider and its renderers. It includes:
//!
//! - **Colors**: CSS color parsing ([`color::Color`])
//! - **Geometry**: Points, sizes and world bounds ([`geometry`] module)
//! - **Identifiers**: Node identifiers ([`identifier::NodeId`])
//! - **Scene**: The node/edge data model handed to the engine ([`scene`] module)

pub mod color;
pub mod geometry;
pub mod identifier;
pub mod scene;
