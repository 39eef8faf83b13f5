//! Render sinks that turn frames into output formats.
//!
//! # Pipeline Position
//!
//! ```text
//! ForceLayout
//!     ↓ driver, one step per frame
//! Frame (positions + scene)
//!     ↓ export (this module)
//! Output
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] - SVG documents via [`svg::SvgSink`]
//!
//! Position snapshots as JSON are collected by
//! [`PositionsSink`](crate::driver::PositionsSink).

pub mod svg;
