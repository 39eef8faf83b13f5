//! Settle Dataset Provider
//!
//! Turns raw activity exports into the [`Scene`](settle_core::scene::Scene)
//! the force layout relaxes:
//!
//! 1. [`normalize`] reshapes the export into [`ActivityData`]
//! 2. [`build_scene`] places products and behavioral clusters on two rings
//!    and links them by shared events
//!
//! # Example
//!
//! ```
//! use settle_dataset::{SceneOptions, build_scene, normalize};
//!
//! let source = r#"[{"hJ7x8b": "YouTube", "QTGV3c": "Watched a video", "OXlB7d": "9:41 PM"}]"#;
//! let data = normalize(source).expect("valid export");
//! let scene = build_scene(&data, &SceneOptions::default());
//!
//! assert_eq!(scene.nodes().len(), 2);
//! assert_eq!(scene.edges().len(), 1);
//! ```

pub mod activity;
pub mod error;
pub mod network;
pub mod record;
pub mod time;

pub use activity::ActivityData;
pub use error::DatasetError;
pub use network::{SceneOptions, build_scene};
pub use record::{normalize, normalize_records};
