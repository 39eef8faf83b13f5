//! Settle - An incremental force-directed layout engine.
//!
//! Loading, layout and rendering for animated graph views. A scene of nodes
//! and weighted edges relaxes one step per frame under pairwise repulsion and
//! edge springs until it settles.
//!
//! - [`layout`] - The force layout engine
//! - [`driver`] - Frame driving and the [`RenderSink`](driver::RenderSink) seam
//! - [`export`] - Render sinks for output formats
//! - [`config`] - TOML configuration

pub mod config;
pub mod driver;
pub mod export;
pub mod layout;

mod error;

pub use settle_core::{color, geometry, identifier, scene};

pub use error::{ConfigurationError, SettleError};

use log::{debug, info, trace};

use config::AppConfig;
use driver::{DriveSummary, FrameDriver, RenderSink};
use export::svg::SvgSink;
use layout::ForceLayout;
use scene::Scene;
use settle_dataset::SceneOptions;

/// Builder for loading, laying out and rendering activity graphs.
///
/// # Examples
///
/// ```rust
/// use settle::{LayoutBuilder, config::AppConfig};
///
/// let source = r#"[
///     {"hJ7x8b": "YouTube", "QTGV3c": "Watched a video", "OXlB7d": "9:41 PM"},
///     {"hJ7x8b": "Search", "QTGV3c": "Searched for rust", "OXlB7d": "10:02 AM"}
/// ]"#;
///
/// let builder = LayoutBuilder::new(AppConfig::default());
/// let scene = builder.load(source).expect("Failed to load");
///
/// let (svg, summary) = builder.render_svg(&scene).expect("Failed to render");
/// assert!(svg.contains("<svg"));
/// assert!(summary.ticks > 0);
/// ```
#[derive(Debug, Default)]
pub struct LayoutBuilder {
    config: AppConfig,
}

impl LayoutBuilder {
    /// Create a new layout builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Normalize an activity export and build its scene.
    ///
    /// Products and behavioral clusters are placed on two rings around the
    /// canvas center.
    ///
    /// # Errors
    ///
    /// Returns [`SettleError::Dataset`] if the export is not a JSON array of
    /// objects.
    pub fn load(&self, source: &str) -> Result<Scene, SettleError> {
        info!(bytes = source.len(); "Loading activity export");

        let data = settle_dataset::normalize(source)?;
        let options = SceneOptions::new(self.config.canvas().size());
        let scene = settle_dataset::build_scene(&data, &options);

        info!(
            events = data.metadata.total_events,
            nodes = scene.nodes().len(),
            edges = scene.edges().len();
            "Scene built"
        );
        trace!(scene:?; "Built scene");

        Ok(scene)
    }

    /// Create a force layout for `scene` with the configured constants.
    ///
    /// # Errors
    ///
    /// Returns [`SettleError::Configuration`] if the scene is empty or a
    /// configured value is out of range.
    pub fn layout(&self, scene: &Scene) -> Result<ForceLayout, SettleError> {
        let layout = ForceLayout::from_scene(scene, self.config.force_config())?;
        debug!(nodes = layout.nodes().len(); "Layout created");
        Ok(layout)
    }

    /// Create the frame driver for the configured simulation limits.
    pub fn driver(&self) -> FrameDriver {
        let simulation = self.config.simulation();
        FrameDriver::new(simulation.max_ticks(), simulation.epsilon())
            .with_every(simulation.render_every())
    }

    /// Create an SVG sink for the configured canvas and style.
    ///
    /// # Errors
    ///
    /// Returns [`SettleError::Export`] if the background color is invalid.
    pub fn svg_sink(&self) -> Result<SvgSink, SettleError> {
        let background = self
            .config
            .style()
            .background_color()
            .map_err(SettleError::Export)?;
        Ok(SvgSink::new(self.config.canvas().size(), background))
    }

    /// Drive a layout of `scene` to convergence, offering frames to `sink`.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout cannot be constructed or the sink fails.
    pub fn drive(
        &self,
        scene: &Scene,
        sink: &mut dyn RenderSink,
    ) -> Result<(ForceLayout, DriveSummary), SettleError> {
        let mut layout = self.layout(scene)?;
        let summary = self.driver().drive(&mut layout, scene, sink)?;

        info!(
            ticks = summary.ticks,
            converged = summary.converged,
            kinetic_energy = summary.kinetic_energy;
            "Layout settled"
        );
        Ok((layout, summary))
    }

    /// Drive a layout of `scene` and render its final frame to SVG.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout cannot be constructed or rendering fails.
    pub fn render_svg(&self, scene: &Scene) -> Result<(String, DriveSummary), SettleError> {
        let mut sink = self.svg_sink()?;
        let (_, summary) = self.drive(scene, &mut sink)?;
        let svg = sink.to_svg_string()?;

        info!("SVG rendered successfully");
        Ok((svg, summary))
    }
}
