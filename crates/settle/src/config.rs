//! Configuration types for Settle.
//!
//! All types implement [`serde::Deserialize`] with per-field defaults, so a
//! TOML file only needs to name the values it overrides.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`SimulationConfig`] - Physical constants and frame driving limits.
//! - [`CanvasConfig`] - Canvas size and the margin that shapes the world bounds.
//! - [`StyleConfig`] - Visual styling options such as background color.
//!
//! # Example
//!
//! ```
//! # use settle::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.simulation().max_ticks(), 500);
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use settle_core::{
    color::Color,
    geometry::{Bounds, Size},
};

use crate::layout::{DEFAULT_CONVERGENCE_EPSILON, ForceConfig};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Simulation section.
    #[serde(default)]
    simulation: SimulationConfig,

    /// Canvas section.
    #[serde(default)]
    canvas: CanvasConfig,

    /// Style section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(simulation: SimulationConfig, canvas: CanvasConfig, style: StyleConfig) -> Self {
        Self {
            simulation,
            canvas,
            style,
        }
    }

    pub fn simulation(&self) -> &SimulationConfig {
        &self.simulation
    }

    /// Returns a mutable simulation section, used by command line overrides.
    pub fn simulation_mut(&mut self) -> &mut SimulationConfig {
        &mut self.simulation
    }

    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Builds the engine configuration for this canvas and simulation.
    ///
    /// The world bounds are the canvas shrunk by its margin. Values are not
    /// validated here; [`ForceLayout::new`](crate::layout::ForceLayout::new)
    /// rejects out-of-range ones.
    pub fn force_config(&self) -> ForceConfig {
        let mut config = ForceConfig::new(self.canvas.bounds());
        config
            .set_spring_stiffness(self.simulation.spring_stiffness)
            .set_ideal_edge_length(self.simulation.ideal_edge_length)
            .set_damping(self.simulation.damping);
        if let Some(strength) = self.simulation.repulsion_strength {
            config.set_repulsion_strength(strength);
        }
        config
    }
}

/// Physical constants and frame driving limits.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    spring_stiffness: f32,
    ideal_edge_length: f32,
    damping: f32,
    /// Derived from the world area when unset.
    repulsion_strength: Option<f32>,
    max_ticks: usize,
    epsilon: f32,
    /// Offer every n-th frame to the sink; 0 offers only the final frame.
    render_every: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            spring_stiffness: 0.01,
            ideal_edge_length: 100.0,
            damping: 0.9,
            repulsion_strength: None,
            max_ticks: 500,
            epsilon: DEFAULT_CONVERGENCE_EPSILON,
            render_every: 0,
        }
    }
}

impl SimulationConfig {
    pub fn spring_stiffness(&self) -> f32 {
        self.spring_stiffness
    }

    pub fn ideal_edge_length(&self) -> f32 {
        self.ideal_edge_length
    }

    pub fn damping(&self) -> f32 {
        self.damping
    }

    pub fn repulsion_strength(&self) -> Option<f32> {
        self.repulsion_strength
    }

    pub fn max_ticks(&self) -> usize {
        self.max_ticks
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    pub fn render_every(&self) -> usize {
        self.render_every
    }

    pub fn set_max_ticks(&mut self, max_ticks: usize) -> &mut Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn set_render_every(&mut self, every: usize) -> &mut Self {
        self.render_every = every;
        self
    }
}

/// Canvas dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    width: f32,
    height: f32,
    margin: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 450.0,
            margin: 40.0,
        }
    }
}

impl CanvasConfig {
    pub fn new(width: f32, height: f32, margin: f32) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// World bounds: the canvas rectangle shrunk by the margin on every side
    pub fn bounds(&self) -> Bounds {
        Bounds::from_canvas(self.size(), self.margin)
    }
}

/// Visual styling configuration for rendered frames.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background color, as a CSS color string.
    #[serde(default = "default_background_color")]
    background_color: String,
}

fn default_background_color() -> String {
    "#0a0a0f".to_string()
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: default_background_color(),
        }
    }
}

impl StyleConfig {
    /// Returns the parsed background [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is not a valid CSS color.
    pub fn background_color(&self) -> Result<Color, String> {
        Color::new(&self.background_color)
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        let simulation = config.simulation();
        assert_eq!(simulation.spring_stiffness(), 0.01);
        assert_eq!(simulation.ideal_edge_length(), 100.0);
        assert_eq!(simulation.damping(), 0.9);
        assert_eq!(simulation.repulsion_strength(), None);
        assert_eq!(simulation.epsilon(), 1e-4);
        assert_eq!(simulation.render_every(), 0);

        let bounds = config.canvas().bounds();
        assert_eq!(bounds, Bounds::new(40.0, 560.0, 40.0, 410.0));
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r##"
            [simulation]
            damping = 0.8
            repulsion_strength = 1500.0

            [canvas]
            width = 800.0

            [style]
            background_color = "white"
            "##,
        )
        .unwrap();

        assert_eq!(config.simulation().damping(), 0.8);
        assert_eq!(config.simulation().ideal_edge_length(), 100.0);
        assert_eq!(config.simulation().max_ticks(), 500);
        assert_eq!(config.canvas().size(), Size::new(800.0, 450.0));
        assert!(config.style().background_color().is_ok());

        let force = config.force_config();
        assert_eq!(force.damping(), 0.8);
        assert_eq!(force.repulsion_strength(), 1500.0);
        assert_eq!(force.bounds(), Bounds::new(40.0, 760.0, 40.0, 410.0));
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.simulation(), &SimulationConfig::default());
        assert_eq!(config.canvas(), &CanvasConfig::default());
    }

    #[test]
    fn test_invalid_background_color() {
        let config: AppConfig = toml::from_str(
            r#"
            [style]
            background_color = "nope"
            "#,
        )
        .unwrap();
        let err = config.style().background_color().unwrap_err();
        assert!(err.contains("nope"));
    }

    #[test]
    fn test_force_config_derives_repulsion_from_canvas() {
        let config = AppConfig::default();
        let force = config.force_config();
        // 520 x 370 world against the 600 x 450 reference canvas
        let expected = 2000.0 * 520.0 * 370.0 / (600.0 * 450.0);
        assert!((force.repulsion_strength() - expected).abs() < 1e-2);
        assert!(force.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let mut config = AppConfig::default();
        config.simulation_mut().set_max_ticks(42).set_render_every(5);
        assert_eq!(config.simulation().max_ticks(), 42);
        assert_eq!(config.simulation().render_every(), 5);
    }
}
