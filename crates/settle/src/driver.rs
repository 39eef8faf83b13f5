//! Frame driving.
//!
//! A [`FrameDriver`] advances a [`ForceLayout`] by exactly one step per frame
//! and hands position snapshots to a [`RenderSink`]. The driver never looks
//! inside the engine; it steps, takes snapshots and asks a
//! [`SettleDetector`] whether the layout has come to rest.

use log::{debug, info};
use serde::Serialize;

use settle_core::scene::Scene;

use crate::{
    error::SettleError,
    layout::{ForceLayout, Positions, SettleDetector},
};

/// One rendered frame: the tick it was taken at, the node positions at that
/// tick, and the scene the positions belong to.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    tick: u64,
    positions: Positions,
    scene: &'a Scene,
}

impl<'a> Frame<'a> {
    pub fn new(tick: u64, positions: Positions, scene: &'a Scene) -> Self {
        Self {
            tick,
            positions,
            scene,
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn positions(&self) -> &Positions {
        &self.positions
    }

    /// Scene carrying labels, colors and edge weights
    pub fn scene(&self) -> &'a Scene {
        self.scene
    }
}

/// Consumer of frames produced by a [`FrameDriver`].
pub trait RenderSink {
    /// Renders one frame.
    ///
    /// # Errors
    ///
    /// Returns [`SettleError`] if the frame cannot be rendered or written.
    fn render(&mut self, frame: &Frame<'_>) -> Result<(), SettleError>;
}

/// Outcome of a drive
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DriveSummary {
    /// Steps taken by this drive.
    pub ticks: u64,
    pub converged: bool,
    /// Sum of squared speeds after the last step.
    pub kinetic_energy: f32,
}

/// Steps a layout once per frame until it converges or a frame cap is hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameDriver {
    max_ticks: usize,
    epsilon: f32,
    every: usize,
}

impl FrameDriver {
    /// Create a driver that only renders the final frame.
    ///
    /// # Arguments
    ///
    /// * `max_ticks` - Maximum number of frames, each running one step
    /// * `epsilon` - Convergence threshold on kinetic energy
    pub fn new(max_ticks: usize, epsilon: f32) -> Self {
        Self {
            max_ticks,
            epsilon,
            every: 0,
        }
    }

    /// Also render every `every`-th frame. Zero disables intermediate frames.
    pub fn with_every(mut self, every: usize) -> Self {
        self.every = every;
        self
    }

    pub fn max_ticks(&self) -> usize {
        self.max_ticks
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    pub fn every(&self) -> usize {
        self.every
    }

    /// Drive `layout` to convergence or the frame cap.
    ///
    /// The final frame is always rendered, including when no step ran.
    /// A frame is never rendered twice.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `sink`; stepping stops there.
    pub fn drive(
        &self,
        layout: &mut ForceLayout,
        scene: &Scene,
        sink: &mut dyn RenderSink,
    ) -> Result<DriveSummary, SettleError> {
        info!(
            max_ticks = self.max_ticks,
            epsilon = self.epsilon,
            every = self.every;
            "Driving layout"
        );

        let mut detector = SettleDetector::new(self.epsilon);
        let mut ticks = 0u64;
        let mut converged = false;

        for frame in 1..=self.max_ticks {
            layout.step();
            ticks += 1;
            converged = detector.observe(layout);

            let last = converged || frame == self.max_ticks;
            if !last && self.every > 0 && frame % self.every == 0 {
                sink.render(&Frame::new(layout.ticks(), layout.positions(), scene))?;
            }
            if converged {
                break;
            }
        }

        sink.render(&Frame::new(layout.ticks(), layout.positions(), scene))?;

        let summary = DriveSummary {
            ticks,
            converged,
            kinetic_energy: layout.kinetic_energy(),
        };
        debug!(summary:?; "Drive finished");
        Ok(summary)
    }
}

/// A position snapshot tagged with its tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionsFrame {
    pub tick: u64,
    pub positions: Positions,
}

/// Collects every rendered frame's positions.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct PositionsSink {
    frames: Vec<PositionsFrame>,
}

impl PositionsSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[PositionsFrame] {
        &self.frames
    }

    /// Returns the last collected frame, if any
    pub fn last(&self) -> Option<&PositionsFrame> {
        self.frames.last()
    }

    /// Serialize the collected frames as a pretty-printed JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`SettleError::Serialize`] if serialization fails.
    pub fn to_json(&self) -> Result<String, SettleError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl RenderSink for PositionsSink {
    fn render(&mut self, frame: &Frame<'_>) -> Result<(), SettleError> {
        self.frames.push(PositionsFrame {
            tick: frame.tick(),
            positions: frame.positions().clone(),
        });
        Ok(())
    }
}
