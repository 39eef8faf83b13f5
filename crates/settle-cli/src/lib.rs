//! CLI logic for the Settle layout tool.
//!
//! Loads an activity export, drives the force layout frame by frame and
//! writes the final frame as SVG, optionally with every rendered frame's
//! positions as JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use settle::{
    LayoutBuilder, SettleError,
    driver::{Frame, PositionsSink, RenderSink},
    export::svg::SvgSink,
};

/// Fans each frame out to the SVG sink and the optional positions sink
struct Outputs {
    svg: SvgSink,
    positions: Option<PositionsSink>,
}

impl RenderSink for Outputs {
    fn render(&mut self, frame: &Frame<'_>) -> Result<(), SettleError> {
        self.svg.render(frame)?;
        if let Some(positions) = self.positions.as_mut() {
            positions.render(frame)?;
        }
        Ok(())
    }
}

/// Run the Settle CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `SettleError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed activity exports
/// - Out-of-range layout configuration
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), SettleError> {
    let source = fs::read_to_string(&args.input)?;
    run_with_source(args, &source)
}

/// Run the Settle CLI application on an already read input.
///
/// Callers that report errors against the input text read it once and pass
/// it here.
///
/// # Errors
///
/// See [`run`].
pub fn run_with_source(args: &Args, source: &str) -> Result<(), SettleError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing activity export"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(max_ticks) = args.max_ticks {
        app_config.simulation_mut().set_max_ticks(max_ticks);
    }
    if let Some(every) = args.render_every {
        app_config.simulation_mut().set_render_every(every);
    }

    let builder = LayoutBuilder::new(app_config);
    let scene = builder.load(source)?;

    let mut outputs = Outputs {
        svg: builder.svg_sink()?,
        positions: args.positions.as_ref().map(|_| PositionsSink::new()),
    };
    let (_, summary) = builder.drive(&scene, &mut outputs)?;

    outputs.svg.save(&args.output)?;
    info!(output_file = args.output; "SVG exported successfully");

    if let (Some(path), Some(positions)) = (&args.positions, &outputs.positions) {
        fs::write(path, positions.to_json()?)?;
        info!(
            output_file = path,
            frames = positions.frames().len();
            "Positions exported successfully"
        );
    }

    info!(
        ticks = summary.ticks,
        converged = summary.converged;
        "Layout complete"
    );

    Ok(())
}
