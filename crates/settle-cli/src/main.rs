//! Settle CLI entry point.

use std::{fs, process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use settle::SettleError;
use settle_cli::{Args, error_adapter::to_reportable};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Settle");
    debug!(args:?; "Parsed arguments");

    // Read once so JSON errors can be shown against the input
    let source = match fs::read_to_string(&args.input) {
        Ok(source) => source,
        Err(err) => {
            report(&SettleError::from(err), None);
            process::exit(1);
        }
    };

    if let Err(err) = settle_cli::run_with_source(&args, &source) {
        report(&err, Some(&source));
        process::exit(1);
    }

    info!("Completed successfully");
}

/// Render an error as a miette report through the logger
fn report(err: &SettleError, source: Option<&str>) {
    let reporter = miette::GraphicalReportHandler::new();
    let reportable = to_reportable(err, source);

    let mut writer = String::new();
    reporter
        .render_report(&mut writer, &reportable)
        .expect("Writing to String buffer is infallible");

    error!("{writer}");
}
