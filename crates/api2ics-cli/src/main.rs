//! api2ics CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use api2ics_cli::reporter::ConsoleReporter;
use api2ics_cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.debug {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(Level::WARN.to_string()))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let options = match cli.to_run_options() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut reporter = ConsoleReporter::new();
    reporter.banner();

    // Failures were already reported through the reporter; the exit code
    // is the only thing left to decide here.
    match api2ics_pipeline::run(&options, &mut reporter).await {
        Ok(summary) => {
            tracing::debug!(pages = summary.pages, events = summary.events, "run finished");
            println!("{}", "Conversion complete! 🚀".green().bold());
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = %e, stage = %e.stage(), "run aborted");
            ExitCode::FAILURE
        }
    }
}
