//! SheetSync CLI - one sync pass over every sheet, then exit.

use clap::Parser;
use sheetsync::config::{CliArgs, SyncConfig};
use sheetsync::error::Result;
use sheetsync::source::SheetsSource;
use sheetsync::sync::SyncEngine;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = CliArgs::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("sheetsync=info"));
    if args.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<()> {
    let config = SyncConfig::from_cli(args)?;
    tracing::debug!("Configuration: {:?}", config);

    let source = SheetsSource::new(&config)?;
    let engine = SyncEngine::new(config, source);
    let report = engine.run()?;

    if !args.quiet {
        report.print_summary();
    }

    Ok(())
}
