use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use cfgsum::args::Args;
use cfgsum::runner::run;

fn init_logging(level: &str) {
    // Logs go to stderr; stdout carries only the result line.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| level.parse().unwrap_or_default()),
        )
        .init();
}

fn run_cli() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);
    info!("Starting cfgsum v{}", env!("CARGO_PKG_VERSION"));

    let cwd = std::env::current_dir().context("resolving working directory")?;
    let options = args.into_run_options(&cwd);
    let summary = run(&options)?;

    println!(
        "✅ Summary written to {} ({} type sheet(s), {} functor(s) from {} cfg file(s))",
        summary.output.display(),
        summary.emitted.type_sheets,
        summary.functors,
        summary.cfg_files - summary.cfg_skipped,
    );
    Ok(())
}

fn main() -> ExitCode {
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[cfgsum] Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
