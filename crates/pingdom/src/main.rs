//! Pingdom CLI
//!
//! Command-line interface for managing Pingdom checks.

use std::process::ExitCode;

use clap::Parser;
use pingdom::cli::{self, Args};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    let mut stdout = std::io::stdout().lock();
    match cli::run(args, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
