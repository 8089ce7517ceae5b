//! deskkit - Main Entry Point
//!
//! Parses arguments, sets up logging and prints the handler's message.
//! The actual implementation is in the `deskkit` library.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use deskkit::cli::{self, Args};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!();
        std::process::exit(2);
    }

    let args = Args::parse();
    init_logging(args.verbose);

    let output = cli::run(args)?;
    println!("{}", output);
    Ok(())
}
