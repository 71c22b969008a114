//! Directory Mirror CLI
//!
//! Keeps a replica directory in one-way sync with a source directory.

mod cli;
mod commands;
mod error;
mod interactive;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::Cli;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let config = cli.resolve()?;
    commands::run_mirror(&config, cli.once)
}
