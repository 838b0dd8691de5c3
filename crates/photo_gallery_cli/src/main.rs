//! Local gallery executable.
//!
//! # Responsibility
//! - Drive the gallery core from a terminal: list saved photos, save an
//!   image file as a new capture.
//! - Keep output machine-readable (JSON records on stdout).

mod cli;
mod commands;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = commands::execute(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
