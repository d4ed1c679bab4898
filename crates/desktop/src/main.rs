//! `lostfound` command-line entry point.

use std::process::ExitCode;

use clap::Parser;
use lostfound_desktop::cli::{self, Cli};

fn main() -> anyhow::Result<ExitCode> {
    cli::run(Cli::parse())
}
