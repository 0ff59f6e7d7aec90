//! s2rgb CLI entrypoint.
//!
//! Provides a thin wrapper over the `cli` module: parse args, run a single
//! conversion, and exit with the matching status. For programmatic use,
//! prefer the library API (`s2rgb::api`).

use clap::Parser;
use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    let args = cli::CliArgs::parse();
    cli::run(args)
}
