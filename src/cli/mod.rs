//! Command Line Interface (CLI) layer for s2rgb.
//!
//! This module defines argument parsing (`args`) and the orchestration
//! logic (`runner`) that turns flags and presets into `ConversionParams` and
//! reports the outcome. If you are embedding s2rgb into another application,
//! use the `s2rgb::api` module instead of calling the CLI code.
pub mod args;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
