//! Knight command-line driver.
//!
//! Parses the command line, reads the program, runs it on a
//! `kn_eval::Interpreter`, and turns the outcome into an exit status.

pub mod commands;
pub mod options;
pub mod tracing_setup;

pub use options::{Command, RunOptions, Source, USAGE};
