//! `pmdash` - project dashboard CLI
//!
//! This crate provides the `pmd` binary on top of [`pmdash_lib`], which
//! owns the entity stores and every query.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Layered YAML configuration
//! - [`format`] - Text formatting and JSON row types
//! - [`output`] - Output mode (plain, coloured, JSON)
//! - [`logging`] - tracing subscriber setup

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod format;
pub mod logging;
pub mod output;

pub use pmdash_lib as dash;

/// Run the CLI application.
///
/// This is the main entry point called from `main()`.
///
/// # Errors
///
/// Returns an error if configuration, seed loading or the command fails.
pub fn run() -> anyhow::Result<()> {
    cli::run()
}
