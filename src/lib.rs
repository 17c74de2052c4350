//! `lnr_rust` - Linear workspace CLI library
//!
//! This crate provides the command layer for the `lnr` CLI tool. The
//! core alias/config/cache logic lives in [`lnr_lib`]; this crate adds
//! the clap surface, output formatting, logging setup and the concrete
//! Linear GraphQL client.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`client`] - Linear GraphQL client (reqwest, blocking)
//! - [`format`] - Output formatting (text, JSON)
//! - [`logging`] - tracing-subscriber setup

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod client;
pub mod format;
pub mod logging;

pub use anyhow::Result;

/// Run the CLI application.
///
/// This is the main entry point called from `main()`.
///
/// # Errors
///
/// Returns an error if command execution fails.
pub fn run() -> Result<()> {
    cli::run()
}
