//! Logging setup for `lnr`.
//!
//! Diagnostics go to stderr so `--json` output on stdout stays clean.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber from verbosity flags.
///
/// `RUST_LOG` takes precedence when set; otherwise `-q` maps to errors
/// only and each `-v` raises the level (warn → info → debug → trace).
///
/// # Errors
///
/// Returns an error if a subscriber is already installed.
pub fn init_logging(verbose: u8, quiet: bool) -> Result<(), String> {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lnr={default_level},lnr_lib={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| e.to_string())
}
