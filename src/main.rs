//! `lnr` - Linear workspace CLI
//!
//! Scoped aliases, layered configuration and entity caching for a Linear
//! workspace. One command per invocation, no daemon, no background work.

use lnr_rust::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
