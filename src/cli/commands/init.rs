//! `lnr init` - create the project workspace marker.

use std::fs;

use anyhow::{Context, Result};

use lnr_lib::workspace;

pub fn execute() -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let marker = workspace::init_project(&cwd).context("Failed to initialize workspace")?;

    // Project config may hold a token; keep it out of version control
    // while letting aliases travel with the repository.
    fs::write(marker.join(".gitignore"), "config.json\n")
        .context("Failed to write .gitignore")?;

    println!("Initialized workspace in {}", marker.display());
    Ok(())
}
