//! Workspace discovery: where the global, project and cache documents live.
//!
//! Global and cache directories follow XDG conventions with `LNR_CONFIG_DIR`
//! / `LNR_CACHE_DIR` overrides (the overrides are also what the e2e tests
//! use to sandbox themselves). The project directory is found by walking up
//! from the current directory looking for a `.lnr/` marker.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LnrError, Result};
use crate::model::{EntityType, Scope};

/// Marker directory for the project scope.
pub const PROJECT_DIR_NAME: &str = ".lnr";

const CONFIG_FILE: &str = "config.json";
const ALIAS_FILE: &str = "aliases.json";

/// Resolved locations of every on-disk document the tool owns.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub global_dir: PathBuf,
    /// `None` when the current directory is not inside a project.
    pub project_dir: Option<PathBuf>,
    pub cache_dir: PathBuf,
}

impl Workspace {
    /// Discover the workspace from the process environment and cwd.
    ///
    /// # Errors
    ///
    /// Returns `Config` if no global config directory can be determined.
    pub fn discover() -> Result<Self> {
        let global_dir = match std::env::var_os("LNR_CONFIG_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .ok_or_else(|| LnrError::Config("cannot determine config directory".to_string()))?
                .join("lnr"),
        };

        let cache_dir = match std::env::var_os("LNR_CACHE_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => dirs::cache_dir()
                .ok_or_else(|| LnrError::Config("cannot determine cache directory".to_string()))?
                .join("lnr"),
        };

        let cwd = std::env::current_dir()?;
        let project_dir = find_project_dir(&cwd);

        Ok(Self {
            global_dir,
            project_dir,
            cache_dir,
        })
    }

    /// Build a workspace from explicit paths (used by tests and by
    /// callers that already know their layout).
    #[must_use]
    pub fn at(global_dir: PathBuf, project_dir: Option<PathBuf>, cache_dir: PathBuf) -> Self {
        Self {
            global_dir,
            project_dir,
            cache_dir,
        }
    }

    /// Path of the config document for a scope.
    ///
    /// # Errors
    ///
    /// Returns `NoProject` for the project scope outside a project.
    pub fn config_path(&self, scope: Scope) -> Result<PathBuf> {
        self.scope_dir(scope).map(|dir| dir.join(CONFIG_FILE))
    }

    /// Path of the alias document for a scope.
    ///
    /// # Errors
    ///
    /// Returns `NoProject` for the project scope outside a project.
    pub fn alias_path(&self, scope: Scope) -> Result<PathBuf> {
        self.scope_dir(scope).map(|dir| dir.join(ALIAS_FILE))
    }

    /// Per-entity-type persistent cache document. One file per type so
    /// that clearing one never perturbs another's timestamp.
    #[must_use]
    pub fn cache_path(&self, entity_type: EntityType) -> PathBuf {
        self.cache_dir.join(format!("{}.json", entity_type.as_str()))
    }

    #[must_use]
    pub const fn has_project(&self) -> bool {
        self.project_dir.is_some()
    }

    fn scope_dir(&self, scope: Scope) -> Result<PathBuf> {
        match scope {
            Scope::Global => Ok(self.global_dir.clone()),
            Scope::Project => self.project_dir.clone().ok_or(LnrError::NoProject),
        }
    }
}

/// Walk up from `start` looking for a `.lnr/` directory.
#[must_use]
pub fn find_project_dir(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let marker = current.join(PROJECT_DIR_NAME);
        if marker.is_dir() {
            return Some(marker);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Create a `.lnr/` project workspace in `dir`.
///
/// # Errors
///
/// Returns `AlreadyInitialized` if the marker directory exists,
/// or `Io` on filesystem failure.
pub fn init_project(dir: &Path) -> Result<PathBuf> {
    let marker = dir.join(PROJECT_DIR_NAME);
    if marker.exists() {
        return Err(LnrError::AlreadyInitialized(marker));
    }
    fs::create_dir_all(&marker)?;
    Ok(marker)
}
