//! Layered configuration store.
//!
//! Two JSON documents (global and project scope) hold scalar settings.
//! The effective value of a key is a linear scan over the layers in
//! priority order — env override, project file, global file — and the
//! winning layer is reported alongside the value. Writes touch exactly
//! one scope's file as an atomic read-modify-write.

use std::collections::BTreeMap;

use crate::docstore;
use crate::error::{LnrError, Result};
use crate::model::{ConfigKey, ConfigSource, Scope};
use crate::workspace::Workspace;

type ConfigDoc = BTreeMap<String, String>;

pub struct ConfigStore {
    workspace: Workspace,
}

impl ConfigStore {
    #[must_use]
    pub fn new(workspace: Workspace) -> Self {
        Self { workspace }
    }

    /// Effective value and its source, or `None` if no layer defines it.
    #[must_use]
    pub fn get_effective(&self, key: ConfigKey) -> Option<(String, ConfigSource)> {
        let env_value = std::env::var(key.env_var()).ok().filter(|v| !v.is_empty());
        self.effective_from(key, env_value)
    }

    /// Value of a key in exactly one scope's file, ignoring precedence.
    #[must_use]
    pub fn get_in_scope(&self, key: ConfigKey, scope: Scope) -> Option<String> {
        self.scope_doc(scope)?.get(key.as_str()).cloned()
    }

    /// All values defined in one scope's file.
    #[must_use]
    pub fn values_in_scope(&self, scope: Scope) -> BTreeMap<String, String> {
        self.scope_doc(scope).unwrap_or_default()
    }

    /// Set a key in one named scope's file. Other scopes are untouched.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for an empty value, `NoProject` when the
    /// project scope is unavailable, or `Io` on write failure.
    pub fn set_value(&self, key: ConfigKey, value: &str, scope: Scope) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(LnrError::validation(key.as_str(), "value cannot be empty"));
        }

        let path = self.workspace.config_path(scope)?;
        let mut doc: ConfigDoc = docstore::load_or_default(&path);
        doc.insert(key.as_str().to_string(), value.to_string());
        docstore::save(&path, &doc)
    }

    /// Remove a key from one named scope's file.
    ///
    /// Returns whether the key was present. Absence is not an error.
    ///
    /// # Errors
    ///
    /// Returns `NoProject` when the project scope is unavailable, or `Io`
    /// on write failure.
    pub fn unset_value(&self, key: ConfigKey, scope: Scope) -> Result<bool> {
        let path = self.workspace.config_path(scope)?;
        let mut doc: ConfigDoc = docstore::load_or_default(&path);
        let removed = doc.remove(key.as_str()).is_some();
        if removed {
            docstore::save(&path, &doc)?;
        }
        Ok(removed)
    }

    // Precedence scan with the env layer injected, so tests don't have to
    // mutate the process environment.
    fn effective_from(
        &self,
        key: ConfigKey,
        env_value: Option<String>,
    ) -> Option<(String, ConfigSource)> {
        if let Some(value) = env_value {
            return Some((value, ConfigSource::Env));
        }
        for scope in Scope::PRECEDENCE {
            if let Some(value) = self.get_in_scope(key, scope) {
                let source = match scope {
                    Scope::Project => ConfigSource::Project,
                    Scope::Global => ConfigSource::Global,
                };
                return Some((value, source));
            }
        }
        None
    }

    fn scope_doc(&self, scope: Scope) -> Option<ConfigDoc> {
        let path = self.workspace.config_path(scope).ok()?;
        Some(docstore::load_or_default(&path))
    }
}
