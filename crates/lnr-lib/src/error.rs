//! Error types for `lnr-lib`.
//!
//! Conflict, NotFound and Ambiguous are structured so that the CLI can
//! render specific remediation text. Corrupt on-disk documents are never
//! surfaced here at all — they degrade to empty/cold stores with a warning.

use std::path::PathBuf;
use thiserror::Error;

use crate::model::{EntityType, Scope};

/// Primary error type for lnr-lib operations.
#[derive(Error, Debug)]
pub enum LnrError {
    // === Alias Errors ===
    /// Alias already exists in the target scope and overwrite was not allowed.
    #[error(
        "Alias '{alias}' already exists for {entity_type} in {scope} scope \
         (maps to {existing_id}); pass --force to overwrite"
    )]
    AliasConflict {
        entity_type: EntityType,
        alias: String,
        scope: Scope,
        existing_id: String,
    },

    /// Alias not present in the named scope.
    #[error("Alias '{alias}' not found for {entity_type} in {scope} scope")]
    AliasNotFound {
        entity_type: EntityType,
        alias: String,
        scope: Scope,
    },

    // === Resolution Errors ===
    /// No resolution strategy matched the token.
    #[error("No {entity_type} matching '{token}'")]
    NotFound { entity_type: EntityType, token: String },

    /// Name matched more than one entity.
    #[error("'{token}' is ambiguous: matches {matches:?}")]
    Ambiguous {
        entity_type: EntityType,
        token: String,
        matches: Vec<String>,
    },

    // === Validation Errors ===
    /// Field validation failed.
    #[error("Validation failed: {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Unknown entity type string.
    #[error("Unknown entity type: {value}")]
    UnknownEntityType { value: String },

    /// Unknown configuration key string.
    #[error("Unknown config key: {value}")]
    UnknownConfigKey { value: String },

    /// Unknown scope string.
    #[error("Unknown scope: {value}")]
    UnknownScope { value: String },

    // === Workspace Errors ===
    /// Project-scope operation outside a project workspace.
    #[error("Not inside a project workspace (no .lnr directory found); run 'lnr init'")]
    NoProject,

    /// A project workspace already exists at the path.
    #[error("Project workspace already initialized at {0}")]
    AlreadyInitialized(PathBuf),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    // === Remote Errors ===
    /// The remote collaborator could not be reached or rejected the request.
    /// Propagated verbatim; the core never retries.
    #[error("Remote error: {0}")]
    Remote(String),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LnrError {
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error is a structured result the CLI should render
    /// without a stack of context (conflict, not-found, ambiguous).
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::AliasConflict { .. }
                | Self::AliasNotFound { .. }
                | Self::NotFound { .. }
                | Self::Ambiguous { .. }
        )
    }
}

/// Result type using `LnrError`.
pub type Result<T> = std::result::Result<T, LnrError>;
