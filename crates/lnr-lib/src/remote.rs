//! Boundary to the remote collaborator.
//!
//! The core treats the remote purely as a data source: no retries, no
//! timeout policy, failures surfaced verbatim as `LnrError::Remote`. The
//! trait is blocking — the tool runs one command to completion and exits.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Entity, EntityType};

/// Result of an existence check for a raw identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExistsCheck {
    pub valid: bool,
    pub name: Option<String>,
}

/// Remote entity CRUD surface the core consumes.
pub trait RemoteClient {
    /// List every entity of one type, in the remote's listing order
    /// (not guaranteed sorted; the sync engine relies on the order being
    /// whatever the remote returned).
    ///
    /// # Errors
    ///
    /// Returns `Remote` when the collaborator cannot be reached or
    /// rejects the request.
    fn list_all(&self, entity_type: EntityType) -> Result<Vec<Entity>>;

    /// Check that a raw identifier exists, returning its display name
    /// when it does.
    ///
    /// # Errors
    ///
    /// Returns `Remote` when the collaborator cannot be reached or
    /// rejects the request.
    fn validate_exists(&self, entity_type: EntityType, id: &str) -> Result<ExistsCheck>;
}
