//! Two-tier entity cache.
//!
//! Session tier: in-process map, no TTL, valid for the process lifetime,
//! always consulted first (cheapest). Persistent tier: one JSON document
//! per entity type under the cache dir, each with its own fetch timestamp
//! and TTL so clearing or refreshing one type never perturbs another.
//! Stale entries are not deleted, only treated as a miss and silently
//! replaced on the next successful fetch. Corruption degrades to a cold
//! cache, never a failure.

use std::collections::HashMap;
use std::fs;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::docstore;
use crate::error::Result;
use crate::model::{Entity, EntityType, now};
use crate::workspace::Workspace;

/// One persistent-tier document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub fetched_at: DateTime<Utc>,
    pub ttl_seconds: u64,
    pub entities: Vec<Entity>,
}

impl CacheEntry {
    /// Fresh iff `now - fetched_at < ttl_seconds`. A zero TTL is never
    /// fresh.
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.is_fresh_at(now())
    }

    fn is_fresh_at(&self, at: DateTime<Utc>) -> bool {
        if self.ttl_seconds == 0 {
            return false;
        }
        // A negative age (fetched_at in the future) fails the conversion
        // and is treated as stale.
        u64::try_from((at - self.fetched_at).num_seconds())
            .is_ok_and(|age| age < self.ttl_seconds)
    }
}

/// In-process cache tier. Purely additive; cleared only explicitly or by
/// process exit.
#[derive(Debug, Default)]
pub struct SessionCache {
    entries: HashMap<EntityType, Vec<Entity>>,
}

impl SessionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, entity_type: EntityType) -> Option<&[Entity]> {
        self.entries.get(&entity_type).map(Vec::as_slice)
    }

    pub fn put(&mut self, entity_type: EntityType, entities: Vec<Entity>) {
        self.entries.insert(entity_type, entities);
    }

    /// Clear one entity type, or everything when `None`.
    pub fn clear(&mut self, entity_type: Option<EntityType>) {
        match entity_type {
            Some(ty) => {
                self.entries.remove(&ty);
            }
            None => self.entries.clear(),
        }
    }
}

/// On-disk cache tier, one document per entity type.
pub struct PersistentCache {
    workspace: Workspace,
}

impl PersistentCache {
    #[must_use]
    pub fn new(workspace: Workspace) -> Self {
        Self { workspace }
    }

    /// Read one type's entry. Missing or corrupt files are a miss; the
    /// caller is expected to refetch and `write` the result.
    #[must_use]
    pub fn read(&self, entity_type: EntityType) -> Option<CacheEntry> {
        docstore::load_optional(&self.workspace.cache_path(entity_type))
    }

    /// Overwrite one type's entry with a fresh fetch result.
    ///
    /// # Errors
    ///
    /// Returns `Io` on write failure.
    pub fn write(&self, entity_type: EntityType, entities: &[Entity], ttl_seconds: u64) -> Result<()> {
        let entry = CacheEntry {
            fetched_at: now(),
            ttl_seconds,
            entities: entities.to_vec(),
        };
        tracing::debug!(entity_type = %entity_type, count = entities.len(), "persistent cache write");
        docstore::save(&self.workspace.cache_path(entity_type), &entry)
    }

    /// Remove one type's document, or every type's when `None`. Missing
    /// files are fine.
    ///
    /// # Errors
    ///
    /// Returns `Io` on removal failure other than absence.
    pub fn clear(&self, entity_type: Option<EntityType>) -> Result<()> {
        let types: Vec<EntityType> = match entity_type {
            Some(ty) => vec![ty],
            None => EntityType::ALL.to_vec(),
        };
        for ty in types {
            match fs::remove_file(self.workspace.cache_path(ty)) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Per-type summary for `lnr cache status`.
    #[must_use]
    pub fn status(&self) -> Vec<CacheStatusLine> {
        EntityType::ALL
            .into_iter()
            .filter(|ty| ty.is_cacheable())
            .map(|ty| {
                let entry = self.read(ty);
                CacheStatusLine {
                    entity_type: ty,
                    fresh: entry.as_ref().is_some_and(CacheEntry::is_fresh),
                    fetched_at: entry.as_ref().map(|e| e.fetched_at),
                    entity_count: entry.as_ref().map(|e| e.entities.len()),
                    ttl_seconds: entry.map(|e| e.ttl_seconds),
                }
            })
            .collect()
    }
}

/// One line of `lnr cache status` output.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatusLine {
    pub entity_type: EntityType,
    pub fresh: bool,
    pub fetched_at: Option<DateTime<Utc>>,
    pub entity_count: Option<usize>,
    pub ttl_seconds: Option<u64>,
}
