//! Alias synchronization: derive aliases from remote entity display names.
//!
//! The engine is deterministic for a given input order. Entities are
//! processed in the order the caller supplies (typically remote-listing
//! order); when two names slug identically, the entity seen first keeps
//! the unsuffixed slug and later ones get `-2`, `-3`, ... All writes of
//! one batch land in a single atomic document replace.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::alias::AliasStore;
use crate::error::Result;
use crate::model::{Entity, EntityType, Scope};
use crate::slug::slugify;

#[derive(Debug, Clone, Copy)]
pub struct SyncOptions {
    /// Re-assign entities that already have an alias in the destination
    /// scope, releasing their previous aliases.
    pub force: bool,
    /// Compute the full report without writing anything.
    pub dry_run: bool,
    /// Suffix colliding slugs with `-2`, `-3`, ... instead of skipping.
    pub auto_suffix: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            force: false,
            dry_run: false,
            auto_suffix: true,
        }
    }
}

/// Why an entity was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The `(entity type, id)` already has an alias in the destination
    /// scope and `force` was not set.
    AlreadyAliased,
    /// The slug collided and `auto_suffix` was disabled.
    DuplicateSlug,
    /// The display name contains no alphanumeric characters.
    EmptySlug,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::AlreadyAliased => "already aliased",
            Self::DuplicateSlug => "duplicate slug",
            Self::EmptySlug => "empty slug",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedAlias {
    pub alias: String,
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedEntity {
    pub id: String,
    pub name: String,
    pub reason: SkipReason,
}

/// A base-slug collision encountered during the batch, whether it was
/// then suffixed or skipped.
#[derive(Debug, Clone, Serialize)]
pub struct SlugConflict {
    pub slug: String,
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    pub created: Vec<CreatedAlias>,
    pub skipped: Vec<SkippedEntity>,
    pub conflicts: Vec<SlugConflict>,
}

impl SyncReport {
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.created.is_empty()
    }
}

/// Derive and store aliases for a batch of remote entities.
///
/// # Errors
///
/// Returns `NoProject`/`Io` from the alias store when the batch is
/// written; `dry_run` never writes and so never fails on I/O.
pub fn sync(
    store: &AliasStore,
    entity_type: EntityType,
    entities: &[Entity],
    scope: Scope,
    opts: SyncOptions,
) -> Result<SyncReport> {
    let existing = store.scope_aliases(entity_type, scope);

    let mut existing_by_id: HashMap<&str, Vec<&str>> = HashMap::new();
    for (alias, id) in &existing {
        existing_by_id.entry(id).or_default().push(alias);
    }

    let mut taken: HashSet<String> = existing.keys().cloned().collect();
    if opts.force {
        // Aliases owned by entities in this batch are about to be
        // re-assigned; treat them as free.
        let input_ids: HashSet<&str> = entities.iter().map(|e| e.id.as_str()).collect();
        taken.retain(|alias| {
            existing
                .get(alias)
                .is_none_or(|id| !input_ids.contains(id.as_str()))
        });
    }

    let mut report = SyncReport::default();
    let mut inserts: Vec<(String, String)> = Vec::new();
    let mut removals: Vec<String> = Vec::new();

    for entity in entities {
        if !opts.force && existing_by_id.contains_key(entity.id.as_str()) {
            report.skipped.push(SkippedEntity {
                id: entity.id.clone(),
                name: entity.name.clone(),
                reason: SkipReason::AlreadyAliased,
            });
            continue;
        }

        let base = slugify(&entity.name);
        if base.is_empty() {
            report.skipped.push(SkippedEntity {
                id: entity.id.clone(),
                name: entity.name.clone(),
                reason: SkipReason::EmptySlug,
            });
            continue;
        }

        let alias = if taken.contains(&base) {
            report.conflicts.push(SlugConflict {
                slug: base.clone(),
                id: entity.id.clone(),
                name: entity.name.clone(),
            });
            if !opts.auto_suffix {
                report.skipped.push(SkippedEntity {
                    id: entity.id.clone(),
                    name: entity.name.clone(),
                    reason: SkipReason::DuplicateSlug,
                });
                continue;
            }
            next_free(&base, &taken)
        } else {
            base
        };

        taken.insert(alias.clone());
        if opts.force {
            if let Some(previous) = existing_by_id.get(entity.id.as_str()) {
                removals.extend(
                    previous
                        .iter()
                        .filter(|prev| **prev != alias)
                        .map(|prev| (*prev).to_string()),
                );
            }
        }
        report.created.push(CreatedAlias {
            alias: alias.clone(),
            id: entity.id.clone(),
            name: entity.name.clone(),
        });
        inserts.push((alias, entity.id.clone()));
    }

    if !opts.dry_run {
        store.apply_batch(entity_type, scope, &removals, &inserts)?;
    }

    Ok(report)
}

/// First `{base}-{n}` (n starting at 2) not yet taken.
fn next_free(base: &str, taken: &HashSet<String>) -> String {
    let mut n = 2u32;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::Workspace;

    fn store(dir: &std::path::Path) -> AliasStore {
        AliasStore::new(Workspace::at(
            dir.join("global"),
            Some(dir.join(".lnr")),
            dir.join("cache"),
        ))
    }

    fn entities(pairs: &[(&str, &str)]) -> Vec<Entity> {
        pairs.iter().map(|(id, name)| Entity::new(*id, *name)).collect()
    }

    #[test]
    fn test_basic_sync_assigns_slugs() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        let input = entities(&[("t1", "Engineering"), ("t2", "Design System")]);

        let report = sync(
            &store,
            EntityType::Team,
            &input,
            Scope::Global,
            SyncOptions::default(),
        )
        .unwrap();

        assert_eq!(report.created.len(), 2);
        assert!(report.skipped.is_empty());
        assert_eq!(store.resolve(EntityType::Team, "engineering").unwrap().id, "t1");
        assert_eq!(
            store.resolve(EntityType::Team, "design-system").unwrap().id,
            "t2"
        );
    }

    #[test]
    fn test_resync_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        let input = entities(&[("t1", "Engineering"), ("t2", "Design")]);

        sync(&store, EntityType::Team, &input, Scope::Global, SyncOptions::default()).unwrap();
        let second = sync(
            &store,
            EntityType::Team,
            &input,
            Scope::Global,
            SyncOptions::default(),
        )
        .unwrap();

        assert!(second.created.is_empty());
        assert_eq!(second.skipped.len(), input.len());
        assert!(second
            .skipped
            .iter()
            .all(|s| s.reason == SkipReason::AlreadyAliased));
    }

    #[test]
    fn test_duplicate_slugs_suffix_in_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        // Distinct Unicode dashes, identical slugs.
        let input = entities(&[("a", "Design System"), ("b", "Design\u{2011}System")]);

        let report = sync(
            &store,
            EntityType::Project,
            &input,
            Scope::Global,
            SyncOptions::default(),
        )
        .unwrap();

        assert_eq!(report.created[0].alias, "design-system");
        assert_eq!(report.created[0].id, "a");
        assert_eq!(report.created[1].alias, "design-system-2");
        assert_eq!(report.created[1].id, "b");
        assert_eq!(report.conflicts.len(), 1);
        assert_eq!(report.conflicts[0].slug, "design-system");
    }

    #[test]
    fn test_suffixing_is_deterministic_across_reruns() {
        for _ in 0..3 {
            let dir = tempfile::tempdir().unwrap();
            let store = store(dir.path());
            let input = entities(&[("a", "Design System"), ("b", "Design\u{2011}System")]);
            let report = sync(
                &store,
                EntityType::Project,
                &input,
                Scope::Global,
                SyncOptions::default(),
            )
            .unwrap();
            assert_eq!(report.created[0].alias, "design-system");
            assert_eq!(report.created[1].alias, "design-system-2");
        }
    }

    #[test]
    fn test_no_suffix_skips_collision() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        let input = entities(&[("a", "Design System"), ("b", "Design\u{2011}System")]);

        let report = sync(
            &store,
            EntityType::Project,
            &input,
            Scope::Global,
            SyncOptions {
                auto_suffix: false,
                ..SyncOptions::default()
            },
        )
        .unwrap();

        assert_eq!(report.created.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].id, "b");
        assert_eq!(report.skipped[0].reason, SkipReason::DuplicateSlug);
        assert!(store.resolve(EntityType::Project, "design-system-2").is_none());
    }

    #[test]
    fn test_collision_with_existing_scope_alias() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        store
            .add(EntityType::Team, "engineering", "old", Scope::Global, false)
            .unwrap();

        let report = sync(
            &store,
            EntityType::Team,
            &entities(&[("t9", "Engineering")]),
            Scope::Global,
            SyncOptions::default(),
        )
        .unwrap();

        assert_eq!(report.created[0].alias, "engineering-2");
        // The pre-existing alias is untouched.
        assert_eq!(store.resolve(EntityType::Team, "engineering").unwrap().id, "old");
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let report = sync(
            &store,
            EntityType::Team,
            &entities(&[("t1", "Engineering")]),
            Scope::Global,
            SyncOptions {
                dry_run: true,
                ..SyncOptions::default()
            },
        )
        .unwrap();

        assert_eq!(report.created.len(), 1);
        assert!(store.resolve(EntityType::Team, "engineering").is_none());
    }

    #[test]
    fn test_force_renames_existing_alias() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        store
            .add(EntityType::Team, "old-name", "t1", Scope::Global, false)
            .unwrap();

        let report = sync(
            &store,
            EntityType::Team,
            &entities(&[("t1", "New Name")]),
            Scope::Global,
            SyncOptions {
                force: true,
                ..SyncOptions::default()
            },
        )
        .unwrap();

        assert_eq!(report.created[0].alias, "new-name");
        assert!(store.resolve(EntityType::Team, "old-name").is_none());
        assert_eq!(store.resolve(EntityType::Team, "new-name").unwrap().id, "t1");
    }

    #[test]
    fn test_force_keeps_unchanged_slug_stable() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        let input = entities(&[("t1", "Engineering")]);

        sync(&store, EntityType::Team, &input, Scope::Global, SyncOptions::default()).unwrap();
        let report = sync(
            &store,
            EntityType::Team,
            &input,
            Scope::Global,
            SyncOptions {
                force: true,
                ..SyncOptions::default()
            },
        )
        .unwrap();

        assert_eq!(report.created[0].alias, "engineering");
        assert_eq!(store.resolve(EntityType::Team, "engineering").unwrap().id, "t1");
    }

    #[test]
    fn test_unsluggable_name_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let report = sync(
            &store,
            EntityType::Team,
            &entities(&[("t1", "!!!")]),
            Scope::Global,
            SyncOptions::default(),
        )
        .unwrap();

        assert!(report.created.is_empty());
        assert_eq!(report.skipped[0].reason, SkipReason::EmptySlug);
    }
}
