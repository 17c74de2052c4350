//! Layered alias store.
//!
//! One JSON document per scope, mapping entity type -> (alias -> id).
//! Lookup scans project scope first, then global; shadowing across
//! scopes is allowed by design and never merged. The reverse index
//! (id -> aliases) is derived by scanning the forward maps, never
//! persisted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::docstore;
use crate::error::{LnrError, Result};
use crate::model::{EntityType, Scope};
use crate::workspace::Workspace;

/// Forward map for one scope: entity type -> (alias -> id).
type AliasDoc = BTreeMap<String, BTreeMap<String, String>>;

/// Successful alias lookup, with the scope that supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasHit {
    pub id: String,
    pub scope: Scope,
}

/// One stored alias, as listed by `lnr alias list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    pub entity_type: EntityType,
    pub alias: String,
    pub id: String,
    pub scope: Scope,
}

pub struct AliasStore {
    workspace: Workspace,
}

/// Normalize an alias for storage and lookup: trimmed, lowercased.
#[must_use]
pub fn normalize(alias: &str) -> String {
    alias.trim().to_lowercase()
}

impl AliasStore {
    #[must_use]
    pub fn new(workspace: Workspace) -> Self {
        Self { workspace }
    }

    /// Resolve an alias, project scope first. First hit wins.
    #[must_use]
    pub fn resolve(&self, entity_type: EntityType, alias: &str) -> Option<AliasHit> {
        let alias = normalize(alias);
        for scope in Scope::PRECEDENCE {
            if let Some(id) = self
                .scope_aliases(entity_type, scope)
                .get(&alias)
            {
                return Some(AliasHit {
                    id: id.clone(),
                    scope,
                });
            }
        }
        None
    }

    /// Add an alias to one scope.
    ///
    /// Existence of the same alias in the *other* scope is not a
    /// conflict (shadowing), only in the target scope.
    ///
    /// # Errors
    ///
    /// Returns `AliasConflict` if the alias exists in the target scope
    /// and `allow_overwrite` is false, `Validation` for an empty alias,
    /// or `NoProject`/`Io` from the document layer.
    pub fn add(
        &self,
        entity_type: EntityType,
        alias: &str,
        id: &str,
        scope: Scope,
        allow_overwrite: bool,
    ) -> Result<()> {
        let alias = normalize(alias);
        if alias.is_empty() {
            return Err(LnrError::validation("alias", "cannot be empty"));
        }
        if id.trim().is_empty() {
            return Err(LnrError::validation("id", "cannot be empty"));
        }

        let path = self.workspace.alias_path(scope)?;
        let mut doc: AliasDoc = docstore::load_or_default(&path);
        let map = doc.entry(entity_type.as_str().to_string()).or_default();

        if !allow_overwrite {
            if let Some(existing_id) = map.get(&alias) {
                return Err(LnrError::AliasConflict {
                    entity_type,
                    alias,
                    scope,
                    existing_id: existing_id.clone(),
                });
            }
        }

        map.insert(alias, id.trim().to_string());
        docstore::save(&path, &doc)
    }

    /// Remove an alias from one scope.
    ///
    /// # Errors
    ///
    /// Returns `AliasNotFound` if the alias is absent in that scope.
    pub fn remove(&self, entity_type: EntityType, alias: &str, scope: Scope) -> Result<()> {
        let alias = normalize(alias);
        let path = self.workspace.alias_path(scope)?;
        let mut doc: AliasDoc = docstore::load_or_default(&path);

        let removed = doc
            .get_mut(entity_type.as_str())
            .is_some_and(|map| map.remove(&alias).is_some());
        if !removed {
            return Err(LnrError::AliasNotFound {
                entity_type,
                alias,
                scope,
            });
        }

        docstore::save(&path, &doc)
    }

    /// All aliases pointing at an id, across both scopes. Derived index:
    /// recomputed by scanning the forward maps.
    #[must_use]
    pub fn aliases_for(&self, entity_type: EntityType, id: &str) -> Vec<String> {
        let mut aliases: Vec<String> = Scope::PRECEDENCE
            .into_iter()
            .flat_map(|scope| {
                self.scope_aliases(entity_type, scope)
                    .into_iter()
                    .filter(|(_, target)| target == id)
                    .map(|(alias, _)| alias)
            })
            .collect();
        aliases.sort();
        aliases.dedup();
        aliases
    }

    /// List stored aliases, optionally filtered by entity type.
    /// Project entries come first, mirroring lookup precedence.
    #[must_use]
    pub fn entries(&self, entity_type: Option<EntityType>) -> Vec<AliasEntry> {
        let mut out = Vec::new();
        for scope in Scope::PRECEDENCE {
            for ty in EntityType::ALL {
                if entity_type.is_some_and(|want| want != ty) {
                    continue;
                }
                for (alias, id) in self.scope_aliases(ty, scope) {
                    out.push(AliasEntry {
                        entity_type: ty,
                        alias,
                        id,
                        scope,
                    });
                }
            }
        }
        out
    }

    /// Forward map of one entity type in one scope (already normalized
    /// on write; re-normalized here to tolerate hand-edited files).
    #[must_use]
    pub fn scope_aliases(&self, entity_type: EntityType, scope: Scope) -> BTreeMap<String, String> {
        let Ok(path) = self.workspace.alias_path(scope) else {
            return BTreeMap::new();
        };
        let doc: AliasDoc = docstore::load_or_default(&path);
        doc.get(entity_type.as_str())
            .map(|map| {
                map.iter()
                    .map(|(alias, id)| (normalize(alias), id.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Apply one sync batch to a scope as a single atomic document
    /// replace: removals first, then inserts.
    ///
    /// # Errors
    ///
    /// Returns `NoProject`/`Io` from the document layer.
    pub fn apply_batch(
        &self,
        entity_type: EntityType,
        scope: Scope,
        removals: &[String],
        inserts: &[(String, String)],
    ) -> Result<()> {
        if removals.is_empty() && inserts.is_empty() {
            return Ok(());
        }

        let path = self.workspace.alias_path(scope)?;
        let mut doc: AliasDoc = docstore::load_or_default(&path);
        let map = doc.entry(entity_type.as_str().to_string()).or_default();

        for alias in removals {
            map.remove(&normalize(alias));
        }
        for (alias, id) in inserts {
            map.insert(normalize(alias), id.clone());
        }

        docstore::save(&path, &doc)
    }

    /// Drop every alias in one scope.
    ///
    /// # Errors
    ///
    /// Returns `NoProject`/`Io` from the document layer.
    pub fn clear(&self, scope: Scope) -> Result<()> {
        let path = self.workspace.alias_path(scope)?;
        docstore::save(&path, &AliasDoc::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &std::path::Path) -> AliasStore {
        AliasStore::new(Workspace::at(
            dir.join("global"),
            Some(dir.join(".lnr")),
            dir.join("cache"),
        ))
    }

    #[test]
    fn test_add_and_resolve() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        store
            .add(EntityType::Team, "eng", "team-1", Scope::Global, false)
            .unwrap();
        let hit = store.resolve(EntityType::Team, "eng").unwrap();
        assert_eq!(hit.id, "team-1");
        assert_eq!(hit.scope, Scope::Global);
    }

    #[test]
    fn test_normalization_on_store_and_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        store
            .add(EntityType::Team, "  ENG  ", "team-1", Scope::Global, false)
            .unwrap();
        assert!(store.resolve(EntityType::Team, "eng").is_some());
        assert!(store.resolve(EntityType::Team, "Eng ").is_some());
    }

    #[test]
    fn test_project_shadows_global() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        store
            .add(EntityType::Team, "eng", "project-id", Scope::Project, false)
            .unwrap();
        store
            .add(EntityType::Team, "eng", "global-id", Scope::Global, false)
            .unwrap();

        let hit = store.resolve(EntityType::Team, "eng").unwrap();
        assert_eq!(hit.id, "project-id");
        assert_eq!(hit.scope, Scope::Project);
    }

    #[test]
    fn test_conflict_in_target_scope_only() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        store
            .add(EntityType::Team, "eng", "a", Scope::Global, false)
            .unwrap();

        // Same alias in the other scope is shadowing, not a conflict.
        store
            .add(EntityType::Team, "eng", "b", Scope::Project, false)
            .unwrap();

        // Same alias in the same scope is a conflict without overwrite.
        let err = store
            .add(EntityType::Team, "eng", "c", Scope::Global, false)
            .unwrap_err();
        assert!(matches!(err, LnrError::AliasConflict { .. }));

        // And succeeds with overwrite.
        store
            .add(EntityType::Team, "eng", "c", Scope::Global, true)
            .unwrap();
        assert_eq!(
            store.scope_aliases(EntityType::Team, Scope::Global)["eng"],
            "c"
        );
    }

    #[test]
    fn test_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        store
            .add(EntityType::Team, "eng", "a", Scope::Global, false)
            .unwrap();
        store.remove(EntityType::Team, "eng", Scope::Global).unwrap();
        assert!(store.resolve(EntityType::Team, "eng").is_none());

        let err = store
            .remove(EntityType::Team, "eng", Scope::Global)
            .unwrap_err();
        assert!(matches!(err, LnrError::AliasNotFound { .. }));
    }

    #[test]
    fn test_types_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        store
            .add(EntityType::Team, "design", "t1", Scope::Global, false)
            .unwrap();
        store
            .add(EntityType::Project, "design", "p1", Scope::Global, false)
            .unwrap();

        assert_eq!(store.resolve(EntityType::Team, "design").unwrap().id, "t1");
        assert_eq!(
            store.resolve(EntityType::Project, "design").unwrap().id,
            "p1"
        );
    }

    #[test]
    fn test_aliases_for_scans_both_scopes() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        store
            .add(EntityType::Team, "eng", "t1", Scope::Global, false)
            .unwrap();
        store
            .add(EntityType::Team, "engineering", "t1", Scope::Project, false)
            .unwrap();
        store
            .add(EntityType::Team, "other", "t2", Scope::Global, false)
            .unwrap();

        assert_eq!(store.aliases_for(EntityType::Team, "t1"), ["eng", "engineering"]);
    }

    #[test]
    fn test_corrupt_store_is_empty_and_recoverable() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        let path = dir.path().join("global").join("aliases.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json at all").unwrap();

        assert!(store.resolve(EntityType::Team, "eng").is_none());

        store
            .add(EntityType::Team, "eng", "t1", Scope::Global, false)
            .unwrap();
        assert_eq!(store.resolve(EntityType::Team, "eng").unwrap().id, "t1");
    }

    #[test]
    fn test_apply_batch_removes_then_inserts() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        store
            .add(EntityType::Team, "old-name", "t1", Scope::Global, false)
            .unwrap();
        store
            .apply_batch(
                EntityType::Team,
                Scope::Global,
                &["old-name".to_string()],
                &[("new-name".to_string(), "t1".to_string())],
            )
            .unwrap();

        assert!(store.resolve(EntityType::Team, "old-name").is_none());
        assert_eq!(store.resolve(EntityType::Team, "new-name").unwrap().id, "t1");
    }

    #[test]
    fn test_entries_project_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        store
            .add(EntityType::Team, "g", "t1", Scope::Global, false)
            .unwrap();
        store
            .add(EntityType::Team, "p", "t2", Scope::Project, false)
            .unwrap();

        let entries = store.entries(Some(EntityType::Team));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].scope, Scope::Project);
        assert_eq!(entries[1].scope, Scope::Global);
    }
}
