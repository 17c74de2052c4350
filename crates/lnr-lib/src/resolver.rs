//! Token resolution: alias, raw identifier, or cached name lookup.
//!
//! Composition root over the alias store, both cache tiers and the
//! remote client. Strategies run in order and the first success wins;
//! the winning strategy is reported so commands can explain themselves.

use serde::Serialize;
use std::fmt;

use crate::alias::AliasStore;
use crate::cache::{PersistentCache, SessionCache};
use crate::error::{LnrError, Result};
use crate::model::{Entity, EntityType, looks_like_uuid};
use crate::remote::RemoteClient;

/// Which strategy produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedBy {
    /// Alias store hit.
    Alias,
    /// Token already shaped like a raw identifier; accepted without
    /// existence validation.
    Literal,
    /// Display-name match against a cache tier.
    Cache,
    /// Display-name match that required a remote fetch.
    Name,
}

impl fmt::Display for ResolvedBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Alias => "alias",
            Self::Literal => "literal",
            Self::Cache => "cache",
            Self::Name => "name",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub id: String,
    pub resolved_by: ResolvedBy,
    /// Display name, when the winning strategy had one at hand.
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Restrict name matching to entities belonging to this team id
    /// (workflow states and templates are team-scoped).
    pub team_scope: Option<String>,
}

/// Where a listing came from, for `resolved_by` reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListOrigin {
    Cache,
    Remote,
}

pub struct Resolver<'a, C: RemoteClient> {
    aliases: &'a AliasStore,
    session: &'a mut SessionCache,
    persistent: &'a PersistentCache,
    client: &'a C,
}

impl<'a, C: RemoteClient> Resolver<'a, C> {
    #[must_use]
    pub fn new(
        aliases: &'a AliasStore,
        session: &'a mut SessionCache,
        persistent: &'a PersistentCache,
        client: &'a C,
    ) -> Self {
        Self {
            aliases,
            session,
            persistent,
            client,
        }
    }

    /// Resolve a user-supplied token to a remote identifier.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no strategy matches, `Ambiguous` when a
    /// name matches more than one entity, or `Remote` propagated from
    /// the collaborator.
    pub fn resolve(
        &mut self,
        entity_type: EntityType,
        token: &str,
        opts: &ResolveOptions,
    ) -> Result<Resolution> {
        // 1. Alias lookup, project scope shadowing global.
        if let Some(hit) = self.aliases.resolve(entity_type, token) {
            return Ok(Resolution {
                id: hit.id,
                resolved_by: ResolvedBy::Alias,
                name: None,
            });
        }

        // 2. Raw identifier shape: accept literally. Existence checks
        // are the caller's business, via the remote client.
        if looks_like_uuid(token) {
            return Ok(Resolution {
                id: token.to_string(),
                resolved_by: ResolvedBy::Literal,
                name: None,
            });
        }

        // 3. Cache-backed name lookup.
        let (entities, origin) = self.list_entities(entity_type)?;
        let candidates: Vec<&Entity> = entities
            .iter()
            .filter(|entity| match &opts.team_scope {
                Some(team) => entity.team_id() == Some(team.as_str()),
                None => true,
            })
            .collect();

        let resolved_by = match origin {
            ListOrigin::Cache => ResolvedBy::Cache,
            ListOrigin::Remote => ResolvedBy::Name,
        };
        match_name(entity_type, token, &candidates).map(|entity| Resolution {
            id: entity.id.clone(),
            resolved_by,
            name: Some(entity.name.clone()),
        })
    }

    /// Session tier, then fresh persistent tier, then the remote;
    /// populates both tiers on a successful fetch.
    fn list_entities(&mut self, entity_type: EntityType) -> Result<(Vec<Entity>, ListOrigin)> {
        if let Some(entities) = self.session.get(entity_type) {
            return Ok((entities.to_vec(), ListOrigin::Cache));
        }

        if entity_type.is_cacheable() {
            if let Some(entry) = self.persistent.read(entity_type) {
                if entry.is_fresh() {
                    self.session.put(entity_type, entry.entities.clone());
                    return Ok((entry.entities, ListOrigin::Cache));
                }
            }
        }

        let entities = self.client.list_all(entity_type)?;
        self.session.put(entity_type, entities.clone());
        if let Some(ttl) = entity_type.cache_ttl_seconds() {
            // Cache bookkeeping is best-effort; a failed write must not
            // fail the resolution that fetched the data.
            if let Err(e) = self.persistent.write(entity_type, &entities, ttl) {
                tracing::warn!(entity_type = %entity_type, error = %e, "persistent cache write failed");
            }
        }
        Ok((entities, ListOrigin::Remote))
    }
}

/// Case-insensitive exact match first; on zero exact hits, prefix match.
/// More than one hit at either stage is ambiguous, never a guess.
fn match_name<'e>(
    entity_type: EntityType,
    token: &str,
    candidates: &[&'e Entity],
) -> Result<&'e Entity> {
    let needle = token.trim().to_lowercase();

    let exact: Vec<&Entity> = candidates
        .iter()
        .copied()
        .filter(|entity| entity.name.to_lowercase() == needle)
        .collect();
    match exact.len() {
        1 => return Ok(exact[0]),
        0 => {}
        _ => {
            return Err(LnrError::Ambiguous {
                entity_type,
                token: token.to_string(),
                matches: exact.iter().map(|e| e.id.clone()).collect(),
            });
        }
    }

    let prefixed: Vec<&Entity> = candidates
        .iter()
        .copied()
        .filter(|entity| entity.name.to_lowercase().starts_with(&needle))
        .collect();
    match prefixed.len() {
        1 => Ok(prefixed[0]),
        0 => Err(LnrError::NotFound {
            entity_type,
            token: token.to_string(),
        }),
        _ => Err(LnrError::Ambiguous {
            entity_type,
            token: token.to_string(),
            matches: prefixed.iter().map(|e| e.name.clone()).collect(),
        }),
    }
}
