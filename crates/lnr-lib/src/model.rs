//! Core data types for lnr-lib.
//!
//! Closed enums for entity types, scopes and config keys, plus the
//! `Entity` record shape shared by the alias sync, the caches and the
//! resolver. Unknown remote fields ride along in `extra` so cache
//! documents round-trip without loss.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LnrError;

/// Remote object categories tracked independently by the alias and
/// cache system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityType {
    Team,
    Initiative,
    Project,
    Member,
    IssueLabel,
    ProjectLabel,
    WorkflowState,
    ProjectTemplate,
    IssueTemplate,
    ProjectStatus,
}

impl EntityType {
    /// All entity types, in stable display order.
    pub const ALL: [Self; 10] = [
        Self::Team,
        Self::Initiative,
        Self::Project,
        Self::Member,
        Self::IssueLabel,
        Self::ProjectLabel,
        Self::WorkflowState,
        Self::ProjectTemplate,
        Self::IssueTemplate,
        Self::ProjectStatus,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Team => "team",
            Self::Initiative => "initiative",
            Self::Project => "project",
            Self::Member => "member",
            Self::IssueLabel => "issue-label",
            Self::ProjectLabel => "project-label",
            Self::WorkflowState => "workflow-state",
            Self::ProjectTemplate => "project-template",
            Self::IssueTemplate => "issue-template",
            Self::ProjectStatus => "project-status",
        }
    }

    /// Default persistent-cache TTL in seconds, or `None` for types that
    /// are never written to the persistent tier.
    #[must_use]
    pub const fn cache_ttl_seconds(self) -> Option<u64> {
        match self {
            Self::Team | Self::Initiative | Self::Member => Some(24 * 60 * 60),
            Self::WorkflowState | Self::ProjectTemplate | Self::IssueTemplate => Some(6 * 60 * 60),
            Self::Project | Self::IssueLabel | Self::ProjectLabel | Self::ProjectStatus => None,
        }
    }

    #[must_use]
    pub const fn is_cacheable(self) -> bool {
        self.cache_ttl_seconds().is_some()
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = LnrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "team" | "teams" => Ok(Self::Team),
            "initiative" | "initiatives" => Ok(Self::Initiative),
            "project" | "projects" => Ok(Self::Project),
            "member" | "members" | "user" | "users" => Ok(Self::Member),
            "issue-label" | "issue-labels" | "label" | "labels" => Ok(Self::IssueLabel),
            "project-label" | "project-labels" => Ok(Self::ProjectLabel),
            "workflow-state" | "workflow-states" | "state" | "states" => Ok(Self::WorkflowState),
            "project-template" | "project-templates" => Ok(Self::ProjectTemplate),
            "issue-template" | "issue-templates" | "template" | "templates" => {
                Ok(Self::IssueTemplate)
            }
            "project-status" | "project-statuses" => Ok(Self::ProjectStatus),
            other => Err(LnrError::UnknownEntityType {
                value: other.to_string(),
            }),
        }
    }
}

/// Storage tier an alias or config value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Repository-local (`.lnr/` in the project root).
    Project,
    /// User-wide (XDG config dir).
    Global,
}

impl Scope {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Global => "global",
        }
    }

    /// Lookup order: project shadows global.
    pub const PRECEDENCE: [Self; 2] = [Self::Project, Self::Global];
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Scope {
    type Err = LnrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "project" | "local" => Ok(Self::Project),
            "global" | "user" => Ok(Self::Global),
            other => Err(LnrError::UnknownScope {
                value: other.to_string(),
            }),
        }
    }
}

/// Closed set of string-valued configuration settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigKey {
    ApiToken,
    DefaultTeam,
    DefaultInitiative,
    DefaultProjectTemplate,
    DefaultIssueTemplate,
}

impl ConfigKey {
    pub const ALL: [Self; 5] = [
        Self::ApiToken,
        Self::DefaultTeam,
        Self::DefaultInitiative,
        Self::DefaultProjectTemplate,
        Self::DefaultIssueTemplate,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApiToken => "api_token",
            Self::DefaultTeam => "default_team",
            Self::DefaultInitiative => "default_initiative",
            Self::DefaultProjectTemplate => "default_project_template",
            Self::DefaultIssueTemplate => "default_issue_template",
        }
    }

    /// Environment variable that overrides both config scopes.
    #[must_use]
    pub const fn env_var(self) -> &'static str {
        match self {
            Self::ApiToken => "LNR_API_TOKEN",
            Self::DefaultTeam => "LNR_DEFAULT_TEAM",
            Self::DefaultInitiative => "LNR_DEFAULT_INITIATIVE",
            Self::DefaultProjectTemplate => "LNR_DEFAULT_PROJECT_TEMPLATE",
            Self::DefaultIssueTemplate => "LNR_DEFAULT_ISSUE_TEMPLATE",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = LnrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "api_token" | "token" => Ok(Self::ApiToken),
            "default_team" => Ok(Self::DefaultTeam),
            "default_initiative" => Ok(Self::DefaultInitiative),
            "default_project_template" => Ok(Self::DefaultProjectTemplate),
            "default_issue_template" => Ok(Self::DefaultIssueTemplate),
            other => Err(LnrError::UnknownConfigKey {
                value: other.to_string(),
            }),
        }
    }
}

/// Which layer supplied an effective config value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    /// Environment variable override.
    Env,
    /// Project-scope file.
    Project,
    /// Global-scope file.
    Global,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Env => "env",
            Self::Project => "project",
            Self::Global => "global",
        };
        write!(f, "{s}")
    }
}

/// A remote entity as listed by the collaborator client.
///
/// Only `id` and `name` are interpreted by the core; everything else the
/// remote returned is preserved in `extra` (e.g. `teamId` for workflow
/// states, `key` for teams, `email` for members).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Entity {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Entity {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Team the entity belongs to, when the remote reported one.
    #[must_use]
    pub fn team_id(&self) -> Option<&str> {
        self.extra.get("teamId").and_then(serde_json::Value::as_str)
    }
}

/// Current UTC timestamp. Single call site for easier reasoning in tests.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Whether a token already has the shape of a raw Linear identifier.
///
/// Linear ids are v4 UUIDs for every entity type the tool tracks, so the
/// entity-type-specific predicate collapses to one hyphenated-hex check.
/// Existence is deliberately not validated here.
#[must_use]
pub fn looks_like_uuid(token: &str) -> bool {
    let groups: Vec<&str> = token.split('-').collect();
    if groups.len() != 5 {
        return false;
    }
    let lens = [8, 4, 4, 4, 12];
    groups
        .iter()
        .zip(lens)
        .all(|(g, len)| g.len() == len && g.chars().all(|c| c.is_ascii_hexdigit()))
}
