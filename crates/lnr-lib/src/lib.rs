//! `lnr-lib` — scoped aliases, layered config and entity caching for the
//! `lnr` CLI.
//!
//! The library knows nothing about HTTP or the terminal. It owns the
//! on-disk documents (config, aliases, per-type cache files) and the
//! resolution logic over them; the remote service is reached only
//! through the [`remote::RemoteClient`] trait.
//!
//! # Quick Start
//!
//! ```no_run
//! use lnr_lib::{AliasStore, Scope, Workspace};
//! use lnr_lib::model::EntityType;
//!
//! let ws = Workspace::discover().unwrap();
//! let aliases = AliasStore::new(ws);
//! aliases
//!     .add(EntityType::Team, "eng", "a1b2...", Scope::Global, false)
//!     .unwrap();
//! let hit = aliases.resolve(EntityType::Team, "eng").unwrap();
//! println!("{} (from {} scope)", hit.id, hit.scope);
//! ```

pub mod alias;
pub mod cache;
pub mod config;
pub mod docstore;
pub mod error;
pub mod model;
pub mod remote;
pub mod resolver;
pub mod slug;
pub mod sync;
pub mod workspace;

pub use alias::{AliasEntry, AliasHit, AliasStore};
pub use cache::{CacheEntry, PersistentCache, SessionCache};
pub use config::ConfigStore;
pub use error::{LnrError, Result};
pub use model::{ConfigKey, ConfigSource, Entity, EntityType, Scope};
pub use remote::{ExistsCheck, RemoteClient};
pub use resolver::{Resolution, ResolvedBy, Resolver};
pub use slug::slugify;
pub use sync::{SyncOptions, SyncReport};
pub use workspace::Workspace;
