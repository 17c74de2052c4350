//! `lnr cache` - inspect and clear the persistent entity cache.

use anyhow::Result;

use lnr_lib::model::EntityType;
use lnr_lib::{PersistentCache, Workspace};

use crate::cli::CacheClearArgs;
use crate::format;

pub fn status(json: bool) -> Result<()> {
    let workspace = Workspace::discover()?;
    let cache = PersistentCache::new(workspace);

    let lines = cache.status();
    if json {
        return format::print_json(&lines);
    }
    for line in &lines {
        println!("{}", format::format_cache_status_line(line));
    }
    Ok(())
}

pub fn clear(args: &CacheClearArgs) -> Result<()> {
    let entity_type = args
        .entity_type
        .as_deref()
        .map(str::parse::<EntityType>)
        .transpose()?;
    let workspace = Workspace::discover()?;
    let cache = PersistentCache::new(workspace);

    cache.clear(entity_type)?;
    match entity_type {
        Some(ty) => println!("Cleared {} cache", ty.as_str()),
        None => println!("Cleared all caches"),
    }
    Ok(())
}
