//! `lnr alias` - add, remove, list and sync aliases.

use anyhow::{Context, Result};
use serde_json::json;

use lnr_lib::model::{EntityType, Scope};
use lnr_lib::sync::{self, SyncOptions};
use lnr_lib::{AliasStore, ConfigStore, RemoteClient, Workspace};

use crate::cli::{AliasAddArgs, AliasListArgs, AliasRemoveArgs, AliasSyncArgs};
use crate::client::LinearClient;
use crate::format;

const fn target_scope(global: bool) -> Scope {
    if global { Scope::Global } else { Scope::Project }
}

pub fn add(args: &AliasAddArgs, json: bool) -> Result<()> {
    let entity_type: EntityType = args.entity_type.parse()?;
    let scope = target_scope(args.global);
    let workspace = Workspace::discover()?;
    let store = AliasStore::new(workspace);

    store.add(entity_type, &args.alias, &args.id, scope, args.force)?;

    if json {
        format::print_json(&json!({
            "entity_type": entity_type,
            "alias": lnr_lib::alias::normalize(&args.alias),
            "id": args.id,
            "scope": scope,
        }))?;
    } else {
        println!(
            "Added {scope} alias '{alias}' -> {id}",
            scope = scope.as_str(),
            alias = lnr_lib::alias::normalize(&args.alias),
            id = args.id,
        );
    }
    Ok(())
}

pub fn remove(args: &AliasRemoveArgs) -> Result<()> {
    let entity_type: EntityType = args.entity_type.parse()?;
    let scope = target_scope(args.global);
    let workspace = Workspace::discover()?;
    let store = AliasStore::new(workspace);

    store.remove(entity_type, &args.alias, scope)?;
    println!(
        "Removed {scope} alias '{alias}'",
        scope = scope.as_str(),
        alias = lnr_lib::alias::normalize(&args.alias),
    );
    Ok(())
}

pub fn list(args: &AliasListArgs, json: bool) -> Result<()> {
    let entity_type = args
        .entity_type
        .as_deref()
        .map(str::parse::<EntityType>)
        .transpose()?;
    let workspace = Workspace::discover()?;
    let store = AliasStore::new(workspace);

    let entries = store.entries(entity_type);
    if json {
        return format::print_json(&entries);
    }

    if entries.is_empty() {
        println!("No aliases stored.");
        return Ok(());
    }
    for entry in &entries {
        println!("{}", format::format_alias_line(entry));
    }
    Ok(())
}

pub fn sync(args: &AliasSyncArgs, json: bool) -> Result<()> {
    let entity_type: EntityType = args.entity_type.parse()?;
    let scope = target_scope(args.global);
    let workspace = Workspace::discover()?;
    let config = ConfigStore::new(workspace.clone());
    let store = AliasStore::new(workspace);

    let client = LinearClient::from_config(&config);
    let entities = client
        .list_all(entity_type)
        .with_context(|| format!("Failed to list {} entities", entity_type.as_str()))?;

    let opts = SyncOptions {
        force: args.force,
        dry_run: args.dry_run,
        auto_suffix: !args.no_suffix,
    };
    let report = sync::sync(&store, entity_type, &entities, scope, opts)?;

    if json {
        format::print_json(&report)?;
    } else {
        print!("{}", format::format_sync_report(&report, args.dry_run));
    }
    Ok(())
}
