//! `lnr resolve` - turn an alias, name or raw id into a remote identifier.

use anyhow::Result;

use lnr_lib::model::EntityType;
use lnr_lib::resolver::{ResolveOptions, Resolver};
use lnr_lib::{AliasStore, ConfigStore, PersistentCache, SessionCache, Workspace};

use crate::cli::ResolveArgs;
use crate::client::LinearClient;
use crate::format;

pub fn execute(args: &ResolveArgs, json: bool) -> Result<()> {
    let entity_type: EntityType = args.entity_type.parse()?;
    let workspace = Workspace::discover()?;

    let config = ConfigStore::new(workspace.clone());
    let aliases = AliasStore::new(workspace.clone());
    let persistent = PersistentCache::new(workspace);
    let mut session = SessionCache::new();
    let client = LinearClient::from_config(&config);

    let opts = ResolveOptions {
        team_scope: args.team.clone(),
    };
    let mut resolver = Resolver::new(&aliases, &mut session, &persistent, &client);
    let resolution = resolver.resolve(entity_type, &args.token, &opts)?;

    if json {
        format::print_json(&resolution)?;
    } else {
        println!("{}", format::format_resolution(&resolution));
    }
    Ok(())
}
