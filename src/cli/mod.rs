//! Command-line interface for `lnr`.
//!
//! This module provides the CLI parsing and command routing using clap.

pub mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::logging;

/// `lnr` - Linear workspace CLI.
#[derive(Parser, Debug)]
#[command(name = "lnr")]
#[command(
    author,
    version,
    about = "Linear workspace CLI: scoped aliases, config and entity caching",
    long_about = None,
    after_help = "Aliases and config live in two scopes: the project \
                  (.lnr/ in the repository) and the global user config \
                  directory. Project scope shadows global scope."
)]
pub struct Cli {
    /// Output format: text (default) or json
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a project workspace (.lnr/)
    Init,

    /// Manage aliases
    Alias(AliasCommand),

    /// Read/write configuration
    Config(ConfigCommand),

    /// Inspect or clear the persistent entity cache
    Cache(CacheCommand),

    /// Resolve a token (alias, name or id) to a remote identifier
    Resolve(ResolveArgs),

    /// Show version information
    Version,
}

#[derive(Args, Debug)]
pub struct AliasCommand {
    /// Alias subcommand
    #[command(subcommand)]
    pub command: AliasSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AliasSubcommand {
    /// Add an alias
    Add(AliasAddArgs),

    /// Remove an alias (alias: remove)
    #[command(alias = "remove")]
    Rm(AliasRemoveArgs),

    /// List stored aliases
    List(AliasListArgs),

    /// Derive aliases from remote entity names
    Sync(AliasSyncArgs),
}

#[derive(Args, Debug)]
pub struct AliasAddArgs {
    /// Entity type (team, initiative, project, member, ...)
    pub entity_type: String,

    /// Alias string (case-insensitive)
    pub alias: String,

    /// Remote identifier the alias maps to
    pub id: String,

    /// Store in the global scope instead of the project scope
    #[arg(long)]
    pub global: bool,

    /// Overwrite an existing alias in the target scope
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct AliasRemoveArgs {
    /// Entity type
    pub entity_type: String,

    /// Alias to remove
    pub alias: String,

    /// Remove from the global scope instead of the project scope
    #[arg(long)]
    pub global: bool,
}

#[derive(Args, Debug)]
pub struct AliasListArgs {
    /// Restrict to one entity type
    pub entity_type: Option<String>,
}

#[derive(Args, Debug)]
pub struct AliasSyncArgs {
    /// Entity type to sync
    pub entity_type: String,

    /// Write aliases to the global scope instead of the project scope
    #[arg(long)]
    pub global: bool,

    /// Re-assign entities that are already aliased (rename)
    #[arg(long)]
    pub force: bool,

    /// Compute the report without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Skip colliding slugs instead of suffixing them with -2, -3, ...
    #[arg(long)]
    pub no_suffix: bool,
}

#[derive(Args, Debug)]
pub struct ConfigCommand {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print a key's effective value and which scope supplies it
    Get(ConfigGetArgs),

    /// Set a key in one scope
    Set(ConfigSetArgs),

    /// Remove a key from one scope
    Unset(ConfigUnsetArgs),

    /// List effective values for every key
    List,
}

#[derive(Args, Debug)]
pub struct ConfigGetArgs {
    /// Config key (api_token, default_team, ...)
    pub key: String,
}

#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Config key
    pub key: String,

    /// Value to store
    pub value: String,

    /// Write to the global scope instead of the project scope
    #[arg(long)]
    pub global: bool,
}

#[derive(Args, Debug)]
pub struct ConfigUnsetArgs {
    /// Config key
    pub key: String,

    /// Remove from the global scope instead of the project scope
    #[arg(long)]
    pub global: bool,
}

#[derive(Args, Debug)]
pub struct CacheCommand {
    /// Cache subcommand
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CacheSubcommand {
    /// Show per-type cache freshness
    Status,

    /// Drop cached entity listings (one type, or all)
    Clear(CacheClearArgs),
}

#[derive(Args, Debug)]
pub struct CacheClearArgs {
    /// Entity type to clear; omit to clear everything
    pub entity_type: Option<String>,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Entity type
    pub entity_type: String,

    /// Alias, display name or raw identifier
    pub token: String,

    /// Restrict name matching to one team id (for team-scoped types)
    #[arg(long)]
    pub team: Option<String>,
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    match cli.command {
        Some(Commands::Init) => commands::init::execute(),
        Some(Commands::Alias(alias)) => match alias.command {
            AliasSubcommand::Add(args) => commands::alias::add(&args, cli.json),
            AliasSubcommand::Rm(args) => commands::alias::remove(&args),
            AliasSubcommand::List(args) => commands::alias::list(&args, cli.json),
            AliasSubcommand::Sync(args) => commands::alias::sync(&args, cli.json),
        },
        Some(Commands::Config(config)) => match config.command {
            ConfigSubcommand::Get(args) => commands::config::get(&args, cli.json),
            ConfigSubcommand::Set(args) => commands::config::set(&args),
            ConfigSubcommand::Unset(args) => commands::config::unset(&args),
            ConfigSubcommand::List => commands::config::list(cli.json),
        },
        Some(Commands::Cache(cache)) => match cache.command {
            CacheSubcommand::Status => commands::cache::status(cli.json),
            CacheSubcommand::Clear(args) => commands::cache::clear(&args),
        },
        Some(Commands::Resolve(args)) => commands::resolve::execute(&args, cli.json),
        Some(Commands::Version) => {
            println!("lnr {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        None => {
            println!("lnr - Linear workspace CLI. Use --help for usage.");
            Ok(())
        }
    }
}
