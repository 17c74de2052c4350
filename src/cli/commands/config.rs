//! `lnr config` - layered configuration.

use anyhow::Result;
use serde_json::json;

use lnr_lib::model::{ConfigKey, Scope};
use lnr_lib::{ConfigStore, Workspace};

use crate::cli::{ConfigGetArgs, ConfigSetArgs, ConfigUnsetArgs};
use crate::format;

const fn target_scope(global: bool) -> Scope {
    if global { Scope::Global } else { Scope::Project }
}

pub fn get(args: &ConfigGetArgs, json: bool) -> Result<()> {
    let key: ConfigKey = args.key.parse()?;
    let workspace = Workspace::discover()?;
    let store = ConfigStore::new(workspace);

    let effective = store.get_effective(key);
    if json {
        return format::print_json(&json!({
            "key": key,
            "value": effective.as_ref().map(|(v, _)| v),
            "source": effective.as_ref().map(|(_, s)| s),
        }));
    }

    match effective {
        Some((value, source)) => println!("{value}  ({source})"),
        None => println!("{key} is not set"),
    }
    Ok(())
}

pub fn set(args: &ConfigSetArgs) -> Result<()> {
    let key: ConfigKey = args.key.parse()?;
    let scope = target_scope(args.global);
    let workspace = Workspace::discover()?;
    let store = ConfigStore::new(workspace);

    store.set_value(key, &args.value, scope)?;
    println!("Set {key} in {scope} scope");
    Ok(())
}

pub fn unset(args: &ConfigUnsetArgs) -> Result<()> {
    let key: ConfigKey = args.key.parse()?;
    let scope = target_scope(args.global);
    let workspace = Workspace::discover()?;
    let store = ConfigStore::new(workspace);

    if store.unset_value(key, scope)? {
        println!("Unset {key} in {scope} scope");
    } else {
        println!("{key} was not set in {scope} scope");
    }
    Ok(())
}

pub fn list(json: bool) -> Result<()> {
    let workspace = Workspace::discover()?;
    let store = ConfigStore::new(workspace);

    if json {
        let entries: Vec<_> = ConfigKey::ALL
            .iter()
            .map(|&key| {
                let effective = store.get_effective(key);
                json!({
                    "key": key,
                    "value": effective.as_ref().map(|(v, _)| v),
                    "source": effective.as_ref().map(|(_, s)| s),
                })
            })
            .collect();
        return format::print_json(&entries);
    }

    for key in ConfigKey::ALL {
        match store.get_effective(key) {
            Some((value, source)) => {
                // Never echo credentials back in full.
                let shown = if key == ConfigKey::ApiToken {
                    mask(&value)
                } else {
                    value
                };
                println!("{key:<26} {shown}  ({source})");
            }
            None => println!("{key:<26} (not set)"),
        }
    }
    Ok(())
}

fn mask(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 8 {
        return "********".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}****{tail}")
}
