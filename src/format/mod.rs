//! Output formatting for `lnr`.
//!
//! Every command renders either plain text lines or, with `--json`,
//! pretty-printed JSON of the same data on stdout.

use serde::Serialize;

use lnr_lib::alias::AliasEntry;
use lnr_lib::cache::CacheStatusLine;
use lnr_lib::resolver::Resolution;
use lnr_lib::sync::SyncReport;

/// Print any serializable value as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error on serialization failure.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format a single stored alias.
///
/// Format: `{type:<17} {alias:<28} {id}  ({scope})`
#[must_use]
pub fn format_alias_line(entry: &AliasEntry) -> String {
    format!(
        "{:<17} {:<28} {}  ({})",
        entry.entity_type, entry.alias, entry.id, entry.scope
    )
}

/// Format one `cache status` line.
#[must_use]
pub fn format_cache_status_line(line: &CacheStatusLine) -> String {
    match (&line.fetched_at, line.entity_count) {
        (Some(fetched_at), Some(count)) => {
            let state = if line.fresh { "fresh" } else { "stale" };
            format!(
                "{:<17} {:<6} {:>4} entities  fetched {}",
                line.entity_type,
                state,
                count,
                fetched_at.format("%Y-%m-%d %H:%M:%S UTC"),
            )
        }
        _ => format!("{:<17} empty", line.entity_type),
    }
}

/// Format a resolution result.
///
/// Format: `{id}  (resolved by {strategy})`
#[must_use]
pub fn format_resolution(resolution: &Resolution) -> String {
    match &resolution.name {
        Some(name) => format!(
            "{}  {}  (resolved by {})",
            resolution.id, name, resolution.resolved_by
        ),
        None => format!("{}  (resolved by {})", resolution.id, resolution.resolved_by),
    }
}

/// Render a sync report as text lines.
#[must_use]
pub fn format_sync_report(report: &SyncReport, dry_run: bool) -> String {
    let mut out = String::new();

    for created in &report.created {
        out.push_str(&format!(
            "+ {:<28} {}  ({})\n",
            created.alias, created.id, created.name
        ));
    }
    for skipped in &report.skipped {
        out.push_str(&format!(
            "- {:<28} {}  (skipped: {})\n",
            skipped.name, skipped.id, skipped.reason
        ));
    }

    let summary = format!(
        "{} created, {} skipped, {} slug conflict(s)",
        report.created.len(),
        report.skipped.len(),
        report.conflicts.len()
    );
    if dry_run {
        out.push_str(&format!("{summary} (dry run; nothing written)\n"));
    } else {
        out.push_str(&summary);
        out.push('\n');
    }

    out
}
