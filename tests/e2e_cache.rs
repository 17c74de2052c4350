mod common;
use common::cli::{LnrWorkspace, run_lnr};

use serde_json::json;

const TEAM_ID: &str = "a1b2c3d4-1111-2222-3333-444455556666";

/// Write a persistent cache file the way the tool itself would.
fn seed_team_cache(workspace: &LnrWorkspace, ttl_seconds: u64) {
    let entry = json!({
        "fetched_at": chrono::Utc::now().to_rfc3339(),
        "ttl_seconds": ttl_seconds,
        "entities": [
            { "id": TEAM_ID, "name": "Engineering", "key": "ENG" },
        ],
    });
    std::fs::write(
        workspace.cache_dir.join("team.json"),
        serde_json::to_string_pretty(&entry).unwrap(),
    )
    .unwrap();
}

#[test]
fn test_cache_status_reports_empty_types() {
    let workspace = LnrWorkspace::new();
    run_lnr(&workspace, ["init"], "init");

    let status = run_lnr(&workspace, ["cache", "status"], "status");
    assert!(status.status.success(), "status failed: {}", status.stderr);
    assert!(status.stdout.contains("team"));
    assert!(status.stdout.contains("empty"));
}

#[test]
fn test_cache_status_shows_fresh_and_stale() {
    let workspace = LnrWorkspace::new();
    run_lnr(&workspace, ["init"], "init");
    seed_team_cache(&workspace, 86_400);

    let status = run_lnr(&workspace, ["cache", "status"], "status");
    assert!(status.stdout.contains("fresh"), "stdout: {}", status.stdout);
    assert!(status.stdout.contains("1 entities"));

    // A zero TTL entry is never fresh.
    seed_team_cache(&workspace, 0);
    let stale = run_lnr(&workspace, ["cache", "status"], "status_stale");
    assert!(stale.stdout.contains("stale"), "stdout: {}", stale.stdout);
}

#[test]
fn test_cache_clear_one_type() {
    let workspace = LnrWorkspace::new();
    run_lnr(&workspace, ["init"], "init");
    seed_team_cache(&workspace, 86_400);

    let clear = run_lnr(&workspace, ["cache", "clear", "team"], "clear");
    assert!(clear.status.success(), "clear failed: {}", clear.stderr);
    assert!(!workspace.cache_dir.join("team.json").exists());
}

#[test]
fn test_cache_clear_all_is_idempotent() {
    let workspace = LnrWorkspace::new();
    run_lnr(&workspace, ["init"], "init");

    // Nothing cached yet; clearing must still succeed.
    let clear = run_lnr(&workspace, ["cache", "clear"], "clear");
    assert!(clear.status.success(), "clear failed: {}", clear.stderr);
}

#[test]
fn test_resolve_by_name_uses_fresh_cache_without_token() {
    let workspace = LnrWorkspace::new();
    run_lnr(&workspace, ["init"], "init");
    seed_team_cache(&workspace, 86_400);

    // No API token anywhere; a fresh cache hit must be enough.
    let resolve = run_lnr(&workspace, ["resolve", "team", "Engineering"], "resolve");
    assert!(resolve.status.success(), "resolve failed: {}", resolve.stderr);
    assert!(resolve.stdout.contains(TEAM_ID));
    assert!(resolve.stdout.contains("cache"), "stdout: {}", resolve.stdout);
}

#[test]
fn test_resolve_prefix_match_from_cache() {
    let workspace = LnrWorkspace::new();
    run_lnr(&workspace, ["init"], "init");
    seed_team_cache(&workspace, 86_400);

    let resolve = run_lnr(&workspace, ["resolve", "team", "eng"], "resolve");
    assert!(resolve.status.success(), "resolve failed: {}", resolve.stderr);
    assert!(resolve.stdout.contains(TEAM_ID));
}

#[test]
fn test_stale_cache_falls_through_to_remote_and_fails_without_token() {
    let workspace = LnrWorkspace::new();
    run_lnr(&workspace, ["init"], "init");
    seed_team_cache(&workspace, 0);

    let resolve = run_lnr(&workspace, ["resolve", "team", "Engineering"], "resolve");
    assert!(!resolve.status.success());
    assert!(
        resolve.stderr.contains("token"),
        "expected missing-token error: {}",
        resolve.stderr
    );
}

#[test]
fn test_resolve_literal_uuid_skips_network() {
    let workspace = LnrWorkspace::new();
    run_lnr(&workspace, ["init"], "init");

    let resolve = run_lnr(&workspace, ["resolve", "team", TEAM_ID], "resolve");
    assert!(resolve.status.success(), "resolve failed: {}", resolve.stderr);
    assert!(resolve.stdout.contains(TEAM_ID));
    assert!(resolve.stdout.contains("literal"));
}

#[test]
fn test_corrupt_cache_file_is_a_miss() {
    let workspace = LnrWorkspace::new();
    run_lnr(&workspace, ["init"], "init");
    std::fs::write(workspace.cache_dir.join("team.json"), "garbage").unwrap();

    let status = run_lnr(&workspace, ["cache", "status"], "status");
    assert!(status.status.success(), "status failed: {}", status.stderr);
    assert!(status.stdout.contains("empty"));
}
