//! Shared helpers for end-to-end CLI tests.
//!
//! Each test gets an isolated workspace: a temp directory holding the
//! global config dir, the cache dir and a project dir, wired up through
//! the `LNR_CONFIG_DIR` / `LNR_CACHE_DIR` environment overrides so tests
//! never touch the real user config.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::path::PathBuf;
use std::process::ExitStatus;

use assert_cmd::Command;
use tempfile::TempDir;

pub struct LnrWorkspace {
    _tempdir: TempDir,
    pub global_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub project_dir: PathBuf,
}

impl LnrWorkspace {
    pub fn new() -> Self {
        let tempdir = TempDir::new().expect("create tempdir");
        let root = tempdir.path();
        let global_dir = root.join("global");
        let cache_dir = root.join("cache");
        let project_dir = root.join("project");
        std::fs::create_dir_all(&global_dir).expect("create global dir");
        std::fs::create_dir_all(&cache_dir).expect("create cache dir");
        std::fs::create_dir_all(&project_dir).expect("create project dir");
        Self {
            _tempdir: tempdir,
            global_dir,
            cache_dir,
            project_dir,
        }
    }
}

pub struct CliOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Run `lnr` inside the workspace's project directory.
///
/// `label` names the step in panic messages when the binary itself
/// cannot be spawned.
pub fn run_lnr<I, S>(workspace: &LnrWorkspace, args: I, label: &str) -> CliOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    run_lnr_with_env(workspace, args, &[], label)
}

/// Like [`run_lnr`] but with extra environment variables set, for
/// exercising the `LNR_*` config overrides.
pub fn run_lnr_with_env<I, S>(
    workspace: &LnrWorkspace,
    args: I,
    env: &[(&str, &str)],
    label: &str,
) -> CliOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    let output = Command::cargo_bin("lnr")
        .expect("lnr binary")
        .args(args)
        .current_dir(&workspace.project_dir)
        .env("LNR_CONFIG_DIR", &workspace.global_dir)
        .env("LNR_CACHE_DIR", &workspace.cache_dir)
        .env_remove("LNR_API_TOKEN")
        .env_remove("LNR_DEFAULT_TEAM")
        .envs(env.iter().map(|(k, v)| (k.to_string(), v.to_string())))
        .output()
        .unwrap_or_else(|e| panic!("failed to spawn lnr for step '{label}': {e}"));

    CliOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}
