use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

use super::FIXED_NOW;

const SCRUBBED_ENV: &[&str] = &[
    "PMDASH_CURRENT_USER",
    "PMDASH_SEED",
    "PMDASH_PAGE_SIZE",
    "PMDASH_LOG_FILE",
    "NO_COLOR",
    "RUST_LOG",
];

/// Isolated working directory with its own HOME and config root, so a
/// developer's `~/.config/pmdash` never leaks into a run.
pub struct PmdWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl PmdWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir");
        let root = temp_dir.path().to_path_buf();
        Self { temp_dir, root }
    }

    /// Write `contents` to `rel` under the workspace, creating parents.
    pub fn write(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(&path, contents).expect("write fixture");
        path
    }

    pub fn config_home(&self) -> PathBuf {
        self.root.join("xdg")
    }

    /// Write the user-level config picked up without `--config`.
    pub fn write_user_config(&self, contents: &str) -> PathBuf {
        self.write("xdg/pmdash/config.yaml", contents)
    }
}

#[derive(Debug)]
pub struct PmdRun {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl PmdRun {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.stdout).unwrap_or_else(|e| {
            panic!(
                "stdout is not JSON ({e}):\n{}\nstderr:\n{}",
                self.stdout, self.stderr
            )
        })
    }
}

pub fn pmd_command(workspace: &PmdWorkspace) -> Command {
    let mut cmd = Command::cargo_bin("pmd").expect("pmd binary");
    for key in SCRUBBED_ENV {
        cmd.env_remove(key);
    }
    cmd.current_dir(&workspace.root)
        .env("HOME", &workspace.root)
        .env("XDG_CONFIG_HOME", workspace.config_home())
        .env("PMDASH_NOW", FIXED_NOW);
    cmd
}

pub fn run_pmd<I, S>(workspace: &PmdWorkspace, args: I, label: &str) -> PmdRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_pmd_with_env(workspace, args, &[], label)
}

pub fn run_pmd_with_env<I, S>(
    workspace: &PmdWorkspace,
    args: I,
    env: &[(&str, &str)],
    label: &str,
) -> PmdRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = pmd_command(workspace);
    cmd.args(args);
    for (key, value) in env {
        cmd.env(key, value);
    }
    let output = cmd
        .output()
        .unwrap_or_else(|e| panic!("[{label}] failed to run pmd: {e}"));
    PmdRun {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

/// Run and assert success, echoing both streams on failure.
pub fn run_pmd_ok<I, S>(workspace: &PmdWorkspace, args: I, label: &str) -> PmdRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let run = run_pmd(workspace, args, label);
    assert!(
        run.status.success(),
        "[{label}] pmd failed\nstdout:\n{}\nstderr:\n{}",
        run.stdout,
        run.stderr
    );
    run
}

pub fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
