//! Shared test utilities

use std::fs;
use std::path::{Path, PathBuf};

/// Cached binary path for the strata CLI to avoid repeated lookups
#[allow(deprecated, dead_code)]
pub static STRATA_BIN: std::sync::LazyLock<PathBuf> =
    std::sync::LazyLock::new(|| assert_cmd::cargo::cargo_bin("strata"));

/// Test helper to create a command with the cached binary
#[allow(dead_code)]
pub fn strata_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(&*STRATA_BIN);
    cmd.env_remove("STRATA_LOG");
    cmd
}

/// Path of a file under `tests/fixtures`
#[allow(dead_code)]
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Writes `files` (relative path, content) under `dir`, creating directories as needed
#[allow(dead_code)]
pub fn write_tree(dir: &Path, files: &[(&str, &str)]) {
    for (name, content) in files {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}
