//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// A build workspace with a `./build` output directory and a `./src` user tree.
pub const WORKSPACE_MANIFEST: &str = r#"{
  "outputs": [{ "type": "path", "path": "build" }],
  "projects": {
    "docs": {
      "dir": "docs",
      "outputs": [{ "type": "tree", "root": "site", "include": ["**/*.html"] }]
    }
  }
}"#;

/// Isolated test environment.
///
/// Each test gets its own temporary workspace holding an `outputs.json` manifest.
pub struct TestEnv {
  pub temp: TempDir,
  pub manifest_path: PathBuf,
}

impl TestEnv {
  pub fn with_manifest(content: &str) -> Self {
    let temp = TempDir::new().unwrap();
    let manifest_path = temp.path().join("outputs.json");
    std::fs::write(&manifest_path, content).unwrap();
    Self { temp, manifest_path }
  }

  /// Create an environment without a manifest.
  pub fn empty() -> Self {
    let temp = TempDir::new().unwrap();
    let manifest_path = temp.path().join("outputs.json");
    Self { temp, manifest_path }
  }

  /// Write a file relative to the workspace.
  pub fn write_file(&self, relative_path: &str, content: &str) -> PathBuf {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
  }

  /// Get a pre-configured Command for the outreg binary.
  ///
  /// Runs inside the workspace with `OUTREG_MANIFEST` pointing at its manifest.
  pub fn outreg_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("outreg");
    cmd.current_dir(self.temp.path());
    cmd.env("OUTREG_MANIFEST", &self.manifest_path);
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
