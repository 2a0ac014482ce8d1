mod check;
mod clean;
mod list;

pub use check::cmd_check;
pub use clean::cmd_clean;
pub use list::cmd_list;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use outreg_lib::BuildOutputRegistry;
use outreg_lib::manifest::load_registry;
use outreg_lib::platform::paths::manifest_path;

fn resolve_manifest(manifest: Option<&Path>) -> Result<PathBuf> {
  match manifest {
    Some(path) => Ok(path.to_path_buf()),
    None => manifest_path().context("Failed to determine manifest location"),
  }
}

/// Load the manifest and register its outputs, leaving the registry open.
fn open_registry(manifest: Option<&Path>) -> Result<BuildOutputRegistry> {
  let path = resolve_manifest(manifest)?;
  debug!(manifest = %path.display(), "loading output manifest");
  load_registry(&path).with_context(|| format!("Failed to load manifest {}", path.display()))
}

/// Load the manifest and finalize the registry so it can answer ownership queries.
fn finalized_registry(manifest: Option<&Path>) -> Result<BuildOutputRegistry> {
  let registry = open_registry(manifest)?;
  registry.finalize().context("Failed to resolve build outputs")?;
  Ok(registry)
}
