//! Stale output removal.
//!
//! Consumes a finalized [`BuildOutputRegistry`]: every candidate path is
//! deleted only if the registry says the build owns it. Everything else is
//! preserved and reported.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::platform::paths::absolutize;
use crate::registry::{BuildOutputRegistry, StateError};

#[derive(Debug, Error)]
pub enum CleanupError {
  #[error("cannot clean stale outputs: {0}")]
  Registry(#[from] StateError),
}

#[derive(Debug, Default, serde::Serialize)]
pub struct CleanupStats {
  pub scanned: usize,
  pub missing: usize,
  pub deleted: usize,
  pub preserved: usize,
  pub failed: usize,
  pub bytes_freed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PreserveReason {
  /// Not beneath any declared output.
  NotOwned,
  /// Owned, but deleting it failed.
  DeleteFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PreservedPath {
  pub path: PathBuf,
  pub reason: PreserveReason,
}

#[derive(Debug, Default, serde::Serialize)]
pub struct CleanupResult {
  pub stats: CleanupStats,
  pub deleted_paths: Vec<PathBuf>,
  pub preserved_paths: Vec<PreservedPath>,
}

fn path_size(path: &Path) -> u64 {
  // A symlink is removed on its own; its target stays put.
  match fs::symlink_metadata(path) {
    Ok(metadata) if metadata.file_type().is_symlink() => return metadata.len(),
    Err(_) => return 0,
    Ok(_) => {}
  }

  WalkDir::new(path)
    .into_iter()
    .filter_map(|e| e.ok())
    .filter(|e| e.file_type().is_file())
    .filter_map(|e| e.metadata().ok())
    .map(|m| m.len())
    .sum()
}

fn remove_path(path: &Path) -> std::io::Result<()> {
  let metadata = fs::symlink_metadata(path)?;
  if metadata.is_dir() {
    fs::remove_dir_all(path)
  } else {
    fs::remove_file(path)
  }
}

/// Delete each candidate the build owns; preserve the rest.
///
/// The registry must be finalized. A failed deletion is logged and reported
/// in the result rather than aborting the sweep.
pub fn remove_stale_outputs<I, P>(
  registry: &BuildOutputRegistry,
  candidates: I,
  dry_run: bool,
) -> Result<CleanupResult, CleanupError>
where
  I: IntoIterator<Item = P>,
  P: AsRef<Path>,
{
  registry.resolved_paths()?;

  let mut result = CleanupResult::default();

  for candidate in candidates {
    let path = absolutize(registry.base_dir(), candidate.as_ref());
    result.stats.scanned += 1;

    if fs::symlink_metadata(&path).is_err() {
      debug!(path = %path.display(), "stale output already absent");
      result.stats.missing += 1;
      continue;
    }

    if !registry.is_owned(&path)? {
      debug!(path = %path.display(), "preserving path not owned by the build");
      result.stats.preserved += 1;
      result.preserved_paths.push(PreservedPath {
        path,
        reason: PreserveReason::NotOwned,
      });
      continue;
    }

    let size = path_size(&path);
    debug!(path = %path.display(), "removing stale build output");

    if dry_run {
      result.stats.deleted += 1;
      result.stats.bytes_freed += size;
      result.deleted_paths.push(path);
      continue;
    }

    match remove_path(&path) {
      Ok(()) => {
        result.stats.deleted += 1;
        result.stats.bytes_freed += size;
        result.deleted_paths.push(path);
      }
      Err(e) => {
        warn!(path = %path.display(), error = %e, "failed to delete stale output");
        result.stats.failed += 1;
        result.preserved_paths.push(PreservedPath {
          path,
          reason: PreserveReason::DeleteFailed,
        });
      }
    }
  }

  info!(
    scanned = result.stats.scanned,
    deleted = result.stats.deleted,
    preserved = result.stats.preserved,
    bytes_freed = result.stats.bytes_freed,
    dry_run,
    "stale output cleanup complete"
  );

  Ok(result)
}
