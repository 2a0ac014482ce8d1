use std::io;
use std::path::{Component, Path, PathBuf};

use crate::consts::{MANIFEST_ENV, MANIFEST_FILENAME};

/// Returns the process working directory.
pub fn current_dir() -> io::Result<PathBuf> {
  std::env::current_dir().map(|dir| dunce::simplified(&dir).to_path_buf())
}

/// Returns the output manifest to load.
///
/// `OUTREG_MANIFEST` takes precedence; otherwise `outputs.json` in the current directory.
pub fn manifest_path() -> io::Result<PathBuf> {
  if let Ok(path) = std::env::var(MANIFEST_ENV)
    && !path.is_empty()
  {
    return Ok(PathBuf::from(path));
  }

  Ok(current_dir()?.join(MANIFEST_FILENAME))
}

/// Normalize a path without touching the filesystem.
///
/// Folds `.` and `..` components. A `..` at the root stays at the root.
pub fn normalize_path(path: &Path) -> PathBuf {
  let mut normalized = PathBuf::new();
  for component in dunce::simplified(path).components() {
    match component {
      Component::ParentDir => match normalized.components().next_back() {
        Some(Component::Normal(_)) => {
          normalized.pop();
        }
        Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
        _ => normalized.push(component),
      },
      Component::CurDir => {}
      _ => normalized.push(component),
    }
  }
  normalized
}

/// Resolve `path` against `base` and normalize the result.
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
  if path.is_absolute() {
    normalize_path(path)
  } else {
    normalize_path(&base.join(path))
  }
}
