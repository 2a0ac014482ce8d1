//! Lazily evaluated sets of output files.
//!
//! A [`FileSet`] describes "some files" without touching the filesystem until
//! it is asked to enumerate them. The registry holds file sets as
//! [`Declaration`] handles and evaluates each one exactly once, at finalization.

mod sources;

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::platform::paths::absolutize;

pub use sources::{Deferred, FileTree, OutputGroup, OutputPath};

/// Errors raised while enumerating a file set.
#[derive(Debug, Error)]
pub enum EvalError {
  #[error("invalid include pattern `{pattern}`: {source}")]
  Pattern {
    pattern: String,
    #[source]
    source: globset::Error,
  },

  #[error("failed to walk {path}: {source}")]
  Walk {
    path: PathBuf,
    #[source]
    source: walkdir::Error,
  },

  #[error("io error: {0}")]
  Io(#[from] io::Error),

  #[error("{0}")]
  Failed(String),
}

/// Resolves declared paths to their absolute, normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
  base: PathBuf,
}

impl PathResolver {
  /// Create a resolver for relative paths under `base`.
  ///
  /// A relative `base` is taken relative to the process working directory.
  pub fn new(base: impl AsRef<Path>) -> io::Result<Self> {
    let base = base.as_ref();
    let base = if base.is_absolute() {
      absolutize(base, base)
    } else {
      absolutize(&crate::platform::paths::current_dir()?, base)
    };
    Ok(Self { base })
  }

  /// Resolver rooted at the process working directory.
  pub fn current() -> io::Result<Self> {
    Ok(Self {
      base: crate::platform::paths::current_dir()?,
    })
  }

  pub fn base(&self) -> &Path {
    &self.base
  }

  pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
    absolutize(&self.base, path.as_ref())
  }
}

/// Structural value identity of a file set.
///
/// Paths are compared as paths, not as display strings, so distinct
/// non-UTF-8 paths and differently split pattern lists never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OutputKey {
  Path(PathBuf),
  Tree { root: PathBuf, include: Vec<String> },
  Group { name: String, members: Vec<OutputKey> },
  /// Identity chosen by a file set implemented outside this crate.
  Custom { kind: String, id: OsString },
}

/// A deferred description of one or more files.
///
/// Implementations must not touch the filesystem until [`FileSet::files`] is
/// called, and repeated calls must be idempotent.
pub trait FileSet: Send + Sync {
  /// Human readable description, used in errors and diagnostics.
  fn describe(&self) -> String;

  /// Enumerate the concrete files of this set.
  fn files(&self, resolver: &PathResolver) -> Result<Vec<PathBuf>, EvalError>;

  /// Value identity of this set.
  ///
  /// Two declarations with equal keys are the same output and are stored
  /// once. Sets that return `None` are compared by handle identity only.
  fn key(&self) -> Option<OutputKey> {
    None
  }
}

/// Shared handle to a registered [`FileSet`].
#[derive(Clone)]
pub struct Declaration {
  source: Arc<dyn FileSet>,
}

impl Declaration {
  pub fn new(source: impl FileSet + 'static) -> Self {
    Self {
      source: Arc::new(source),
    }
  }

  pub fn describe(&self) -> String {
    self.source.describe()
  }

  pub fn files(&self, resolver: &PathResolver) -> Result<Vec<PathBuf>, EvalError> {
    self.source.files(resolver)
  }

  pub fn key(&self) -> Option<OutputKey> {
    self.source.key()
  }

  /// Address of the shared file set, identifying this handle and its clones.
  pub(crate) fn handle_id(&self) -> usize {
    Arc::as_ptr(&self.source) as *const () as usize
  }
}

impl PartialEq for Declaration {
  fn eq(&self, other: &Self) -> bool {
    if Arc::ptr_eq(&self.source, &other.source) {
      return true;
    }
    match (self.key(), other.key()) {
      (Some(a), Some(b)) => a == b,
      _ => false,
    }
  }
}

impl Eq for Declaration {}

impl fmt::Debug for Declaration {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Declaration").field(&self.describe()).finish()
  }
}

impl fmt::Display for Declaration {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.describe())
  }
}

impl<T: FileSet + 'static> From<T> for Declaration {
  fn from(source: T) -> Self {
    Declaration::new(source)
  }
}
