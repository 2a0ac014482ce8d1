//! Error and result types for the build output registry.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::fileset::EvalError;

/// An operation was invoked in the wrong registry phase.
///
/// These always indicate an integration bug in the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
  #[error("registry already finalized; cannot register output: `{description}`")]
  AlreadyFinalized { description: String },

  #[error("build outputs have not been resolved yet")]
  NotFinalized,
}

/// Errors raised by [`super::BuildOutputRegistry::finalize`].
#[derive(Debug, Error)]
pub enum RegistryError {
  #[error(transparent)]
  State(#[from] StateError),

  /// A declaration could not be evaluated. Nothing was committed.
  #[error("failed to evaluate build output `{description}`: {source}")]
  Evaluation {
    description: String,
    #[source]
    source: EvalError,
  },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryPhase {
  /// Accepting declarations; ownership queries are rejected.
  Open,
  /// Declarations frozen; ownership queries are answered.
  Finalized,
}

/// The flattened, absolute set of declared output paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedOutputs {
  paths: HashSet<PathBuf>,
}

impl ResolvedOutputs {
  pub(crate) fn new(paths: HashSet<PathBuf>) -> Self {
    Self { paths }
  }

  pub fn contains(&self, path: &Path) -> bool {
    self.paths.contains(path)
  }

  pub fn len(&self) -> usize {
    self.paths.len()
  }

  pub fn is_empty(&self) -> bool {
    self.paths.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Path> {
    self.paths.iter().map(PathBuf::as_path)
  }

  /// Paths in sorted order, for stable display.
  pub fn sorted(&self) -> Vec<&Path> {
    let mut paths: Vec<_> = self.iter().collect();
    paths.sort();
    paths
  }
}
