//! Output manifests.
//!
//! A manifest is a JSON document listing the outputs each project of a build
//! declares. Loading one configures a [`BuildOutputRegistry`] the way a build's
//! configuration phase would: every project registers its own outputs,
//! concurrently, into the shared registry.

mod types;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::fileset::PathResolver;
use crate::platform::paths::absolutize;
use crate::registry::{BuildOutputRegistry, StateError};

pub use types::{OutputEntry, OutputManifest, ProjectOutputs};

#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("failed to read manifest {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse manifest {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("failed to resolve working directory: {0}")]
  WorkingDir(#[source] io::Error),

  #[error(transparent)]
  Register(#[from] StateError),
}

impl OutputManifest {
  pub fn load(path: &Path) -> Result<Self, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    Self::parse(&content).map_err(|source| ManifestError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
    serde_json::from_str(content)
  }

  /// Total number of top-level entries across all projects.
  pub fn entry_count(&self) -> usize {
    self.outputs.len() + self.projects.values().map(|p| p.outputs.len()).sum::<usize>()
  }

  /// Create an open registry and register every entry into it.
  ///
  /// `manifest_dir` anchors a relative `base`. The registry is returned
  /// unfinalized.
  pub fn build_registry(&self, manifest_dir: &Path) -> Result<BuildOutputRegistry, ManifestError> {
    let base = match &self.base {
      Some(base) => absolutize(manifest_dir, base),
      None => manifest_dir.to_path_buf(),
    };
    let resolver = PathResolver::new(&base).map_err(ManifestError::WorkingDir)?;
    let registry = BuildOutputRegistry::new(resolver);
    self.register_into(&registry)?;
    Ok(registry)
  }

  /// Register every entry into `registry`, one thread per project.
  pub fn register_into(&self, registry: &BuildOutputRegistry) -> Result<(), ManifestError> {
    std::thread::scope(|scope| {
      let handles: Vec<_> = self
        .projects
        .iter()
        .map(|(name, project)| {
          scope.spawn(move || {
            debug!(project = %name, count = project.outputs.len(), "registering project outputs");
            project
              .outputs
              .iter()
              .try_for_each(|entry| registry.register(entry.to_declaration(&project.dir)))
          })
        })
        .collect();

      handles
        .into_iter()
        .try_for_each(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
    })?;

    for entry in &self.outputs {
      registry.register(entry.to_declaration(Path::new("")))?;
    }
    Ok(())
  }
}

/// Load the manifest at `path` and build an open registry from it.
pub fn load_registry(path: &Path) -> Result<BuildOutputRegistry, ManifestError> {
  let manifest = OutputManifest::load(path)?;
  let manifest_dir = match path.parent() {
    Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
    _ => PathBuf::from("."),
  };
  manifest.build_registry(&manifest_dir)
}
