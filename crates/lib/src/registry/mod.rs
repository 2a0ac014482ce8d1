//! Registry of build-owned filesystem locations.
//!
//! Contributors register output declarations while the registry is open.
//! [`BuildOutputRegistry::finalize`] evaluates every declaration once and
//! freezes the result; from then on [`BuildOutputRegistry::is_owned`] answers
//! whether a path lies at or beneath a declared output.

mod types;

use std::collections::HashSet;
use std::io;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use tracing::{debug, info, trace};

use crate::fileset::{Declaration, OutputKey, PathResolver};

pub use types::{RegistryError, RegistryPhase, ResolvedOutputs, StateError};

/// Registered declarations in registration order, with set-semantics indexes.
#[derive(Debug, Default)]
struct Declarations {
  entries: Vec<Declaration>,
  keys: HashSet<OutputKey>,
  // Keyless declarations are deduplicated by handle.
  handles: HashSet<usize>,
}

impl Declarations {
  /// Returns `false` if an equal declaration is already held.
  fn insert(&mut self, declaration: Declaration) -> bool {
    let fresh = match declaration.key() {
      Some(key) => self.keys.insert(key),
      None => self.handles.insert(declaration.handle_id()),
    };
    if fresh {
      self.entries.push(declaration);
    }
    fresh
  }
}

pub struct BuildOutputRegistry {
  resolver: PathResolver,
  declarations: Mutex<Declarations>,
  resolved: OnceLock<ResolvedOutputs>,
}

impl BuildOutputRegistry {
  /// Create an open registry whose relative paths resolve against `resolver`.
  pub fn new(resolver: PathResolver) -> Self {
    Self {
      resolver,
      declarations: Mutex::new(Declarations::default()),
      resolved: OnceLock::new(),
    }
  }

  /// Create an open registry rooted at the process working directory.
  pub fn in_current_dir() -> io::Result<Self> {
    Ok(Self::new(PathResolver::current()?))
  }

  pub fn base_dir(&self) -> &Path {
    self.resolver.base()
  }

  pub fn phase(&self) -> RegistryPhase {
    if self.resolved.get().is_some() {
      RegistryPhase::Finalized
    } else {
      RegistryPhase::Open
    }
  }

  /// Register a declaration of build outputs.
  ///
  /// Nothing is evaluated here. Registering a declaration equal to one
  /// already held is a no-op.
  pub fn register(&self, declaration: impl Into<Declaration>) -> Result<(), StateError> {
    let declaration = declaration.into();
    let mut declarations = self.lock_declarations();

    // Checked under the lock: finalize publishes the resolved set while holding it.
    if self.resolved.get().is_some() {
      return Err(StateError::AlreadyFinalized {
        description: declaration.describe(),
      });
    }

    if declarations.insert(declaration.clone()) {
      trace!(output = %declaration, "registered build output");
    } else {
      trace!(output = %declaration, "output already registered");
    }
    Ok(())
  }

  /// Evaluate every declaration and freeze the registry.
  ///
  /// Calling this again, from any thread, returns the already resolved set
  /// without evaluating anything. If a declaration fails to evaluate nothing
  /// is committed and the registry stays open, so a later call retries.
  pub fn finalize(&self) -> Result<&ResolvedOutputs, RegistryError> {
    if let Some(resolved) = self.resolved.get() {
      return Ok(resolved);
    }

    let declarations = self.lock_declarations();
    if let Some(resolved) = self.resolved.get() {
      return Ok(resolved);
    }

    let mut paths = HashSet::new();
    for declaration in &declarations.entries {
      let files = declaration
        .files(&self.resolver)
        .map_err(|source| RegistryError::Evaluation {
          description: declaration.describe(),
          source,
        })?;
      debug!(output = %declaration, count = files.len(), "evaluated build output");
      paths.extend(files.into_iter().map(|file| self.resolver.resolve(file)));
    }

    info!(
      declarations = declarations.entries.len(),
      paths = paths.len(),
      "resolved build outputs"
    );

    Ok(self.resolved.get_or_init(|| ResolvedOutputs::new(paths)))
  }

  /// Whether `path` is, or lies beneath, a declared output.
  ///
  /// Relative paths are resolved against [`Self::base_dir`]. The path does
  /// not need to exist.
  pub fn is_owned(&self, path: impl AsRef<Path>) -> Result<bool, StateError> {
    let resolved = self.resolved_paths()?;
    let absolute = self.resolver.resolve(path);
    Ok(absolute.ancestors().any(|ancestor| resolved.contains(ancestor)))
  }

  /// The flattened output paths. Only available once finalized.
  pub fn resolved_paths(&self) -> Result<&ResolvedOutputs, StateError> {
    self.resolved.get().ok_or(StateError::NotFinalized)
  }

  /// The raw declarations registered so far, in registration order.
  pub fn registered_outputs(&self) -> Vec<Declaration> {
    self.lock_declarations().entries.clone()
  }

  // A panic while evaluating leaves the declaration list untouched, so a poisoned lock is still usable.
  fn lock_declarations(&self) -> MutexGuard<'_, Declarations> {
    self.declarations.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl std::fmt::Debug for BuildOutputRegistry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("BuildOutputRegistry")
      .field("base", &self.resolver.base())
      .field("phase", &self.phase())
      .field("declarations", &self.lock_declarations().entries)
      .finish()
  }
}
