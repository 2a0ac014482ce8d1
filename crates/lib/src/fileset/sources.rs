//! The supported declaration shapes.

use std::path::PathBuf;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::trace;
use walkdir::WalkDir;

use super::{Declaration, EvalError, FileSet, OutputKey, PathResolver};

/// A single declared path. Directories are owned together with everything beneath them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPath {
  path: PathBuf,
}

impl OutputPath {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }
}

impl FileSet for OutputPath {
  fn describe(&self) -> String {
    format!("path {}", self.path.display())
  }

  fn files(&self, resolver: &PathResolver) -> Result<Vec<PathBuf>, EvalError> {
    Ok(vec![resolver.resolve(&self.path)])
  }

  fn key(&self) -> Option<OutputKey> {
    Some(OutputKey::Path(self.path.clone()))
  }
}

/// The files currently present beneath a root directory.
///
/// Only entries found at evaluation time are yielded; the root itself is not.
/// A root that does not exist yet evaluates to the empty set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTree {
  root: PathBuf,
  include: Vec<String>,
}

impl FileTree {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self {
      root: root.into(),
      include: Vec::new(),
    }
  }

  /// Restrict the tree to entries matching `pattern`, relative to the root.
  ///
  /// Patterns are compiled at evaluation time.
  pub fn include(mut self, pattern: impl Into<String>) -> Self {
    self.include.push(pattern.into());
    self
  }

  fn matcher(&self) -> Result<Option<GlobSet>, EvalError> {
    if self.include.is_empty() {
      return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in &self.include {
      let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| EvalError::Pattern {
          pattern: pattern.clone(),
          source,
        })?;
      builder.add(glob);
    }
    let set = builder.build().map_err(|source| EvalError::Pattern {
      pattern: self.include.join(", "),
      source,
    })?;
    Ok(Some(set))
  }
}

impl FileSet for FileTree {
  fn describe(&self) -> String {
    if self.include.is_empty() {
      format!("tree {}", self.root.display())
    } else {
      format!("tree {} [{}]", self.root.display(), self.include.join(", "))
    }
  }

  fn files(&self, resolver: &PathResolver) -> Result<Vec<PathBuf>, EvalError> {
    let matcher = self.matcher()?;
    let root = resolver.resolve(&self.root);

    if !root.exists() {
      trace!(root = %root.display(), "tree root does not exist, nothing to enumerate");
      return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&root).follow_links(false) {
      let entry = entry.map_err(|source| EvalError::Walk {
        path: root.clone(),
        source,
      })?;
      if entry.file_type().is_dir() {
        continue;
      }
      if let Some(matcher) = &matcher {
        let relative = entry.path().strip_prefix(&root).unwrap_or(entry.path());
        if !matcher.is_match(relative) {
          continue;
        }
      }
      files.push(entry.into_path());
    }

    Ok(files)
  }

  fn key(&self) -> Option<OutputKey> {
    Some(OutputKey::Tree {
      root: self.root.clone(),
      include: self.include.clone(),
    })
  }
}

/// A named collection of declarations, evaluated as their union.
#[derive(Debug, Clone)]
pub struct OutputGroup {
  name: String,
  members: Vec<Declaration>,
}

impl OutputGroup {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      members: Vec::new(),
    }
  }

  pub fn with(mut self, member: impl Into<Declaration>) -> Self {
    self.members.push(member.into());
    self
  }

  pub fn push(&mut self, member: impl Into<Declaration>) {
    self.members.push(member.into());
  }

  pub fn members(&self) -> &[Declaration] {
    &self.members
  }
}

impl FileSet for OutputGroup {
  fn describe(&self) -> String {
    format!("group {} ({} outputs)", self.name, self.members.len())
  }

  fn files(&self, resolver: &PathResolver) -> Result<Vec<PathBuf>, EvalError> {
    let mut files = Vec::new();
    for member in &self.members {
      files.extend(member.files(resolver)?);
    }
    Ok(files)
  }

  fn key(&self) -> Option<OutputKey> {
    let members = self
      .members
      .iter()
      .map(|m| m.key())
      .collect::<Option<Vec<_>>>()?;
    Some(OutputKey::Group {
      name: self.name.clone(),
      members,
    })
  }
}

type ComputeFn = dyn Fn() -> Result<Vec<PathBuf>, EvalError> + Send + Sync;

/// Paths produced by a closure at finalization time.
///
/// Relative results are resolved against the registry's base directory.
pub struct Deferred {
  label: String,
  compute: Box<ComputeFn>,
}

impl Deferred {
  pub fn new<F>(label: impl Into<String>, compute: F) -> Self
  where
    F: Fn() -> Result<Vec<PathBuf>, EvalError> + Send + Sync + 'static,
  {
    Self {
      label: label.into(),
      compute: Box::new(compute),
    }
  }
}

impl std::fmt::Debug for Deferred {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Deferred").field("label", &self.label).finish_non_exhaustive()
  }
}

impl FileSet for Deferred {
  fn describe(&self) -> String {
    self.label.clone()
  }

  fn files(&self, resolver: &PathResolver) -> Result<Vec<PathBuf>, EvalError> {
    let paths = (self.compute)()?;
    Ok(paths.into_iter().map(|p| resolver.resolve(p)).collect())
  }
}
