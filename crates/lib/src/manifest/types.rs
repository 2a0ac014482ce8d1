//! Serialized form of an output manifest.
//!
//! ```json
//! {
//!   "base": "..",
//!   "outputs": [{ "type": "path", "path": "build" }],
//!   "projects": {
//!     "app": {
//!       "dir": "app",
//!       "outputs": [
//!         { "type": "tree", "root": "gen", "include": ["**/*.rs"] },
//!         { "type": "group", "name": "reports", "outputs": [{ "type": "path", "path": "reports/junit.xml" }] }
//!       ]
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::fileset::{Declaration, FileTree, OutputGroup, OutputPath};

/// The outputs of a whole build.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputManifest {
  /// Directory relative paths resolve against. Relative to the manifest file.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub base: Option<PathBuf>,
  /// Outputs not attributed to any project.
  #[serde(default)]
  pub outputs: Vec<OutputEntry>,
  /// Per-project outputs, keyed by project name.
  #[serde(default)]
  pub projects: BTreeMap<String, ProjectOutputs>,
}

/// Outputs contributed by one project.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectOutputs {
  /// Project directory, relative to the manifest base.
  #[serde(default)]
  pub dir: PathBuf,
  #[serde(default)]
  pub outputs: Vec<OutputEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputEntry {
  /// A file or directory.
  Path { path: PathBuf },
  /// Files under `root`, optionally filtered by glob patterns.
  Tree {
    root: PathBuf,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    include: Vec<String>,
  },
  /// A named collection of entries.
  Group { name: String, outputs: Vec<OutputEntry> },
}

impl OutputEntry {
  /// Convert to a declaration with relative paths placed under `dir`.
  pub fn to_declaration(&self, dir: &Path) -> Declaration {
    match self {
      OutputEntry::Path { path } => OutputPath::new(dir.join(path)).into(),
      OutputEntry::Tree { root, include } => include
        .iter()
        .fold(FileTree::new(dir.join(root)), |tree, pattern| tree.include(pattern.clone()))
        .into(),
      OutputEntry::Group { name, outputs } => outputs
        .iter()
        .fold(OutputGroup::new(name.clone()), |group, entry| {
          group.with(entry.to_declaration(dir))
        })
        .into(),
    }
  }
}
