//! Check command implementation.
//!
//! Answers whether each given path is owned by the build.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use crate::output::{OutputFormat, print_json, print_ownership};

#[derive(Debug, Serialize)]
struct Ownership {
  path: PathBuf,
  owned: bool,
}

/// Returns `true` when every path is owned by the build.
pub fn cmd_check(manifest: Option<&Path>, paths: &[PathBuf], output: OutputFormat) -> Result<bool> {
  let registry = super::finalized_registry(manifest)?;

  let answers = paths
    .iter()
    .map(|path| -> Result<Ownership> {
      Ok(Ownership {
        path: path.clone(),
        owned: registry.is_owned(path)?,
      })
    })
    .collect::<Result<Vec<_>>>()?;

  if output.is_json() {
    print_json(&answers)?;
  } else {
    for answer in &answers {
      print_ownership(&answer.path, answer.owned);
    }
  }

  Ok(answers.iter().all(|a| a.owned))
}
