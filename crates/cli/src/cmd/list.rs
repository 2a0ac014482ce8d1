//! List command implementation.
//!
//! Shows the registered output declarations and, once resolved, the flattened paths.

use std::path::Path;

use anyhow::{Context, Result};

use outreg_lib::RegistryPhase;

use crate::output::{OutputFormat, print_info, print_json, print_stat, print_success};

pub fn cmd_list(manifest: Option<&Path>, unresolved: bool, output: OutputFormat) -> Result<()> {
  let registry = super::open_registry(manifest)?;
  if !unresolved {
    registry.finalize().context("Failed to resolve build outputs")?;
  }

  let declarations: Vec<String> = registry.registered_outputs().iter().map(|d| d.describe()).collect();
  let resolved: Vec<String> = match registry.resolved_paths() {
    Ok(paths) => paths.sorted().iter().map(|p| p.display().to_string()).collect(),
    Err(_) => Vec::new(),
  };

  if output.is_json() {
    print_json(&serde_json::json!({
      "base": registry.base_dir(),
      "phase": registry.phase(),
      "declarations": declarations,
      "resolved_paths": resolved,
    }))?;
    return Ok(());
  }

  print_success(&format!("{} output declaration(s)", declarations.len()));
  print_stat("Base", &registry.base_dir().display().to_string());
  for declaration in &declarations {
    println!("  {}", declaration);
  }

  if registry.phase() == RegistryPhase::Open {
    println!();
    print_info("Outputs not resolved (--unresolved)");
    return Ok(());
  }

  println!();
  print_success(&format!("{} resolved path(s)", resolved.len()));
  for path in &resolved {
    println!("  {}", path);
  }

  Ok(())
}
