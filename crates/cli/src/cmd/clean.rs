use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;

use outreg_lib::cleanup::remove_stale_outputs;

use crate::output::{
  OutputFormat, format_bytes, format_duration, print_info, print_json, print_stat, print_success, print_warning,
};

pub fn cmd_clean(manifest: Option<&Path>, paths: &[PathBuf], dry_run: bool, output: OutputFormat) -> Result<()> {
  let start = Instant::now();

  let registry = super::finalized_registry(manifest)?;
  let result = remove_stale_outputs(&registry, paths, dry_run)?;

  if output.is_json() {
    print_json(&result)?;
  } else {
    println!();
    if dry_run {
      print_info("Dry run - no changes made");
    } else {
      print_success("Stale output cleanup complete!");
    }
    print_stat("Outputs removed", &result.stats.deleted.to_string());
    print_stat("Paths preserved", &result.stats.preserved.to_string());
    print_stat("Space freed", &format_bytes(result.stats.bytes_freed));
    print_stat("Duration", &format_duration(start.elapsed()));
    if result.stats.failed > 0 {
      print_warning(&format!("{} owned output(s) could not be removed", result.stats.failed));
    }
  }

  Ok(())
}
