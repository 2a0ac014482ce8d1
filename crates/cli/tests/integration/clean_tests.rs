use predicates::prelude::*;

use super::common::{TestEnv, WORKSPACE_MANIFEST};

#[test]
fn clean_removes_owned_and_keeps_user_files() {
  let env = TestEnv::with_manifest(WORKSPACE_MANIFEST);
  let stale = env.write_file("build/old-task/out.bin", "stale");
  let user = env.write_file("src/main.rs", "fn main() {}");

  env
    .outreg_cmd()
    .args(["clean", "build/old-task", "src/main.rs"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Stale output cleanup complete"));

  assert!(!stale.exists());
  assert!(user.exists());
}

#[test]
fn clean_dry_run_keeps_everything() {
  let env = TestEnv::with_manifest(WORKSPACE_MANIFEST);
  let stale = env.write_file("build/old-task/out.bin", "stale");

  env
    .outreg_cmd()
    .args(["clean", "--dry-run", "build/old-task"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Dry run"));

  assert!(stale.exists());
}

#[test]
fn clean_json_output_is_valid() {
  let env = TestEnv::with_manifest(WORKSPACE_MANIFEST);
  env.write_file("docs/site/index.html", "");
  env.write_file("docs/site/notes.txt", "");

  env
    .outreg_cmd()
    .args(["clean", "-o", "json", "docs/site/index.html", "docs/site/notes.txt"])
    .assert()
    .success()
    .stdout(predicate::str::contains("deleted_paths"))
    .stdout(predicate::str::contains("preserved_paths"))
    .stdout(predicate::str::contains("not_owned"));
}
