use predicates::prelude::*;

use super::common::{TestEnv, WORKSPACE_MANIFEST};

#[test]
fn check_owned_paths_succeeds() {
  let env = TestEnv::with_manifest(WORKSPACE_MANIFEST);

  env
    .outreg_cmd()
    .args(["check", "build/classes/Main.class", "build"])
    .assert()
    .success()
    .stdout(predicate::str::contains("(build output)"));
}

#[test]
fn check_sibling_with_shared_prefix_is_not_owned() {
  let env = TestEnv::with_manifest(WORKSPACE_MANIFEST);

  env
    .outreg_cmd()
    .args(["check", "build-cache/entry"])
    .assert()
    .failure()
    .stdout(predicate::str::contains("(not owned)"));
}

#[test]
fn check_json_output_lists_each_path() {
  let env = TestEnv::with_manifest(WORKSPACE_MANIFEST);

  let output = env
    .outreg_cmd()
    .args(["-o", "json", "check", "build/a", "src/main.rs"])
    .output()
    .unwrap();

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json[0]["owned"], true);
  assert_eq!(json[1]["owned"], false);
}

#[test]
fn check_with_missing_manifest_fails() {
  let env = TestEnv::empty();

  env
    .outreg_cmd()
    .args(["check", "build"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to load manifest"));
}

#[test]
fn manifest_flag_overrides_environment() {
  let env = TestEnv::empty();
  let other = env.write_file("other.json", r#"{ "outputs": [{ "type": "path", "path": "out" }] }"#);

  env
    .outreg_cmd()
    .arg("--manifest")
    .arg(&other)
    .args(["check", "out/file"])
    .assert()
    .success();
}
