use predicates::prelude::*;

use super::common::{TestEnv, WORKSPACE_MANIFEST};

#[test]
fn list_shows_declarations_and_resolved_paths() {
  let env = TestEnv::with_manifest(WORKSPACE_MANIFEST);
  env.write_file("docs/site/index.html", "<html/>");
  env.write_file("docs/site/style.css", "");

  env
    .outreg_cmd()
    .arg("list")
    .assert()
    .success()
    .stdout(predicate::str::contains("2 output declaration(s)"))
    .stdout(predicate::str::contains("path build"))
    .stdout(predicate::str::contains("2 resolved path(s)"))
    .stdout(predicate::str::contains("index.html"))
    .stdout(predicate::str::contains("style.css").not());
}

#[test]
fn list_unresolved_skips_evaluation() {
  let env = TestEnv::with_manifest(r#"{ "outputs": [{ "type": "tree", "root": "x", "include": ["a["] }] }"#);

  env
    .outreg_cmd()
    .args(["list", "--unresolved"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Outputs not resolved"));
}

#[test]
fn list_reports_evaluation_failure() {
  let env = TestEnv::with_manifest(r#"{ "outputs": [{ "type": "tree", "root": "x", "include": ["a["] }] }"#);

  env
    .outreg_cmd()
    .arg("list")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to resolve build outputs"))
    .stderr(predicate::str::contains("invalid include pattern"));
}

#[test]
fn list_json_output_is_valid() {
  let env = TestEnv::with_manifest(WORKSPACE_MANIFEST);

  let output = env.outreg_cmd().args(["list", "-o", "json"]).output().unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["phase"], "finalized");
  assert_eq!(json["declarations"].as_array().unwrap().len(), 2);
}
