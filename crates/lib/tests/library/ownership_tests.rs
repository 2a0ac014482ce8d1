//! End-to-end ownership checks through the public API, including a file set
//! implemented outside the crate.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use outreg_lib::cleanup::remove_stale_outputs;
use outreg_lib::{
  BuildOutputRegistry, EvalError, FileSet, FileTree, OutputGroup, OutputKey, OutputPath, PathResolver, RegistryPhase,
  StateError,
};
use tempfile::TempDir;

/// Mimics a task whose outputs are only known once it has been configured.
struct TaskOutputs {
  task: String,
  outputs: Vec<PathBuf>,
  evaluations: AtomicUsize,
}

impl FileSet for TaskOutputs {
  fn describe(&self) -> String {
    format!("outputs of task {}", self.task)
  }

  fn files(&self, resolver: &PathResolver) -> Result<Vec<PathBuf>, EvalError> {
    self.evaluations.fetch_add(1, Ordering::SeqCst);
    Ok(self.outputs.iter().map(|p| resolver.resolve(p)).collect())
  }

  fn key(&self) -> Option<OutputKey> {
    Some(OutputKey::Custom {
      kind: "task".to_string(),
      id: self.task.clone().into(),
    })
  }
}

fn workspace() -> (TempDir, BuildOutputRegistry) {
  let temp = TempDir::new().unwrap();
  let registry = BuildOutputRegistry::new(PathResolver::new(temp.path()).unwrap());
  (temp, registry)
}

#[test]
fn external_file_sets_participate_in_ownership() {
  let (_temp, registry) = workspace();
  registry
    .register(TaskOutputs {
      task: "compileJava".to_string(),
      outputs: vec![PathBuf::from("build/classes"), PathBuf::from("build/tmp/compileJava")],
      evaluations: AtomicUsize::new(0),
    })
    .unwrap();
  registry
    .register(TaskOutputs {
      task: "compileJava".to_string(),
      outputs: vec![PathBuf::from("ignored")],
      evaluations: AtomicUsize::new(0),
    })
    .unwrap();

  assert_eq!(registry.registered_outputs().len(), 1);
  registry.finalize().unwrap();

  let base = registry.base_dir().to_path_buf();
  assert!(registry.is_owned(base.join("build/classes/Main.class")).unwrap());
  assert!(registry.is_owned(base.join("build/tmp/compileJava/x")).unwrap());
  assert!(!registry.is_owned(base.join("build/tmp/test")).unwrap());
  assert!(!registry.is_owned(base.join("ignored")).unwrap());
}

#[test]
fn session_lifecycle_from_configuration_to_cleanup() {
  let (_temp, registry) = workspace();
  let base = registry.base_dir().to_path_buf();
  fs::create_dir_all(base.join("build/libs")).unwrap();
  fs::write(base.join("build/libs/old.jar"), "jar").unwrap();
  fs::create_dir_all(base.join("docs/site")).unwrap();
  fs::write(base.join("docs/site/index.html"), "<html/>").unwrap();
  fs::write(base.join("docs/site/README.md"), "user notes").unwrap();

  registry
    .register(
      OutputGroup::new("assemble")
        .with(OutputPath::new("build/libs"))
        .with(FileTree::new("docs/site").include("*.html")),
    )
    .unwrap();
  assert_eq!(registry.phase(), RegistryPhase::Open);

  registry.finalize().unwrap();
  assert!(matches!(
    registry.register(OutputPath::new("late")),
    Err(StateError::AlreadyFinalized { .. })
  ));

  let result = remove_stale_outputs(
    &registry,
    ["build/libs/old.jar", "docs/site/index.html", "docs/site/README.md"],
    false,
  )
  .unwrap();

  assert_eq!(result.stats.deleted, 2);
  assert_eq!(result.stats.preserved, 1);
  assert!(base.join("docs/site/README.md").exists());
  assert!(!base.join("build/libs/old.jar").exists());
}
