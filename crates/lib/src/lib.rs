//! outreg-lib: Build output ownership registry
//!
//! This crate decides whether a path found on disk is build output (safe to
//! delete) or user-owned content (must be preserved):
//! - `fileset`: lazily evaluated declarations of output files
//! - `registry`: two-phase registration and ownership queries
//! - `manifest`: JSON manifests that configure a registry
//! - `cleanup`: removal of stale outputs the registry says the build owns

pub mod cleanup;
pub mod consts;
pub mod fileset;
pub mod manifest;
pub mod platform;
pub mod registry;

pub use fileset::{
  Declaration, Deferred, EvalError, FileSet, FileTree, OutputGroup, OutputKey, OutputPath, PathResolver,
};
pub use registry::{BuildOutputRegistry, RegistryError, RegistryPhase, ResolvedOutputs, StateError};
