//! Platform-level path handling and configuration lookup.

pub mod paths;
