//! CLI integration tests for outreg.

mod common;

mod check_tests;
mod clean_tests;
mod list_tests;
