//! Library integration tests for outreg-lib.

mod ownership_tests;
