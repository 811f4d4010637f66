//! Unit tests for `mender_core` types.

mod cancel_tests;
mod config_tests;
mod diagnostic_tests;
mod semantic_tests;
