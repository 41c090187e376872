//! Library half of the `source-field` binary, exposed for integration tests.

pub mod cli;
pub mod loader;
pub mod logging;
