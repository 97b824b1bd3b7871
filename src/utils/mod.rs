//! Utilities for logging, console output, and tests

pub mod logging;
pub mod test;
