//! Logging utilities for output and progress tracking
//!
//! This module provides utilities for logging, console output, and progress tracking.

pub mod console;
pub mod log;
pub mod progress;

// Re-export commonly used functions for convenience
pub use self::log::{log_duplicate_ids, log_load_complete, log_load_start};
pub use progress::{create_spinner, finish_and_clear};
