//! A Rust library for exploring a tabular patient dataset: loading it once,
//! looking up records by patient number, and screening clinical inputs
//! against two fixed threshold rules.

pub mod algorithm;
pub mod collections;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod models;
pub mod schema;
pub mod utils;

// Re-export the most common types for easier use
pub use algorithm::{Assessment, Likelihood, evaluate};
pub use collections::Dataset;
pub use config::DashboardConfig;
pub use error::{Error, LookupError, Result};
pub use filter::{LookupService, find_by_id};
pub use loader::load;
pub use models::{Record, RuleInput};

// Arrow types
pub use arrow::record_batch::RecordBatch;
