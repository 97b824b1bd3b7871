//! In-memory record collections
//!
//! The dataset is loaded once and shared read-only for the rest of the process.

pub mod dataset;

pub use dataset::Dataset;
