//! Record filtering
//!
//! Patient-number lookup over a loaded dataset.

pub mod patient;

pub use patient::{LookupService, find_by_id};
