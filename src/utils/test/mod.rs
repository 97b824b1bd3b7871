//! Test utilities
//!
//! Record builders and CSV writers shared by unit and integration tests.


pub use fixtures::{CSV_HEADER, record_with_id, to_csv, write_csv};
