//! Domain models for the patient dataset
//!
//! [`Record`] is one stored row; [`RuleInput`] is the set of clinical and
//! lifestyle values the screening rules read, whether typed in or taken from
//! a stored row.

pub mod record;
pub mod rule_input;
pub mod traits;

pub use record::Record;
pub use rule_input::RuleInput;
pub use traits::ArrowSchema;
