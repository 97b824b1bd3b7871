//! Screening algorithms
//!
//! Fixed threshold rules over clinical and lifestyle inputs. There is no
//! trained model or learned state here.

pub mod rules;

pub use rules::{Assessment, Likelihood, adrenal_thyroid_rule, chronic_kidney_rule, evaluate};
