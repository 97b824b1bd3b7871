//! Patient-number lookup
//!
//! A linear equality scan over the dataset's patient numbers. When a number
//! occurs more than once the first row in file order wins.

use std::sync::Arc;

use log::debug;

use crate::collections::Dataset;
use crate::error::LookupError;
use crate::models::Record;

/// Find the first record whose patient number equals `patient_id`
///
/// # Errors
/// Returns [`LookupError::NotFound`] when no record matches.
pub fn find_by_id(dataset: &Dataset, patient_id: i64) -> Result<&Record, LookupError> {
    dataset
        .iter()
        .find(|record| record.patient_id == patient_id)
        .ok_or(LookupError::NotFound { patient_id })
}

/// Lookup over a shared, immutable dataset handle
#[derive(Debug, Clone)]
pub struct LookupService {
    dataset: Arc<Dataset>,
}

impl LookupService {
    #[must_use]
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    /// The dataset this service reads from
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Inclusive bounds for patient numbers accepted as input
    #[must_use]
    pub fn id_range(&self) -> Option<(i64, i64)> {
        self.dataset.id_range()
    }

    /// Check that `patient_id` lies within [`Self::id_range`].
    ///
    /// An empty dataset has no range, so every id is reported as not found.
    pub fn check_in_range(&self, patient_id: i64) -> Result<(), LookupError> {
        match self.id_range() {
            Some((min, max)) if (min..=max).contains(&patient_id) => Ok(()),
            Some((min, max)) => Err(LookupError::OutOfRange {
                patient_id,
                min,
                max,
            }),
            None => Err(LookupError::NotFound { patient_id }),
        }
    }

    /// Find the first record with the given patient number
    pub fn find_by_id(&self, patient_id: i64) -> Result<&Record, LookupError> {
        let result = find_by_id(&self.dataset, patient_id);
        if result.is_err() {
            debug!("Patient_Number {patient_id} not present in {} rows", self.dataset.len());
        }
        result
    }
}
