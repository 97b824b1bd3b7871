//! Values supplied to the screening rules

use serde::{Deserialize, Serialize};

use crate::models::record::Record;

/// The twelve clinical and lifestyle values a screening form collects.
///
/// Values are expected to be pre-bounded by the caller: non-negative
/// measurements, 0/1 flags, stress in `0..=10`. Nothing here enforces that.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleInput {
    pub blood_pressure_abnormality: u8,
    pub hemoglobin_level: f64,
    pub genetic_pedigree_coefficient: f64,
    pub age: u32,
    pub bmi: f64,
    pub sex: u8,
    pub pregnancy: u8,
    pub smoking: u8,
    pub physical_activity_hours: f64,
    pub salt_intake: f64,
    pub alcohol_units: f64,
    pub stress_level: u8,
}

/// Missing values in a stored row fall back to 0, the form default.
impl From<&Record> for RuleInput {
    fn from(record: &Record) -> Self {
        Self {
            blood_pressure_abnormality: record.blood_pressure_abnormality,
            hemoglobin_level: record.hemoglobin_level,
            genetic_pedigree_coefficient: record.genetic_pedigree_coefficient.unwrap_or_default(),
            age: record.age,
            bmi: record.bmi,
            sex: record.sex,
            pregnancy: record.pregnancy.unwrap_or_default(),
            smoking: record.smoking,
            physical_activity_hours: record.physical_activity_hours,
            salt_intake: record.salt_intake,
            alcohol_units: record.alcohol_units.unwrap_or_default(),
            stress_level: record.stress_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_record_fills_missing_with_zero() {
        let record = Record {
            patient_id: 9,
            blood_pressure_abnormality: 1,
            hemoglobin_level: 10.4,
            genetic_pedigree_coefficient: None,
            age: 51,
            bmi: 27.0,
            sex: 1,
            pregnancy: None,
            smoking: 0,
            physical_activity_hours: 2.0,
            salt_intake: 4.0,
            alcohol_units: Some(1.5),
            stress_level: 3,
            chronic_kidney_disease: 0,
            adrenal_thyroid_disorder: 1,
        };

        let input = RuleInput::from(&record);
        assert_eq!(input.genetic_pedigree_coefficient, 0.0);
        assert_eq!(input.pregnancy, 0);
        assert_eq!(input.alcohol_units, 1.5);
        assert_eq!(input.hemoglobin_level, 10.4);
        assert_eq!(input.stress_level, 3);
    }
}
