//! Patient record model
//!
//! One row of the dataset. Field names follow Rust conventions; the serde
//! renames carry the column names used by the source file.

use arrow::datatypes::{FieldRef, Schema};
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::traits::ArrowSchema;
use crate::schema;

/// A single patient row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique patient number
    #[serde(rename = "Patient_Number")]
    pub patient_id: i64,
    /// 0 = normal, 1 = abnormal
    #[serde(rename = "Blood_Pressure_Abnormality")]
    pub blood_pressure_abnormality: u8,
    /// Hemoglobin in g/dL
    #[serde(rename = "Level_of_Hemoglobin")]
    pub hemoglobin_level: f64,
    #[serde(rename = "Genetic_Pedigree_Coefficient")]
    pub genetic_pedigree_coefficient: Option<f64>,
    #[serde(rename = "Age")]
    pub age: u32,
    /// Body mass index in kg/m^2
    #[serde(rename = "BMI")]
    pub bmi: f64,
    /// 0 = female, 1 = male
    #[serde(rename = "Sex")]
    pub sex: u8,
    /// Blank in the source for patients where it does not apply
    #[serde(rename = "Pregnancy")]
    pub pregnancy: Option<u8>,
    #[serde(rename = "Smoking")]
    pub smoking: u8,
    #[serde(rename = "Physical_activity")]
    pub physical_activity_hours: f64,
    /// Salt in the diet, g/day
    #[serde(rename = "salt_content_in_the_diet")]
    pub salt_intake: f64,
    /// Alcohol, units/day
    #[serde(rename = "alcohol_consumption_per_day")]
    pub alcohol_units: Option<f64>,
    #[serde(rename = "Level_of_Stress")]
    pub stress_level: u8,
    /// Recorded diagnosis, 0/1
    #[serde(rename = "Chronic_kidney_disease")]
    pub chronic_kidney_disease: u8,
    /// Recorded diagnosis, 0/1
    #[serde(rename = "Adrenal_and_thyroid_disorders")]
    pub adrenal_thyroid_disorder: u8,
}

impl Record {
    /// Whether the recorded diagnosis includes chronic kidney disease
    #[must_use]
    pub const fn has_chronic_kidney_disease(&self) -> bool {
        self.chronic_kidney_disease == 1
    }

    /// Whether the recorded diagnosis includes an adrenal or thyroid disorder
    #[must_use]
    pub const fn has_adrenal_thyroid_disorder(&self) -> bool {
        self.adrenal_thyroid_disorder == 1
    }
}

impl ArrowSchema for Record {
    fn schema() -> Schema {
        schema::record_schema().as_ref().clone()
    }

    fn from_record_batch(batch: &RecordBatch) -> Result<Vec<Self>> {
        Ok(serde_arrow::from_record_batch(batch)?)
    }

    fn to_record_batch(models: &[Self]) -> Result<RecordBatch> {
        let fields: Vec<FieldRef> = Self::schema().fields().iter().cloned().collect();
        Ok(serde_arrow::to_record_batch(&fields, &models)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Array;

    fn sample(patient_id: i64) -> Record {
        Record {
            patient_id,
            blood_pressure_abnormality: 1,
            hemoglobin_level: 11.3,
            genetic_pedigree_coefficient: Some(0.52),
            age: 34,
            bmi: 31.2,
            sex: 0,
            pregnancy: None,
            smoking: 1,
            physical_activity_hours: 4.5,
            salt_intake: 6.1,
            alcohol_units: None,
            stress_level: 8,
            chronic_kidney_disease: 1,
            adrenal_thyroid_disorder: 0,
        }
    }

    #[test]
    fn test_diagnosis_flags() {
        let record = sample(1);
        assert!(record.has_chronic_kidney_disease());
        assert!(!record.has_adrenal_thyroid_disorder());
    }

    #[test]
    fn test_record_batch_keeps_nulls() {
        let records = vec![sample(1), sample(2)];
        let batch = Record::to_record_batch(&records).unwrap();

        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.schema().as_ref(), &Record::schema());
        let pregnancy = batch.column_by_name(schema::PREGNANCY).unwrap();
        assert_eq!(pregnancy.null_count(), 2);

        let decoded = Record::from_record_batch(&batch).unwrap();
        assert_eq!(decoded, records);
    }

    #[test]
    fn test_json_uses_source_column_names() {
        let json = serde_json::to_value(sample(42)).unwrap();
        assert_eq!(json["Patient_Number"], 42);
        assert_eq!(json["salt_content_in_the_diet"], 6.1);
        assert!(json["Pregnancy"].is_null());
    }
}
