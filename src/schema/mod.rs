//! Arrow schema for the patient dataset and column adaptation.
//!
//! CSV and Parquet batches may carry the same columns with wider or different
//! numeric types, so both go through [`adapt_record_batch`] before
//! deserialization.

use std::sync::{Arc, LazyLock};

use arrow::array::{ArrayRef, AsArray};
use arrow::compute::kernels::cast::{CastOptions, can_cast_types, cast_with_options};
use arrow::datatypes::{DataType, Field, Float64Type, Schema, SchemaRef};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use log::debug;

use crate::error::{Error, Result};

pub const PATIENT_NUMBER: &str = "Patient_Number";
pub const BLOOD_PRESSURE_ABNORMALITY: &str = "Blood_Pressure_Abnormality";
pub const LEVEL_OF_HEMOGLOBIN: &str = "Level_of_Hemoglobin";
pub const GENETIC_PEDIGREE_COEFFICIENT: &str = "Genetic_Pedigree_Coefficient";
pub const AGE: &str = "Age";
pub const BMI: &str = "BMI";
pub const SEX: &str = "Sex";
pub const PREGNANCY: &str = "Pregnancy";
pub const SMOKING: &str = "Smoking";
pub const PHYSICAL_ACTIVITY: &str = "Physical_activity";
pub const SALT_CONTENT: &str = "salt_content_in_the_diet";
pub const ALCOHOL_CONSUMPTION: &str = "alcohol_consumption_per_day";
pub const LEVEL_OF_STRESS: &str = "Level_of_Stress";
pub const CHRONIC_KIDNEY_DISEASE: &str = "Chronic_kidney_disease";
pub const ADRENAL_AND_THYROID_DISORDERS: &str = "Adrenal_and_thyroid_disorders";

static RECORD_SCHEMA: LazyLock<SchemaRef> = LazyLock::new(|| {
    Arc::new(Schema::new(vec![
        Field::new(PATIENT_NUMBER, DataType::Int64, false),
        Field::new(BLOOD_PRESSURE_ABNORMALITY, DataType::UInt8, false),
        Field::new(LEVEL_OF_HEMOGLOBIN, DataType::Float64, false),
        Field::new(GENETIC_PEDIGREE_COEFFICIENT, DataType::Float64, true),
        Field::new(AGE, DataType::UInt32, false),
        Field::new(BMI, DataType::Float64, false),
        Field::new(SEX, DataType::UInt8, false),
        Field::new(PREGNANCY, DataType::UInt8, true),
        Field::new(SMOKING, DataType::UInt8, false),
        Field::new(PHYSICAL_ACTIVITY, DataType::Float64, false),
        Field::new(SALT_CONTENT, DataType::Float64, false),
        Field::new(ALCOHOL_CONSUMPTION, DataType::Float64, true),
        Field::new(LEVEL_OF_STRESS, DataType::UInt8, false),
        Field::new(CHRONIC_KIDNEY_DISEASE, DataType::UInt8, false),
        Field::new(ADRENAL_AND_THYROID_DISORDERS, DataType::UInt8, false),
    ]))
});

/// The schema every loaded batch is decoded or adapted into
#[must_use]
pub fn record_schema() -> SchemaRef {
    Arc::clone(&RECORD_SCHEMA)
}

/// Get a column from a record batch, cast to the expected type when needed
///
/// # Errors
/// Returns [`Error::ColumnNotFound`] if the column is absent, or an Arrow
/// error if the cast is unsupported or fails.
pub fn get_column(batch: &RecordBatch, column_name: &str, expected_type: &DataType) -> Result<ArrayRef> {
    let idx = batch
        .schema()
        .index_of(column_name)
        .map_err(|_| Error::ColumnNotFound {
            column: column_name.to_string(),
        })?;

    let column = batch.column(idx);
    let actual_type = column.data_type();
    if actual_type == expected_type {
        return Ok(Arc::clone(column));
    }

    if !can_cast_types(actual_type, expected_type) {
        return Err(ArrowError::CastError(format!(
            "Column '{column_name}' has type {actual_type:?} which cannot be cast to {expected_type:?}"
        ))
        .into());
    }

    if actual_type.is_floating() && expected_type.is_integer() {
        ensure_whole_numbers(column, column_name)?;
    }

    debug!("Converting column '{column_name}' from {actual_type:?} to {expected_type:?}");
    let options = CastOptions {
        safe: false,
        ..Default::default()
    };
    Ok(cast_with_options(column, expected_type, &options)?)
}

/// Float to integer casts truncate, so reject `1.5` before it becomes `1`.
fn ensure_whole_numbers(column: &ArrayRef, column_name: &str) -> Result<()> {
    let options = CastOptions {
        safe: false,
        ..Default::default()
    };
    let floats = cast_with_options(column, &DataType::Float64, &options)?;
    if let Some(value) = floats
        .as_primitive::<Float64Type>()
        .iter()
        .flatten()
        .find(|value| value.fract() != 0.0)
    {
        return Err(ArrowError::CastError(format!(
            "Column '{column_name}' holds {value}, which is not a whole number"
        ))
        .into());
    }
    Ok(())
}

/// Project and cast a batch onto [`record_schema`].
///
/// Columns not in the record schema are dropped. Casting is checked, so a
/// value that does not fit the target type becomes an error rather than a
/// silent null.
pub fn adapt_record_batch(batch: &RecordBatch) -> Result<RecordBatch> {
    let schema = record_schema();
    let columns = schema
        .fields()
        .iter()
        .map(|field| get_column(batch, field.name(), field.data_type()))
        .collect::<Result<Vec<_>>>()?;

    Ok(RecordBatch::try_new(schema, columns)?)
}
