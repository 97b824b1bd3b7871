//! Data file loading
//!
//! Reads the whole data file into a [`Dataset`]. CSV files are decoded with
//! the Arrow CSV reader, Parquet files with the Parquet Arrow reader; both
//! paths adapt their batches onto the record schema and deserialize them
//! with `serde_arrow`.

use std::fs::File;
use std::io::Seek;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::collections::Dataset;
use crate::config::DashboardConfig;
use crate::error::{Error, Result};
use crate::models::{ArrowSchema, Record};
use crate::schema::{PATIENT_NUMBER, adapt_record_batch, record_schema};
use crate::utils::logging::{log_duplicate_ids, log_load_complete, log_load_start};

/// Supported data file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Csv,
    Parquet,
}

impl DataFormat {
    /// Detect the format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("parquet") => Ok(Self::Parquet),
            _ => Err(Error::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

fn open_data_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to open data file {}: {e}", path.display()),
        ))
    })
}

/// Build the schema the CSV reader decodes with, in header order.
///
/// Known columns get their record-schema type, except that small integer
/// columns are read as floats so exports that write `1.0` still load; the
/// whole-number check happens in [`adapt_record_batch`]. Unknown columns are
/// read as nullable strings and dropped there too.
fn csv_file_schema(header: &Schema) -> SchemaRef {
    let expected = record_schema();
    let fields = header
        .fields()
        .iter()
        .map(|field| field.name().trim_start_matches('\u{feff}').trim())
        .map(|name| match expected.field_with_name(name) {
            Ok(field) if field.name() != PATIENT_NUMBER && field.data_type().is_integer() => {
                Field::new(name, DataType::Float64, field.is_nullable())
            }
            Ok(field) => field.clone(),
            Err(_) => Field::new(name, DataType::Utf8, true),
        })
        .collect_vec();

    Arc::new(Schema::new(fields))
}

/// Read a CSV file with a header row into record batches on the record schema
pub fn read_csv(path: &Path, batch_size: usize) -> Result<Vec<RecordBatch>> {
    let mut file = open_data_file(path)?;

    let (header, _) = Format::default()
        .with_header(true)
        .infer_schema(&mut file, Some(0))?;
    let file_schema = csv_file_schema(&header);
    if let Some(missing) = record_schema()
        .fields()
        .iter()
        .find(|field| file_schema.field_with_name(field.name()).is_err())
    {
        return Err(Error::ColumnNotFound {
            column: missing.name().clone(),
        });
    }
    file.rewind()?;

    let csv = ReaderBuilder::new(file_schema)
        .with_header(true)
        .with_batch_size(batch_size)
        .build(file)?;

    csv.map(|batch| adapt_record_batch(&batch?)).collect()
}

/// Read a Parquet file into record batches on the record schema
pub fn read_parquet(path: &Path) -> Result<Vec<RecordBatch>> {
    let reader = ParquetRecordBatchReaderBuilder::try_new(open_data_file(path)?)?.build()?;

    reader.map(|batch| adapt_record_batch(&batch?)).collect()
}

/// Deserialize batches into records, preserving row order
pub fn records_from_batches(batches: &[RecordBatch]) -> Result<Vec<Record>> {
    let mut records = Vec::with_capacity(batches.iter().map(RecordBatch::num_rows).sum());
    for batch in batches {
        records.extend(Record::from_record_batch(batch)?);
    }
    Ok(records)
}

/// Load the data file named by `path` into an immutable dataset.
///
/// Duplicate patient numbers are logged and kept unless
/// `config.enforce_unique_ids` is set, in which case the first duplicate
/// found is returned as [`Error::DuplicatePatientId`].
pub fn load(path: &Path, config: &DashboardConfig) -> Result<Dataset> {
    let start = Instant::now();
    let format = DataFormat::from_path(path)?;
    log_load_start(path);

    let batches = match format {
        DataFormat::Csv => read_csv(path, config.csv_batch_size)?,
        DataFormat::Parquet => read_parquet(path)?,
    };
    let dataset = Dataset::from_records(records_from_batches(&batches)?);

    let duplicates = dataset.duplicate_ids();
    if let Some(&(patient_id, occurrences)) = duplicates.first() {
        if config.enforce_unique_ids {
            return Err(Error::DuplicatePatientId {
                patient_id,
                occurrences,
            });
        }
        log_duplicate_ids(path, &duplicates);
    }

    log_load_complete(path, dataset.len(), start.elapsed());
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;

    #[test]
    fn test_format_detection() {
        assert_eq!(DataFormat::from_path(Path::new("data.csv")).unwrap(), DataFormat::Csv);
        assert_eq!(
            DataFormat::from_path(Path::new("/tmp/DATA.PARQUET")).unwrap(),
            DataFormat::Parquet
        );
        assert!(matches!(
            DataFormat::from_path(Path::new("data (3)")),
            Err(Error::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_csv_file_schema_follows_header_order() {
        let header = Schema::new(vec![
            Field::new(format!("\u{feff}{}", schema::BMI), DataType::Utf8, true),
            Field::new("Notes, free text", DataType::Utf8, true),
            Field::new(schema::PATIENT_NUMBER, DataType::Utf8, true),
            Field::new(schema::PREGNANCY, DataType::Utf8, true),
        ]);
        let file_schema = csv_file_schema(&header);

        assert_eq!(file_schema.fields().len(), 4);
        assert_eq!(file_schema.field(0).name(), schema::BMI);
        assert_eq!(file_schema.field(0).data_type(), &DataType::Float64);
        assert_eq!(file_schema.field(1).name(), "Notes, free text");
        assert_eq!(file_schema.field(1).data_type(), &DataType::Utf8);
        assert_eq!(file_schema.field(2).data_type(), &DataType::Int64);
        assert_eq!(file_schema.field(3).data_type(), &DataType::Float64);
        assert!(file_schema.field(3).is_nullable());
    }
}
