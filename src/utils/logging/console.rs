//! Console output utilities
//!
//! Plain-text renderings of the dataset preview, a patient record, the
//! recorded diagnosis, and a rule assessment.

use itertools::Itertools;

use crate::algorithm::Assessment;
use crate::models::Record;
use crate::schema::record_schema;

const MISSING: &str = "-";

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}

/// Cell values of a record in column order
fn record_cells(r: &Record) -> Vec<String> {
    vec![
        r.patient_id.to_string(),
        r.blood_pressure_abnormality.to_string(),
        r.hemoglobin_level.to_string(),
        optional(r.genetic_pedigree_coefficient),
        r.age.to_string(),
        r.bmi.to_string(),
        r.sex.to_string(),
        optional(r.pregnancy),
        r.smoking.to_string(),
        r.physical_activity_hours.to_string(),
        r.salt_intake.to_string(),
        optional(r.alcohol_units),
        r.stress_level.to_string(),
        r.chronic_kidney_disease.to_string(),
        r.adrenal_thyroid_disorder.to_string(),
    ]
}

fn column_names() -> Vec<String> {
    record_schema()
        .fields()
        .iter()
        .map(|field| field.name().clone())
        .collect()
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

/// Render rows as a right-aligned table with the source column names
#[must_use]
pub fn format_preview(records: &[Record]) -> String {
    let header = column_names();
    let rows = records.iter().map(record_cells).collect_vec();

    let widths = header
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            rows.iter()
                .map(|row| row[idx].len())
                .chain(std::iter::once(name.len()))
                .max()
                .unwrap_or_default()
        })
        .collect_vec();

    let render = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:>width$}"))
            .join("  ")
    };

    std::iter::once(&header)
        .chain(&rows)
        .map(|cells| render(cells.as_slice()) + "\n")
        .collect()
}

/// Render one record as `column: value` lines
#[must_use]
pub fn format_record(record: &Record) -> String {
    let names = column_names();
    let width = names.iter().map(String::len).max().unwrap_or_default();

    names
        .iter()
        .zip(record_cells(record))
        .map(|(name, value)| format!("{name:<width$}  {value}\n"))
        .collect()
}

/// Render the recorded diagnosis of a stored row as Yes/No
#[must_use]
pub fn format_recorded_diagnosis(record: &Record) -> String {
    format!(
        "Chronic Kidney Disease: {}\nAdrenal and Thyroid Disorders: {}\n",
        yes_no(record.has_chronic_kidney_disease()),
        yes_no(record.has_adrenal_thyroid_disorder()),
    )
}

/// Render a rule assessment as Likely/Unlikely
#[must_use]
pub fn format_assessment(assessment: &Assessment) -> String {
    format!(
        "Adrenal/Thyroid Disorder: {}\nChronic Kidney Disease: {}\n",
        assessment.adrenal_thyroid_likelihood(),
        assessment.chronic_kidney_likelihood(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test::record_with_id;

    #[test]
    fn test_preview_has_header_and_rows() {
        let records = vec![record_with_id(1), record_with_id(2)];
        let table = format_preview(&records);
        let lines = table.lines().collect_vec();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].trim_start().starts_with("Patient_Number"));
        assert!(lines[0].ends_with("Adrenal_and_thyroid_disorders"));
        assert!(lines[2].trim_start().starts_with('2'));
    }

    #[test]
    fn test_preview_of_no_rows_is_header_only() {
        let table = format_preview(&[]);
        assert_eq!(table.lines().count(), 1);
        assert!(table.ends_with("Adrenal_and_thyroid_disorders\n"));
    }

    #[test]
    fn test_preview_columns_align() {
        let mut wide = record_with_id(123_456);
        wide.alcohol_units = None;
        let table = format_preview(&[record_with_id(1), wide]);
        let lengths = table.lines().map(str::len).collect_vec();
        assert!(lengths.iter().all_equal());
    }

    #[test]
    fn test_record_shows_missing_values() {
        let mut record = record_with_id(7);
        record.pregnancy = None;
        let text = format_record(&record);

        let pregnancy = text.lines().find(|l| l.starts_with("Pregnancy")).unwrap();
        assert!(pregnancy.ends_with(MISSING));
        assert_eq!(text.lines().count(), 15);
    }

    #[test]
    fn test_recorded_diagnosis() {
        let mut record = record_with_id(7);
        record.chronic_kidney_disease = 1;
        assert_eq!(
            format_recorded_diagnosis(&record),
            "Chronic Kidney Disease: Yes\nAdrenal and Thyroid Disorders: No\n"
        );
    }

    #[test]
    fn test_assessment_labels() {
        let assessment = Assessment {
            adrenal_thyroid: true,
            chronic_kidney: false,
        };
        assert_eq!(
            format_assessment(&assessment),
            "Adrenal/Thyroid Disorder: Likely\nChronic Kidney Disease: Unlikely\n"
        );
    }
}
