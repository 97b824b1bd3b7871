//! Load progress messages
//!
//! The loader reports through these so the wording stays in one place.

use std::path::Path;
use std::time::Duration;

/// Log that loading of a data file has begun
pub fn log_load_start(path: &Path) {
    log::info!("Loading patient data from {}", path.display());
}

/// One-line summary of a finished load
#[must_use]
pub fn load_summary(path: &Path, rows: usize, elapsed: Duration) -> String {
    format!(
        "Loaded {rows} patient records from {} in {elapsed:.2?}",
        path.display()
    )
}

/// Log the load summary
pub fn log_load_complete(path: &Path, rows: usize, elapsed: Duration) {
    log::info!("{}", load_summary(path, rows, elapsed));
}

/// Describe repeated patient numbers, given `(patient_id, occurrences)` pairs
/// sorted by id. `None` when nothing repeats.
#[must_use]
pub fn duplicate_ids_message(path: &Path, duplicates: &[(i64, usize)]) -> Option<String> {
    let &(patient_id, occurrences) = duplicates.first()?;
    Some(format!(
        "{} patient numbers occur more than once in {}, lookups return the first row (e.g. {patient_id} x{occurrences})",
        duplicates.len(),
        path.display()
    ))
}

/// Warn about repeated patient numbers that were kept
pub fn log_duplicate_ids(path: &Path, duplicates: &[(i64, usize)]) {
    if let Some(message) = duplicate_ids_message(path, duplicates) {
        log::warn!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_summary() {
        let summary = load_summary(Path::new("data/patients.csv"), 2000, Duration::from_millis(1500));
        assert_eq!(summary, "Loaded 2000 patient records from data/patients.csv in 1.50s");
    }

    #[test]
    fn test_duplicate_ids_message() {
        let path = Path::new("patients.csv");
        assert_eq!(duplicate_ids_message(path, &[]), None);

        let message = duplicate_ids_message(path, &[(4, 3), (9, 2)]).unwrap();
        assert!(message.starts_with("2 patient numbers occur more than once in patients.csv"));
        assert!(message.ends_with("(e.g. 4 x3)"));
    }
}
