//! The immutable patient dataset

use itertools::{Itertools, MinMaxResult};
use rustc_hash::FxHashMap;

use crate::models::Record;

/// An ordered, immutable collection of patient records.
///
/// File order is preserved so that lookups resolve duplicate patient
/// numbers to the first occurrence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Create a dataset from records in file order
    #[must_use]
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in file order
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// The first `n` rows, or all rows if there are fewer
    #[must_use]
    pub fn head(&self, n: usize) -> &[Record] {
        &self.records[..n.min(self.records.len())]
    }

    /// Smallest and largest patient number, or `None` for an empty dataset
    #[must_use]
    pub fn id_range(&self) -> Option<(i64, i64)> {
        match self.records.iter().map(|record| record.patient_id).minmax() {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(id) => Some((id, id)),
            MinMaxResult::MinMax(min, max) => Some((min, max)),
        }
    }

    /// Patient numbers that occur more than once, with their counts, sorted by id
    #[must_use]
    pub fn duplicate_ids(&self) -> Vec<(i64, usize)> {
        let mut counts: FxHashMap<i64, usize> = FxHashMap::default();
        for record in &self.records {
            *counts.entry(record.patient_id).or_insert(0) += 1;
        }

        counts
            .into_iter()
            .filter(|&(_, count)| count > 1)
            .sorted_unstable()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test::record_with_id;

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::default();
        assert!(dataset.is_empty());
        assert_eq!(dataset.id_range(), None);
        assert!(dataset.head(10).is_empty());
    }

    #[test]
    fn test_head_caps_at_len() {
        let dataset = Dataset::from_records((1..=3).map(record_with_id).collect());
        assert_eq!(dataset.head(2).len(), 2);
        assert_eq!(dataset.head(10).len(), 3);
        assert_eq!(dataset.head(2)[1].patient_id, 2);
    }

    #[test]
    fn test_id_range_ignores_order() {
        let dataset = Dataset::from_records(vec![
            record_with_id(40),
            record_with_id(7),
            record_with_id(19),
        ]);
        assert_eq!(dataset.id_range(), Some((7, 40)));

        let single = Dataset::from_records(vec![record_with_id(101)]);
        assert_eq!(single.id_range(), Some((101, 101)));
    }

    #[test]
    fn test_duplicate_ids() {
        let dataset = Dataset::from_records(vec![
            record_with_id(3),
            record_with_id(1),
            record_with_id(3),
            record_with_id(2),
            record_with_id(1),
            record_with_id(3),
        ]);
        assert_eq!(dataset.duplicate_ids(), vec![(1, 2), (3, 3)]);
    }
}
