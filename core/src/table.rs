//! Barcode count tables and aggregation.

use std::cmp::Reverse;

use indexmap::IndexMap;

use crate::barcode::Barcode;

pub mod io;

/// A single row of a count table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// The barcode observed.
    pub event: Barcode,
    /// The number of reads supporting it.
    pub count: u64,
}

impl Record {
    /// Creates a record.
    pub fn new(event: Barcode, count: u64) -> Self {
        Self { event, count }
    }
}

/// A sample's table of barcode read counts.
///
/// A freshly read table may contain duplicate events; [`CountTable::clean`]
/// normalizes and collapses it so that every event occurs in at most one
/// row.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CountTable {
    records: Vec<Record>,
}

impl CountTable {
    /// Creates a table from its rows.
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Returns the rows in order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the total read count over all rows.
    pub fn total_count(&self) -> u64 {
        self.records.iter().map(|record| record.count).sum()
    }

    /// Normalizes noisy events and collapses duplicates.
    ///
    /// Every row whose event contains a substitution call is replaced by its
    /// normalized form; rows without one pass through unchanged. Rows that
    /// share an event after normalization are merged by summing their
    /// counts, in a single pass over an insertion-ordered map. The result is
    /// sorted by count descending, with ties broken by event string
    /// ascending, so output order is reproducible. The total read count is
    /// conserved, and the operation is idempotent.
    pub fn clean(&self) -> Self {
        let mut collapsed: IndexMap<Barcode, u64> = IndexMap::new();

        for record in &self.records {
            let event = if record.event.has_mismatch() {
                record.event.normalize()
            } else {
                record.event.clone()
            };

            *collapsed.entry(event).or_insert(0) += record.count;
        }

        let mut records = collapsed
            .into_iter()
            .map(|(event, count)| Record::new(event, count))
            .collect::<Vec<_>>();

        records.sort_by_cached_key(|record| (Reverse(record.count), record.event.to_string()));

        Self::new(records)
    }

    /// Returns the table without the unedited reference row, if present.
    pub fn without_reference(&self) -> Self {
        Self::new(
            self.records
                .iter()
                .filter(|record| !record.event.is_reference())
                .cloned()
                .collect(),
        )
    }
}

impl FromIterator<Record> for CountTable {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use crate::assay::Assay;

    pub(crate) fn table(rows: &[(&str, u64)]) -> CountTable {
        rows.iter()
            .map(|&(s, count)| {
                let assay = Assay::new(s.split('_').count());
                let event = Barcode::parse(s, &assay).expect("failed to parse barcode");
                Record::new(event, count)
            })
            .collect()
    }

    fn events(table: &CountTable) -> Vec<(String, u64)> {
        table
            .records()
            .iter()
            .map(|record| (record.event.to_string(), record.count))
            .collect()
    }

    #[test]
    fn test_clean_collapses_duplicates() {
        let cleaned = table(&[("NONE_NONE", 3), ("NONE_NONE", 2)]).clean();

        assert_eq!(events(&cleaned), [(String::from("NONE_NONE"), 5)]);
    }

    #[test]
    fn test_clean_normalizes_then_collapses() {
        let raw = table(&[("12D_NONE", 4), ("12D_5M2S", 3), ("NONE_2S", 2)]);
        let cleaned = raw.clean();

        assert_eq!(
            events(&cleaned),
            [
                (String::from("12D_NONE"), 7),
                (String::from("NONE_NONE"), 2),
            ]
        );
    }

    #[test]
    fn test_clean_conserves_total_count() {
        let raw = table(&[("12D_5M2S", 11), ("NONE_2S&3I", 7), ("12D_NONE", 5)]);

        assert_eq!(raw.clean().total_count(), raw.total_count());
    }

    #[test]
    fn test_clean_events_unique() {
        let cleaned = table(&[("12D_2S", 1), ("12D_3S", 1), ("12D_NONE", 1)]).clean();

        assert_eq!(events(&cleaned), [(String::from("12D_NONE"), 3)]);
    }

    #[test]
    fn test_clean_sorts_by_count_descending() {
        let cleaned = table(&[("A_NONE", 1), ("B_NONE", 5), ("C_NONE", 3)]).clean();

        assert_eq!(
            events(&cleaned),
            [
                (String::from("B_NONE"), 5),
                (String::from("C_NONE"), 3),
                (String::from("A_NONE"), 1),
            ]
        );
    }

    #[test]
    fn test_clean_breaks_ties_by_event_string() {
        let cleaned = table(&[("C_NONE", 2), ("A_NONE", 2), ("B_NONE", 2)]).clean();

        assert_eq!(
            events(&cleaned),
            [
                (String::from("A_NONE"), 2),
                (String::from("B_NONE"), 2),
                (String::from("C_NONE"), 2),
            ]
        );
    }

    #[test]
    fn test_clean_idempotent() {
        let cleaned = table(&[("12D_5M2S", 3), ("12D_NONE", 2), ("NONE_2S", 1)]).clean();

        assert_eq!(cleaned.clean(), cleaned);
    }

    #[test]
    fn test_without_reference() {
        let stripped = table(&[("NONE_NONE", 9), ("12D_NONE", 1)]).without_reference();

        assert_eq!(events(&stripped), [(String::from("12D_NONE"), 1)]);
        assert_eq!(stripped.total_count(), 1);
    }
}
