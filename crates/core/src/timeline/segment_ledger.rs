use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::selection::domain::selection::Selection;
use crate::timeline::domain::segment::Segment;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LedgerError {
    #[error("segment label is empty")]
    EmptyLabel,
    #[error("no segment at index {index} (have {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Ordered list of labeled segments. Insertion order is display and export
/// order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SegmentLedger {
    segments: Vec<Segment>,
}

impl SegmentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Appends a segment covering `range`. The label is stored as typed but
    /// must contain something other than whitespace.
    pub fn append(
        &mut self,
        label: &str,
        range: Selection,
        created_at: DateTime<Utc>,
    ) -> Result<&Segment, LedgerError> {
        if label.trim().is_empty() {
            return Err(LedgerError::EmptyLabel);
        }
        self.segments.push(Segment::new(label, range, created_at));
        let index = self.segments.len() - 1;
        Ok(&self.segments[index])
    }

    /// Removes the segment at `index`; later segments shift down by one.
    pub fn delete(&mut self, index: usize) -> Result<Segment, LedgerError> {
        if index >= self.segments.len() {
            return Err(LedgerError::IndexOutOfRange {
                index,
                len: self.segments.len(),
            });
        }
        Ok(self.segments.remove(index))
    }

    /// Replaces every segment, as-is.
    pub fn replace_all(&mut self, segments: Vec<Segment>) {
        self.segments = segments;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn ledger_with(labels: &[&str]) -> SegmentLedger {
        let mut ledger = SegmentLedger::new();
        for (i, label) in labels.iter().enumerate() {
            let start = i as f64 * 10.0;
            ledger
                .append(label, Selection::new(start, start + 5.0), now())
                .unwrap();
        }
        ledger
    }

    fn labels(ledger: &SegmentLedger) -> Vec<&str> {
        ledger.segments().iter().map(|s| s.query.as_str()).collect()
    }

    #[test]
    fn test_append_grows_by_one_with_selection_bounds() {
        let mut ledger = ledger_with(&["a"]);
        let seg = ledger
            .append("guitar solo", Selection::new(30.0, 45.0), now())
            .unwrap()
            .clone();

        assert_eq!(ledger.len(), 2);
        assert_eq!(seg.query, "guitar solo");
        assert_eq!(seg.start_time, 30.0);
        assert_eq!(seg.end_time, 45.0);
    }

    #[test]
    fn test_append_keeps_label_untrimmed() {
        let mut ledger = SegmentLedger::new();
        ledger
            .append("  spaced  ", Selection::new(0.0, 1.0), now())
            .unwrap();
        assert_eq!(ledger.segments()[0].query, "  spaced  ");
    }

    #[rstest]
    #[case::empty("")]
    #[case::spaces("   ")]
    #[case::tabs_and_newlines("\t\n ")]
    fn test_append_rejects_blank_label(#[case] label: &str) {
        let mut ledger = ledger_with(&["a", "b"]);
        let err = ledger
            .append(label, Selection::new(0.0, 1.0), now())
            .unwrap_err();
        assert_eq!(err, LedgerError::EmptyLabel);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let ledger = ledger_with(&["first", "second", "third"]);
        assert_eq!(labels(&ledger), vec!["first", "second", "third"]);
    }

    #[rstest]
    #[case::first(0, vec!["b", "c", "d"])]
    #[case::middle(2, vec!["a", "b", "d"])]
    #[case::last(3, vec!["a", "b", "c"])]
    fn test_delete_removes_exactly_one(#[case] index: usize, #[case] expected: Vec<&str>) {
        let mut ledger = ledger_with(&["a", "b", "c", "d"]);
        let removed = ledger.delete(index).unwrap();
        assert_eq!(removed.query, ["a", "b", "c", "d"][index]);
        assert_eq!(labels(&ledger), expected);
    }

    #[test]
    fn test_delete_out_of_range() {
        let mut ledger = ledger_with(&["a"]);
        assert_eq!(
            ledger.delete(1).unwrap_err(),
            LedgerError::IndexOutOfRange { index: 1, len: 1 }
        );
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_replace_all_is_verbatim() {
        let mut ledger = ledger_with(&["a"]);
        let imported = vec![Segment {
            query: "backwards".to_string(),
            start_time: 50.0,
            end_time: 10.0,
            timestamp: Some("not a date".to_string()),
            ..Segment::default()
        }];
        ledger.replace_all(imported.clone());
        assert_eq!(ledger.segments(), &imported[..]);
    }
}
