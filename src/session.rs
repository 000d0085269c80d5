//! Annotation session state machine.
//!
//! A `Session` walks an ordered sequence of row identifiers (the
//! pagination sequence), one row at a time, and collects measurements
//! keyed by `(row, column, kind)`. It knows nothing about rendering;
//! adapters drive it through `Panel` and read state back through
//! `saved_measure` and `measurements`.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dataset::RecordTable;
use crate::measures::MeasureSet;

/// Identifies one row of the record source by position.
pub type RowId = usize;

/// Validation failures raised by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A column selection or measurement names a column the table does not have.
    #[error("unknown column '{column}'")]
    InvalidColumn { column: String },
    /// A recorded measure is not part of the applicable vocabulary.
    #[error("measure '{measure}' is not in the {vocabulary} vocabulary")]
    InvalidMeasure {
        measure: String,
        vocabulary: &'static str,
    },
    /// A sample was requested that exceeds the number of available rows.
    #[error("sample size {requested} exceeds the {available} available rows")]
    InvalidSampleSize { requested: usize, available: usize },
    /// A pagination entry points outside the record source.
    #[error("pagination entry {row} is out of range ({rows} rows)")]
    InvalidPaginationEntry { row: RowId, rows: usize },
}

/// Whether a measurement applies to the whole record or to one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasureKind {
    Overall,
    Column,
}

/// The target of one judgment: the whole record, or a named column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeasureSlot {
    Overall,
    Column(String),
}

impl MeasureSlot {
    pub fn kind(&self) -> MeasureKind {
        match self {
            MeasureSlot::Overall => MeasureKind::Overall,
            MeasureSlot::Column(_) => MeasureKind::Column,
        }
    }

    pub fn column_name(&self) -> Option<&str> {
        match self {
            MeasureSlot::Overall => None,
            MeasureSlot::Column(column) => Some(column),
        }
    }
}

/// One annotation event. `column` and `value` are empty for overall
/// judgments; `value` snapshots the cell content at annotation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    pub row_identifier: RowId,
    pub column: Option<String>,
    pub value: Option<String>,
    pub measure: String,
    pub kind: MeasureKind,
}

/// The annotation session: column selection, measure vocabularies,
/// pagination cursor, and the measurement log.
#[derive(Debug, Clone)]
pub struct Session {
    columns: Vec<String>,
    measures: MeasureSet,
    pagination: Vec<RowId>,
    /// Position into `pagination`; `None` once the sequence is exhausted.
    cursor: Option<usize>,
    measurements: Vec<Measurement>,
}

impl Session {
    /// Create a session over `table`.
    ///
    /// `columns` must all exist in the table. `pagination`, when given,
    /// fixes which rows are visited and in what order (repeats allowed);
    /// otherwise every row is visited in natural order.
    pub fn new(
        table: &RecordTable,
        columns: Vec<String>,
        measures: MeasureSet,
        pagination: Option<Vec<RowId>>,
    ) -> Result<Self, SessionError> {
        for column in &columns {
            if !table.has_column(column) {
                return Err(SessionError::InvalidColumn {
                    column: column.clone(),
                });
            }
        }

        let rows = table.row_count();
        let pagination = pagination.unwrap_or_else(|| (0..rows).collect());
        for &row in &pagination {
            if row >= rows {
                return Err(SessionError::InvalidPaginationEntry { row, rows });
            }
        }

        let cursor = if pagination.is_empty() { None } else { Some(0) };
        Ok(Self {
            columns,
            measures,
            pagination,
            cursor,
            measurements: Vec::new(),
        })
    }

    /// The row identifier under the cursor, or `None` once exhausted.
    pub fn current(&self) -> Option<RowId> {
        self.cursor.map(|position| self.pagination[position])
    }

    /// 1-based cursor position and pagination length, for display.
    pub fn position(&self) -> Option<(usize, usize)> {
        self.cursor
            .map(|position| (position + 1, self.pagination.len()))
    }

    /// Step the cursor to the next pagination element. Past the last
    /// element the cursor becomes exhausted and stays exhausted.
    pub fn advance(&mut self) {
        self.cursor = match self.cursor {
            Some(position) if position + 1 < self.pagination.len() => Some(position + 1),
            _ => None,
        };
    }

    /// Step the cursor back one position. No-op at the first element and
    /// no-op once exhausted.
    pub fn retreat(&mut self) {
        if let Some(position) = self.cursor {
            if position > 0 {
                self.cursor = Some(position - 1);
            }
        }
    }

    /// Insert or update the measurement for `(row, slot)`.
    ///
    /// `measure = None` models a deselected control: nothing is written
    /// and any prior measurement for the slot is left untouched. A
    /// second recording for the same slot replaces the earlier one in
    /// place rather than appending.
    pub fn record(
        &mut self,
        row: RowId,
        slot: &MeasureSlot,
        value: Option<String>,
        measure: Option<&str>,
    ) -> Result<(), SessionError> {
        let Some(measure) = measure else {
            return Ok(());
        };

        let vocabulary = match slot {
            MeasureSlot::Overall => self.measures.overall.as_deref(),
            MeasureSlot::Column(column) => {
                if !self.columns.iter().any(|c| c == column) {
                    return Err(SessionError::InvalidColumn {
                        column: column.clone(),
                    });
                }
                self.measures.each.as_deref()
            }
        };
        let name = match slot {
            MeasureSlot::Overall => "overall",
            MeasureSlot::Column(_) => "each",
        };
        let admitted = vocabulary.is_some_and(|options| options.iter().any(|o| o == measure));
        if !admitted {
            return Err(SessionError::InvalidMeasure {
                measure: measure.to_string(),
                vocabulary: name,
            });
        }

        let kind = slot.kind();
        let column = slot.column_name().map(str::to_string);
        // Overall judgments carry no cell snapshot.
        let value = match slot {
            MeasureSlot::Overall => None,
            MeasureSlot::Column(_) => value,
        };

        if let Some(existing) = self.measurements.iter_mut().find(|m| {
            m.row_identifier == row && m.column.as_deref() == column.as_deref() && m.kind == kind
        }) {
            existing.measure = measure.to_string();
            existing.value = value;
            return Ok(());
        }

        self.measurements.push(Measurement {
            row_identifier: row,
            column,
            value,
            measure: measure.to_string(),
            kind,
        });
        Ok(())
    }

    /// The latest recorded measure for `(row, slot)`, used to pre-populate
    /// controls when a row is revisited.
    pub fn saved_measure(&self, row: RowId, slot: &MeasureSlot) -> Option<&str> {
        let kind = slot.kind();
        let column = slot.column_name();
        self.measurements
            .iter()
            .find(|m| m.row_identifier == row && m.column.as_deref() == column && m.kind == kind)
            .map(|m| m.measure.as_str())
    }

    /// The full measurement log in insertion order.
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// The selected columns, in presentation order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The configured measure vocabularies.
    pub fn measures(&self) -> &MeasureSet {
        &self.measures
    }

    /// Draw `n` distinct row identifiers from `table` without replacement.
    /// The same `seed` over the same table yields the same rows in the
    /// same order across runs.
    pub fn sample_rows(
        table: &RecordTable,
        n: usize,
        seed: Option<u64>,
    ) -> Result<Vec<RowId>, SessionError> {
        let available = table.row_count();
        if n > available {
            return Err(SessionError::InvalidSampleSize {
                requested: n,
                available,
            });
        }

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(rand::seq::index::sample(&mut rng, available, n).into_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: usize) -> RecordTable {
        let columns = vec!["c1".to_string(), "c2".to_string()];
        let rows = (0..rows)
            .map(|i| vec![format!("a{i}"), format!("b{i}")])
            .collect();
        RecordTable::new(columns, rows).unwrap()
    }

    fn each_measures(options: &[&str]) -> MeasureSet {
        MeasureSet {
            overall: None,
            each: Some(options.iter().map(|o| o.to_string()).collect()),
        }
    }

    fn column(name: &str) -> MeasureSlot {
        MeasureSlot::Column(name.to_string())
    }

    #[test]
    fn default_pagination_starts_at_first_row() {
        let t = table(3);
        let session = Session::new(&t, vec!["c1".into()], MeasureSet::default(), None).unwrap();
        assert_eq!(session.current(), Some(0));
        assert_eq!(session.position(), Some((1, 3)));
    }

    #[test]
    fn empty_table_starts_exhausted() {
        let t = table(0);
        let session = Session::new(&t, vec![], MeasureSet::default(), None).unwrap();
        assert_eq!(session.current(), None);
        assert_eq!(session.position(), None);
    }

    #[test]
    fn advancing_past_the_end_stays_exhausted() {
        let t = table(3);
        let mut session =
            Session::new(&t, vec!["c1".into()], MeasureSet::default(), Some(vec![2, 0])).unwrap();
        assert_eq!(session.current(), Some(2));
        session.advance();
        assert_eq!(session.current(), Some(0));
        session.advance();
        assert_eq!(session.current(), None);
        session.advance();
        assert_eq!(session.current(), None);
    }

    #[test]
    fn retreat_steps_back_and_stops_at_the_first_element() {
        let t = table(3);
        let mut session = Session::new(&t, vec!["c1".into()], MeasureSet::default(), None).unwrap();
        session.advance();
        assert_eq!(session.current(), Some(1));
        session.retreat();
        assert_eq!(session.current(), Some(0));
        session.retreat();
        assert_eq!(session.current(), Some(0));
    }

    #[test]
    fn retreat_after_exhaustion_is_a_noop() {
        let t = table(1);
        let mut session = Session::new(&t, vec!["c1".into()], MeasureSet::default(), None).unwrap();
        session.advance();
        assert_eq!(session.current(), None);
        session.retreat();
        assert_eq!(session.current(), None);
    }

    #[test]
    fn retreat_handles_repeated_identifiers_by_position() {
        let t = table(2);
        let mut session = Session::new(
            &t,
            vec!["c1".into()],
            MeasureSet::default(),
            Some(vec![1, 1, 0]),
        )
        .unwrap();
        session.advance();
        session.advance();
        assert_eq!(session.current(), Some(0));
        session.retreat();
        assert_eq!(session.position(), Some((2, 3)));
        session.retreat();
        assert_eq!(session.position(), Some((1, 3)));
    }

    #[test]
    fn record_then_saved_measure_round_trips() {
        let t = table(3);
        let mut session =
            Session::new(&t, vec!["c1".into()], each_measures(&["Yes", "No"]), None).unwrap();
        session
            .record(0, &column("c1"), Some("a0".into()), Some("Yes"))
            .unwrap();
        assert_eq!(session.saved_measure(0, &column("c1")), Some("Yes"));
        assert_eq!(session.saved_measure(1, &column("c1")), None);
    }

    #[test]
    fn recording_twice_replaces_in_place() {
        let t = table(3);
        let mut session =
            Session::new(&t, vec!["c1".into()], each_measures(&["Yes", "No"]), None).unwrap();
        session
            .record(0, &column("c1"), Some("a0".into()), Some("Yes"))
            .unwrap();
        session
            .record(0, &column("c1"), Some("a0".into()), Some("No"))
            .unwrap();
        assert_eq!(session.measurements().len(), 1);
        assert_eq!(session.measurements()[0].measure, "No");
    }

    #[test]
    fn unset_measure_writes_nothing_and_clears_nothing() {
        let t = table(3);
        let mut session =
            Session::new(&t, vec!["c1".into()], each_measures(&["Yes", "No"]), None).unwrap();
        session.record(0, &column("c1"), None, None).unwrap();
        assert!(session.measurements().is_empty());

        session
            .record(0, &column("c1"), Some("a0".into()), Some("Yes"))
            .unwrap();
        session.record(0, &column("c1"), None, None).unwrap();
        assert_eq!(session.saved_measure(0, &column("c1")), Some("Yes"));
    }

    #[test]
    fn overall_and_column_slots_are_distinct_triples() {
        let t = table(3);
        let measures = MeasureSet {
            overall: Some(vec!["Good".into(), "Bad".into()]),
            each: Some(vec!["Yes".into(), "No".into()]),
        };
        let mut session = Session::new(&t, vec!["c1".into()], measures, None).unwrap();
        session
            .record(0, &MeasureSlot::Overall, None, Some("Good"))
            .unwrap();
        session
            .record(0, &column("c1"), Some("a0".into()), Some("Yes"))
            .unwrap();
        assert_eq!(session.measurements().len(), 2);
        assert_eq!(session.saved_measure(0, &MeasureSlot::Overall), Some("Good"));
        assert_eq!(session.saved_measure(0, &column("c1")), Some("Yes"));
    }

    #[test]
    fn overall_measurements_carry_no_snapshot() {
        let t = table(1);
        let measures = MeasureSet {
            overall: Some(vec!["Good".into()]),
            each: None,
        };
        let mut session = Session::new(&t, vec!["c1".into()], measures, None).unwrap();
        session
            .record(0, &MeasureSlot::Overall, Some("ignored".into()), Some("Good"))
            .unwrap();
        assert_eq!(session.measurements()[0].value, None);
        assert_eq!(session.measurements()[0].column, None);
    }

    #[test]
    fn unknown_measure_is_rejected_without_mutation() {
        let t = table(3);
        let mut session =
            Session::new(&t, vec!["c1".into()], each_measures(&["Yes", "No"]), None).unwrap();
        let err = session
            .record(0, &column("c1"), Some("a0".into()), Some("Maybe"))
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidMeasure { .. }));
        assert!(session.measurements().is_empty());
    }

    #[test]
    fn absent_vocabulary_admits_nothing() {
        let t = table(3);
        let mut session =
            Session::new(&t, vec!["c1".into()], MeasureSet::default(), None).unwrap();
        let err = session
            .record(0, &MeasureSlot::Overall, None, Some("Good"))
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidMeasure { .. }));
    }

    #[test]
    fn unknown_column_is_rejected_at_construction() {
        let t = table(3);
        let err =
            Session::new(&t, vec!["missing".into()], MeasureSet::default(), None).unwrap_err();
        assert!(matches!(err, SessionError::InvalidColumn { .. }));
    }

    #[test]
    fn unknown_column_is_rejected_at_record_time() {
        let t = table(3);
        let mut session =
            Session::new(&t, vec!["c1".into()], each_measures(&["Yes"]), None).unwrap();
        let err = session
            .record(0, &column("c2"), None, Some("Yes"))
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidColumn { .. }));
    }

    #[test]
    fn out_of_range_pagination_entry_is_rejected() {
        let t = table(3);
        let err = Session::new(
            &t,
            vec!["c1".into()],
            MeasureSet::default(),
            Some(vec![0, 3]),
        )
        .unwrap_err();
        assert!(matches!(err, SessionError::InvalidPaginationEntry { .. }));
    }

    #[test]
    fn seeded_sampling_is_reproducible_and_distinct() {
        let t = table(30);
        let first = Session::sample_rows(&t, 10, Some(42)).unwrap();
        let second = Session::sample_rows(&t, 10, Some(42)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 10);
        let mut sorted = first.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 10);
    }

    #[test]
    fn oversized_sample_is_rejected() {
        let t = table(3);
        let err = Session::sample_rows(&t, 4, Some(1)).unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidSampleSize {
                requested: 4,
                available: 3,
            }
        ));
    }

    // Full walk over a three-row table with a Yes/No column vocabulary.
    #[test]
    fn three_row_walkthrough() {
        let t = table(3);
        let mut session =
            Session::new(&t, vec!["c1".into()], each_measures(&["Yes", "No"]), None).unwrap();
        assert_eq!(session.current(), Some(0));

        session
            .record(0, &column("c1"), Some("a0".into()), Some("Yes"))
            .unwrap();
        assert_eq!(session.saved_measure(0, &column("c1")), Some("Yes"));

        session.advance();
        assert_eq!(session.current(), Some(1));
        session.retreat();
        assert_eq!(session.current(), Some(0));
        assert_eq!(session.saved_measure(0, &column("c1")), Some("Yes"));

        session.advance();
        session.advance();
        session.advance();
        assert_eq!(session.current(), None);
    }
}
