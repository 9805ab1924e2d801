//! Decision history and its persistence.
//!
//! The whole history lives under a single key in a [`KeyValueStore`] as one
//! JSON array, newest record first. Every save rewrites that value in full.

use std::collections::vec_deque::{self, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::decision::DecisionRecord;
use crate::error::{Error, Result};
use crate::storage::KeyValueStore;

/// Store key holding the serialized history.
pub const HISTORY_KEY: &str = "decisions";

/// Past decisions, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecisionHistory {
    records: VecDeque<DecisionRecord>,
}

impl DecisionHistory {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `record` in front of every existing record and return it.
    pub fn prepend(&mut self, record: DecisionRecord) -> &DecisionRecord {
        self.records.push_front(record);
        &self.records[0]
    }

    /// The most recent decision.
    #[must_use]
    pub fn latest(&self) -> Option<&DecisionRecord> {
        self.records.front()
    }

    /// Number of decisions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no decision has been made yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate from newest to oldest.
    pub fn iter(&self) -> vec_deque::Iter<'_, DecisionRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a DecisionHistory {
    type Item = &'a DecisionRecord;
    type IntoIter = vec_deque::Iter<'a, DecisionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<DecisionRecord> for DecisionHistory {
    /// Collect records that are already in newest-first order.
    fn from_iter<I: IntoIterator<Item = DecisionRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// Read the history from `store`.
///
/// A missing key yields an empty history.
///
/// # Errors
///
/// Returns [`Error::CorruptState`] if the stored value is not a valid history,
/// or a storage error if the store cannot be read.
pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<DecisionHistory> {
    let Some(raw) = store.get(HISTORY_KEY)? else {
        debug!("No stored history, starting empty");
        return Ok(DecisionHistory::new());
    };

    let history: DecisionHistory = serde_json::from_str(&raw)
        .map_err(|err| Error::corrupt_state(HISTORY_KEY, err.to_string()))?;

    if let Some(index) = history.iter().position(|record| !record.is_consistent()) {
        return Err(Error::corrupt_state(
            HISTORY_KEY,
            format!("record {index} has an empty field or a choice outside its options"),
        ));
    }

    info!("Loaded {} decisions", history.len());
    Ok(history)
}

/// Read the history, replacing corrupt stored data with an empty history.
///
/// The corrupt value stays in the store until the next save overwrites it.
///
/// # Errors
///
/// Returns a storage error if the store cannot be read.
pub fn load_or_reset<S: KeyValueStore + ?Sized>(store: &S) -> Result<DecisionHistory> {
    match load(store) {
        Err(err) if err.is_corrupt_state() => {
            warn!("Discarding stored history: {}", err);
            Ok(DecisionHistory::new())
        }
        other => other,
    }
}

/// Overwrite the stored history with `history`.
///
/// # Errors
///
/// Returns an error if serialization or the store write fails.
pub fn save<S: KeyValueStore + ?Sized>(store: &mut S, history: &DecisionHistory) -> Result<()> {
    let raw = serde_json::to_string(history)?;
    store.set(HISTORY_KEY, &raw)?;
    debug!("Saved {} decisions ({} bytes)", history.len(), raw.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::decision::sample_record;
    use crate::logging::init_test_logging;
    use crate::storage::Storage;
    use rstest::rstest;

    fn memory_store() -> HashMap<String, String> {
        HashMap::new()
    }

    fn sample_history() -> DecisionHistory {
        [
            sample_record("Lunch?", "Pizza", "Sushi"),
            sample_record("Walk or bike?", "Walk", "Bike"),
            sample_record("Tea?", "Green", "Green"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_prepend_puts_newest_first() {
        let mut history = DecisionHistory::new();
        history.prepend(sample_record("old", "a", "b"));
        let newest = history.prepend(sample_record("new", "c", "d")).clone();

        assert_eq!(history.len(), 2);
        assert_eq!(history.latest(), Some(&newest));
        let questions: Vec<_> = history.iter().map(DecisionRecord::question).collect();
        assert_eq!(questions, ["new", "old"]);
    }

    #[test]
    fn test_empty_history() {
        let history = DecisionHistory::new();
        assert!(history.is_empty());
        assert!(history.latest().is_none());
        assert_eq!((&history).into_iter().count(), 0);
    }

    #[test]
    fn test_load_absent_key() {
        let store = memory_store();
        let history = load(&store).unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn test_round_trip_preserves_order_and_fields() {
        let mut store = memory_store();
        let history = sample_history();

        save(&mut store, &history).unwrap();
        let loaded = load(&store).unwrap();

        assert_eq!(loaded, history);
    }

    #[test]
    fn test_round_trip_through_sqlite() {
        let mut storage = Storage::open_in_memory().unwrap();
        let history = sample_history();

        save(&mut storage, &history).unwrap();
        assert_eq!(load(&storage).unwrap(), history);
    }

    #[test]
    fn test_save_overwrites() {
        let mut store = memory_store();
        save(&mut store, &sample_history()).unwrap();

        let smaller: DecisionHistory = std::iter::once(sample_record("Only?", "x", "y")).collect();
        save(&mut store, &smaller).unwrap();

        assert_eq!(load(&store).unwrap(), smaller);
    }

    #[test]
    fn test_save_writes_compact_array() {
        let mut store = memory_store();
        let history: DecisionHistory =
            std::iter::once(sample_record("Lunch?", "Pizza", "Sushi")).collect();
        save(&mut store, &history).unwrap();

        assert_eq!(
            store.get(HISTORY_KEY).map(String::as_str),
            Some(
                r#"[{"question":"Lunch?","options":["Pizza","Sushi"],"chosen":"Pizza","timestamp":"10/16/2026, 3:04:05 PM"}]"#
            )
        );
    }

    #[test]
    fn test_load_existing_single_record() {
        let mut store = memory_store();
        store.insert(
            HISTORY_KEY.to_string(),
            r#"[{"question":"Coffee?","options":["Yes","No"],"chosen":"No","timestamp":"1/2/2025, 9:00:00 AM"}]"#
                .to_string(),
        );

        let history = load(&store).unwrap();
        assert_eq!(history.len(), 1);

        let record = history.latest().unwrap();
        assert_eq!(record.question(), "Coffee?");
        assert_eq!(record.options(), &["Yes".to_string(), "No".to_string()]);
        assert_eq!(record.chosen(), "No");
        assert_eq!(record.timestamp(), "1/2/2025, 9:00:00 AM");
    }

    #[rstest]
    #[case::not_json("not json")]
    #[case::object(r#"{"question":"Q"}"#)]
    #[case::missing_field(r#"[{"question":"Q","options":["A","B"],"chosen":"A"}]"#)]
    #[case::three_options(r#"[{"question":"Q","options":["A","B","C"],"chosen":"A","timestamp":"t"}]"#)]
    #[case::foreign_choice(r#"[{"question":"Q","options":["A","B"],"chosen":"C","timestamp":"t"}]"#)]
    #[case::empty_question(r#"[{"question":"","options":["A","B"],"chosen":"A","timestamp":"t"}]"#)]
    fn test_load_corrupt(#[case] raw: &str) {
        let mut store = memory_store();
        store.insert(HISTORY_KEY.to_string(), raw.to_string());

        let err = load(&store).unwrap_err();
        assert!(err.is_corrupt_state(), "unexpected error: {err}");
    }

    #[test]
    fn test_load_or_reset_recovers_from_corruption() {
        init_test_logging();
        let mut store = memory_store();
        store.insert(HISTORY_KEY.to_string(), "[{".to_string());

        let history = load_or_reset(&store).unwrap();
        assert!(history.is_empty());
        // The bad value is left for the next save to replace.
        assert_eq!(store.get(HISTORY_KEY).map(String::as_str), Some("[{"));
    }

    #[test]
    fn test_load_or_reset_passes_through_valid_data() {
        let mut store = memory_store();
        save(&mut store, &sample_history()).unwrap();

        assert_eq!(load_or_reset(&store).unwrap(), sample_history());
    }

    #[test]
    fn test_empty_array_is_valid() {
        let mut store = memory_store();
        store.insert(HISTORY_KEY.to_string(), "[]".to_string());
        assert!(load(&store).unwrap().is_empty());
    }
}
