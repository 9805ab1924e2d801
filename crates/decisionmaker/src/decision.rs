//! Decision records and the submission step that creates them.
//!
//! A [`DecisionRecord`] is built once, from three filled-in fields and a single
//! binary draw, and never changes afterwards.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chooser::Chooser;
use crate::error::{DraftField, ValidationError};
use crate::history::DecisionHistory;

/// A question, its two options, and the option that was picked.
///
/// Serialized with the field names `question`, `options`, `chosen` and
/// `timestamp`; `options` is always a two-element array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    question: String,
    options: [String; 2],
    chosen: String,
    timestamp: String,
}

impl DecisionRecord {
    /// Decide between `option1` and `option2`.
    ///
    /// The chooser is consulted exactly once, and only when all three fields
    /// are non-empty. The timestamp is rendered by `stamp` at that moment.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] naming the first empty field.
    pub fn decide<C: Chooser + ?Sized>(
        question: &str,
        option1: &str,
        option2: &str,
        chooser: &mut C,
        stamp: impl FnOnce() -> String,
    ) -> Result<Self, ValidationError> {
        validate_fields(question, option1, option2)?;

        let options = [option1.to_string(), option2.to_string()];
        let chosen = chooser.pick().select(&options[0], &options[1]).clone();

        Ok(Self {
            question: question.to_string(),
            options,
            chosen,
            timestamp: stamp(),
        })
    }

    /// The question that was asked.
    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Both options, in the order they were entered.
    #[must_use]
    pub fn options(&self) -> &[String; 2] {
        &self.options
    }

    /// The picked option.
    #[must_use]
    pub fn chosen(&self) -> &str {
        &self.chosen
    }

    /// When the decision was made, as rendered at the time.
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Whether the record satisfies the invariants of a freshly made decision:
    /// every field filled in and `chosen` one of the two options.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        !self.question.is_empty()
            && self.options.iter().all(|option| !option.is_empty())
            && self.options.contains(&self.chosen)
    }
}

/// Check that none of the three input fields is empty.
///
/// Values are taken as-is: whitespace-only input counts as filled in.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] naming the first empty field.
pub fn validate_fields(question: &str, option1: &str, option2: &str) -> Result<(), ValidationError> {
    let missing = [
        (DraftField::Question, question),
        (DraftField::Option1, option1),
        (DraftField::Option2, option2),
    ]
    .into_iter()
    .find_map(|(field, value)| value.is_empty().then_some(field));

    match missing {
        Some(field) => Err(ValidationError::MissingField { field }),
        None => Ok(()),
    }
}

/// Record a decision at the front of `history`.
///
/// On failure `history` is left exactly as it was.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] when any field is empty.
pub fn submit_decision<'h, C: Chooser + ?Sized>(
    history: &'h mut DecisionHistory,
    question: &str,
    option1: &str,
    option2: &str,
    chooser: &mut C,
    stamp: impl FnOnce() -> String,
) -> Result<&'h DecisionRecord, ValidationError> {
    let record = DecisionRecord::decide(question, option1, option2, chooser, stamp)?;
    debug!(chosen = record.chosen(), "Decision made");
    Ok(history.prepend(record))
}

#[cfg(test)]
pub(crate) fn sample_record(question: &str, option1: &str, option2: &str) -> DecisionRecord {
    use crate::chooser::FixedChooser;

    DecisionRecord::decide(
        question,
        option1,
        option2,
        &mut FixedChooser::first(),
        || "10/16/2026, 3:04:05 PM".to_string(),
    )
    .expect("sample record fields are filled in")
}
