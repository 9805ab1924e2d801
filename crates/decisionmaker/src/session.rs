//! A single decision-making session.
//!
//! [`Session`] owns everything one user interaction needs: the store, the
//! chooser, the clock, the loaded history and the draft being typed. The only
//! way to get a session is [`Session::start`], which loads the history first,
//! so nothing can be saved before the stored history has been read.

use tracing::debug;

use crate::chooser::Chooser;
use crate::clock::{render_timestamp, Clock};
use crate::decision::{submit_decision, DecisionRecord};
use crate::error::{Result, ValidationError};
use crate::history::{self, DecisionHistory};
use crate::storage::KeyValueStore;

/// Input that has not been turned into a decision yet. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    question: String,
    option1: String,
    option2: String,
    error: Option<ValidationError>,
}

impl Draft {
    /// The pending question.
    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    /// The pending first option.
    #[must_use]
    pub fn option1(&self) -> &str {
        &self.option1
    }

    /// The pending second option.
    #[must_use]
    pub fn option2(&self) -> &str {
        &self.option2
    }

    /// Why the last submission was rejected, until the next successful one.
    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Session state: the loaded history plus the draft being edited.
#[derive(Debug)]
pub struct Session<S, C, K> {
    store: S,
    chooser: C,
    clock: K,
    timestamp_format: String,
    history: DecisionHistory,
    draft: Draft,
}

impl<S, C, K> Session<S, C, K>
where
    S: KeyValueStore,
    C: Chooser,
    K: Clock,
{
    /// Load the stored history and start a session over it.
    ///
    /// Corrupt stored data is discarded with a warning and the session starts
    /// with an empty history.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn start(
        store: S,
        chooser: C,
        clock: K,
        timestamp_format: impl Into<String>,
    ) -> Result<Self> {
        let history = history::load_or_reset(&store)?;
        debug!("Session started with {} decisions", history.len());

        Ok(Self {
            store,
            chooser,
            clock,
            timestamp_format: timestamp_format.into(),
            history,
            draft: Draft::default(),
        })
    }

    /// Replace the pending question.
    pub fn set_question(&mut self, question: impl Into<String>) {
        self.draft.question = question.into();
    }

    /// Replace the pending first option.
    pub fn set_option1(&mut self, option: impl Into<String>) {
        self.draft.option1 = option.into();
    }

    /// Replace the pending second option.
    pub fn set_option2(&mut self, option: impl Into<String>) {
        self.draft.option2 = option.into();
    }

    /// Turn the draft into a decision and persist the new history.
    ///
    /// Returns `Ok(None)` when a field is missing; the reason is then available
    /// from [`Draft::error`] and neither the history nor the store is touched.
    /// On success the draft is cleared and the new record is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be written to the store. The
    /// decision stays in the in-memory history in that case.
    pub fn submit(&mut self) -> Result<Option<&DecisionRecord>> {
        let clock = &self.clock;
        let format = self.timestamp_format.as_str();

        if let Err(err) = submit_decision(
            &mut self.history,
            &self.draft.question,
            &self.draft.option1,
            &self.draft.option2,
            &mut self.chooser,
            || render_timestamp(&clock.now(), format),
        ) {
            debug!(field = %err.field(), "Submission rejected");
            self.draft.error = Some(err);
            return Ok(None);
        }

        self.draft.clear();
        history::save(&mut self.store, &self.history)?;
        Ok(self.history.latest())
    }

    /// Past decisions, newest first.
    #[must_use]
    pub fn history(&self) -> &DecisionHistory {
        &self.history
    }

    /// The draft being edited.
    #[must_use]
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// End the session, handing back the store. Any draft is discarded.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }
}
