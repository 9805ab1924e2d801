//! `decisionmaker` - settle two-way questions with a fair coin flip
//!
//! A question and two options go in, one option is picked uniformly at random,
//! and the outcome is prepended to a history kept in a local key-value store.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod chooser;
pub mod cli;
pub mod clock;
pub mod config;
pub mod decision;
pub mod display;
pub mod error;
pub mod history;
pub mod logging;
pub mod prompt;
pub mod session;
pub mod storage;

pub use chooser::{Chooser, FixedChooser, Pick, RandomChooser};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use decision::{submit_decision, DecisionRecord};
pub use error::{Error, Result, ValidationError};
pub use history::{DecisionHistory, HISTORY_KEY};
pub use logging::init_logging;
pub use session::{Draft, Session};
pub use storage::{KeyValueStore, Storage, StorageStats};
