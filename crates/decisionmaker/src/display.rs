//! Rendering decisions for the terminal.

use std::io::{self, Write};

use crate::decision::DecisionRecord;
use crate::error::Result;
use crate::history::DecisionHistory;

/// Shown in place of an empty history.
pub const EMPTY_HISTORY: &str = "No decisions yet.";

/// Write one record as four lines: question, options, decision, timestamp.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_record<W: Write + ?Sized>(record: &DecisionRecord, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", record.question())?;
    writeln!(out, "Options: {}", record.options().join(" or "))?;
    writeln!(out, "Decision: {}", record.chosen())?;
    writeln!(out, "{}", record.timestamp())
}

/// Write every record, newest first, separated by blank lines.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_plain<W: Write + ?Sized>(history: &DecisionHistory, out: &mut W) -> io::Result<()> {
    if history.is_empty() {
        return writeln!(out, "{EMPTY_HISTORY}");
    }

    for (index, record) in history.iter().enumerate() {
        if index > 0 {
            writeln!(out)?;
        }
        write_record(record, out)?;
    }
    Ok(())
}

/// Write the history as a pretty-printed JSON array using the stored field names.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json<W: Write>(history: &DecisionHistory, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, history)?;
    writeln!(out)?;
    Ok(())
}
