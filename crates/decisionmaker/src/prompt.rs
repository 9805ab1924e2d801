//! Line-oriented interactive session.
//!
//! Prompts for a question and two options, makes the decision, and repeats
//! until input runs out. Typing `:history` at the question prompt prints past
//! decisions; `:quit` ends the session.

use std::io::{BufRead, Write};

use crate::chooser::Chooser;
use crate::clock::Clock;
use crate::display;
use crate::error::Result;
use crate::session::Session;
use crate::storage::KeyValueStore;

/// Print the history instead of asking a new question.
pub const HISTORY_COMMAND: &str = ":history";

/// End the session.
pub const QUIT_COMMAND: &str = ":quit";

/// Drive `session` from `input` until end of input or [`QUIT_COMMAND`].
///
/// A draft that is only partly entered when input ends is discarded.
///
/// # Errors
///
/// Returns an error if reading, writing, or saving the history fails.
pub fn run_interactive<S, C, K, R, W>(
    session: &mut Session<S, C, K>,
    mut input: R,
    output: &mut W,
) -> Result<()>
where
    S: KeyValueStore,
    C: Chooser,
    K: Clock,
    R: BufRead,
    W: Write,
{
    loop {
        let Some(question) = ask(&mut input, output, "Question: ")? else {
            break;
        };
        if question == QUIT_COMMAND {
            break;
        }
        if question == HISTORY_COMMAND {
            display::write_plain(session.history(), output)?;
            writeln!(output)?;
            continue;
        }
        session.set_question(question);

        let Some(option1) = ask(&mut input, output, "Option 1: ")? else {
            break;
        };
        session.set_option1(option1);

        let Some(option2) = ask(&mut input, output, "Option 2: ")? else {
            break;
        };
        session.set_option2(option2);

        let chosen = session.submit()?.map(|record| record.chosen().to_owned());
        match (chosen, session.draft().error()) {
            (Some(chosen), _) => writeln!(output, "Decision: {chosen}")?,
            (None, Some(err)) => writeln!(output, "{err}")?,
            (None, None) => {}
        }
        writeln!(output)?;
    }

    output.flush()?;
    Ok(())
}

/// Show `label` and read one line, without its line terminator.
/// Returns `None` at end of input.
fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> Result<Option<String>> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}
