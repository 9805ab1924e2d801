//! Command-line interface for decisionmaker.
//!
//! This module provides the CLI structure for the `decide` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::Verbosity;

pub use commands::{AskCommand, ConfigCommand, HistoryCommand, OutputFormat, StatusCommand};

/// decide - Let a coin flip settle it
///
/// Enter a question and two options; one is picked at random and the
/// decision is kept in a local history.
#[derive(Debug, Parser)]
#[command(name = "decide")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Make one decision and record it
    Ask(AskCommand),

    /// Make decisions from prompts until end of input
    Interactive,

    /// Show past decisions, newest first
    History(HistoryCommand),

    /// Show where decisions are stored and how many there are
    Status(StatusCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}
