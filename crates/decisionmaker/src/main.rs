//! `decide` - CLI for decisionmaker
//!
//! This binary is the user-facing surface: one-shot and interactive decisions,
//! the decision history, and configuration inspection.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use decisionmaker::cli::{AskCommand, Cli, Command, ConfigCommand, HistoryCommand, OutputFormat};
use decisionmaker::{
    display, history, init_logging, prompt, Config, Error, RandomChooser, Session, Storage,
    SystemClock,
};

type CliSession = Session<Storage, RandomChooser, SystemClock>;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    // Config commands read the file themselves so a broken one can be reported.
    match cli.command {
        Command::Ask(ask_cmd) => handle_ask(&load_config(cli.config)?, ask_cmd),
        Command::Interactive => handle_interactive(&load_config(cli.config)?),
        Command::History(history_cmd) => handle_history(&load_config(cli.config)?, &history_cmd),
        Command::Status(status_cmd) => handle_status(&load_config(cli.config)?, status_cmd.json),
        Command::Config(config_cmd) => {
            handle_config(cli.config, config_cmd, &mut io::stdout().lock())
        }
    }
}

fn load_config(config_path: Option<PathBuf>) -> anyhow::Result<Config> {
    Config::load_from(config_path).context("could not load configuration")
}

fn open_storage(config: &Config) -> anyhow::Result<Storage> {
    let path = config.database_path();
    Storage::open(&path).with_context(|| format!("could not open {}", path.display()))
}

fn start_session(config: &Config) -> anyhow::Result<CliSession> {
    let session = Session::start(
        open_storage(config)?,
        RandomChooser::new(),
        SystemClock,
        config.timestamp_format(),
    )?;
    Ok(session)
}

fn handle_ask(config: &Config, cmd: AskCommand) -> anyhow::Result<()> {
    let mut session = start_session(config)?;
    session.set_question(cmd.question.unwrap_or_default());
    session.set_option1(cmd.option1.unwrap_or_default());
    session.set_option2(cmd.option2.unwrap_or_default());

    let Some(record) = session.submit()?.cloned() else {
        return match session.draft().error() {
            Some(err) => Err(Error::from(err.clone()).into()),
            None => Err(anyhow::anyhow!("no decision was recorded")),
        };
    };

    let mut stdout = io::stdout().lock();
    if cmd.json {
        serde_json::to_writer_pretty(&mut stdout, &record)?;
        writeln!(stdout)?;
    } else {
        display::write_record(&record, &mut stdout)?;
    }
    Ok(())
}

fn handle_interactive(config: &Config) -> anyhow::Result<()> {
    let mut session = start_session(config)?;
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    prompt::run_interactive(&mut session, stdin, &mut stdout)?;
    Ok(())
}

fn handle_history(config: &Config, cmd: &HistoryCommand) -> anyhow::Result<()> {
    let storage = open_storage(config)?;
    let decisions = history::load_or_reset(&storage)?;

    let mut stdout = io::stdout().lock();
    match cmd.format {
        OutputFormat::Plain => display::write_plain(&decisions, &mut stdout)?,
        OutputFormat::Json => display::write_json(&decisions, &mut stdout)?,
    }
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let storage = open_storage(config)?;
    let stats = storage.stats()?;
    let (decisions, corrupt) = match history::load(&storage) {
        Ok(loaded) => (loaded.len(), false),
        Err(err) if err.is_corrupt_state() => (0, true),
        Err(err) => return Err(err.into()),
    };
    let last_decision = storage.updated_at(decisionmaker::HISTORY_KEY)?;

    if json {
        let status = serde_json::json!({
            "database_path": storage.path(),
            "decisions": decisions,
            "history_corrupt": corrupt,
            "last_decision": last_decision.map(|t| t.to_rfc3339()),
            "db_size_bytes": stats.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("decide status");
        println!("-------------");
        println!("Database:      {}", storage.path().display());
        println!("Decisions:     {decisions}");
        if corrupt {
            println!("               (stored history is unreadable and will be replaced)");
        }
        match last_decision {
            Some(at) => println!("Last decision: {}", at.to_rfc3339()),
            None => println!("Last decision: never"),
        }
        println!("Size:          {} bytes", stats.db_size_bytes);
    }
    Ok(())
}

fn handle_config<W: Write>(
    config_path: Option<PathBuf>,
    cmd: ConfigCommand,
    out: &mut W,
) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = load_config(config_path)?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&config)?)?;
            } else {
                writeln!(out, "Current Configuration")?;
                writeln!(out, "=====================")?;
                writeln!(out)?;
                writeln!(out, "[Storage]")?;
                writeln!(out, "  Database path:    {}", config.database_path().display())?;
                writeln!(out)?;
                writeln!(out, "[Decision]")?;
                writeln!(out, "  Timestamp format: {}", config.timestamp_format())?;
            }
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            writeln!(out, "{}", path.display())?;
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            writeln!(out, "Validating configuration: {}", path.display())?;
            if !path.exists() {
                writeln!(out, "No configuration file found; defaults apply.")?;
            }
            Config::load_from(Some(path.clone()))
                .with_context(|| format!("configuration {} is invalid", path.display()))?;
            writeln!(out, "Configuration is valid.")?;
        }
    }
    Ok(())
}
