use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

use attribuitions_commands::{format_json, logging, CommandError, Registry};
use attribuitions_core::Storage;

/// Every outcome, errors included, is a JSON envelope on stdout and the exit
/// status is 0. Logs go to stderr.
#[derive(Debug, Parser)]
#[command(name = "attribuitions", version, about)]
struct Cli {
    /// Path to the SQLite database; created and seeded if missing
    database: Option<PathBuf>,

    /// Command name (listAttribuitions, addType, ...); omit for help
    command: Option<String>,

    /// JSON payload for the command
    #[arg(allow_hyphen_values = true)]
    payload: Option<String>,

    /// Anything past the payload is ignored
    #[arg(hide = true, allow_hyphen_values = true)]
    extra: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "ATTRIB_LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

impl Cli {
    /// Positional arguments as handlers see them: `[database, command, payload]`.
    fn handler_args(&self, database: &std::path::Path) -> Vec<String> {
        let mut args = vec![database.display().to_string()];
        args.extend(self.command.clone());
        args.extend(self.payload.clone());
        args
    }
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            let reason = err.kind().as_str().unwrap_or("invalid arguments");
            emit(&format_json::<(), _>(&Err(reason)))?;
            return Ok(());
        }
    };
    logging::init(&cli.log_level)?;

    if !cli.extra.is_empty() {
        log::debug!("Ignoring {} extra argument(s)", cli.extra.len());
    }

    let Some(database) = cli.database.as_deref() else {
        emit(&format_json::<(), _>(&Err(CommandError::NoCommand)))?;
        return Ok(());
    };

    let storage = match Storage::open(database) {
        Ok(storage) => storage,
        Err(err) => {
            log::error!("Could not open {}: {}", database.display(), err);
            emit(&format_json::<(), _>(&Err(err)))?;
            return Ok(());
        }
    };

    let registry = Registry::new();
    let output = registry.dispatch(&storage, &cli.handler_args(database));
    emit(&output)?;

    if let Err(err) = storage.close() {
        log::error!("{}", err);
        std::process::exit(1);
    }

    Ok(())
}

fn emit(envelope: &[u8]) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(envelope)?;
    stdout.write_all(b"\n")?;
    stdout.flush()?;
    Ok(())
}
