//! Logger setup shared by the binaries.
//!
//! Records go to stderr; stdout is reserved for JSON envelopes.

use anyhow::{anyhow, Result};
use twyg::{LogLevel, OptsBuilder, Output};

/// Map a configured level name to a twyg level. Unknown names mean `warn`.
pub fn parse_level(level: &str) -> LogLevel {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => LogLevel::Trace,
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        "error" => LogLevel::Error,
        _ => LogLevel::Warn,
    }
}

/// Install the global logger. Call once, before any other work.
pub fn init(level: &str) -> Result<()> {
    let opts = OptsBuilder::new()
        .coloured(false)
        .output(Output::Stderr)
        .level(parse_level(level))
        .report_caller(false)
        .build()
        .map_err(|err| anyhow!("invalid logging options: {err:?}"))?;

    twyg::setup(opts)
        .map(|_| ())
        .map_err(|err| anyhow!("failed to set up logging: {err:?}"))
}
