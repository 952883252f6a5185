//! Handler error types.

use thiserror::Error;

/// Errors a command handler reports through the error envelope.
#[derive(Debug, Error)]
pub enum CommandError {
    /// No command (not even a database path) was supplied.
    #[error("no command provided")]
    NoCommand,

    /// The command needs a JSON payload and none was given.
    #[error("missing argument")]
    MissingArgument,

    /// A required field is empty or zero after decoding.
    #[error("invalid value")]
    InvalidValue,

    /// The payload is not valid JSON for the expected record.
    #[error("invalid {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The storage engine rejected the operation.
    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: attribuitions_core::Error,
    },
}

impl CommandError {
    pub(crate) fn storage(context: &'static str) -> impl FnOnce(attribuitions_core::Error) -> Self {
        move |source| Self::Storage { context, source }
    }
}

/// Convenience alias for handler results.
pub type CommandResult<T> = std::result::Result<T, CommandError>;
