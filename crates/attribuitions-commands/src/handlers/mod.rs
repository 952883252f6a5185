//! Command handlers.
//!
//! Every handler shares one contract: take the storage engine and the
//! positional arguments `[database_path, command, payload?]`, check that the
//! payload is present, decode it, check required fields, then make exactly
//! one storage call.

pub mod attribuitions;
pub mod help;
pub mod licences;
pub mod types;

use serde::de::DeserializeOwned;
use serde::Serialize;

use attribuitions_core::{AssetType, Attribuition, Licence};

use crate::error::{CommandError, CommandResult};

/// Data of a successful write.
pub const SUCCESS_MSG: &str = "done";

/// Position of the JSON payload in the argument list.
pub const PAYLOAD_INDEX: usize = 2;

/// What a handler returns on success; becomes the envelope's `data`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Message(&'static str),
    Types(Vec<AssetType>),
    Licences(Vec<Licence>),
    Attribuitions(Vec<Attribuition>),
}

impl Reply {
    #[must_use]
    pub const fn done() -> Self {
        Self::Message(SUCCESS_MSG)
    }
}

/// The payload argument, if present and not blank.
pub(crate) fn payload(args: &[String]) -> Option<&str> {
    args.get(PAYLOAD_INDEX)
        .map(String::as_str)
        .filter(|raw| !raw.trim().is_empty())
}

pub(crate) fn required_payload(args: &[String]) -> CommandResult<&str> {
    payload(args).ok_or(CommandError::MissingArgument)
}

/// Decode `raw` into `T`. Goes through [`serde_json::Value`] so a key that
/// appears twice takes its last value instead of failing.
pub(crate) fn decode<T: DeserializeOwned>(raw: &str, what: &'static str) -> CommandResult<T> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|source| CommandError::Decode { what, source })?;
    serde_json::from_value(value).map_err(|source| CommandError::Decode { what, source })
}
