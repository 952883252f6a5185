//! The JSON envelope every command answers with.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;

/// Emitted only if the envelope itself cannot be serialized.
const FALLBACK: &[u8] = br#"{"status":"error","message":"failed to encode response"}"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// `{"status":"success","data":...}` or `{"status":"error","message":"..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Envelope {
    #[must_use]
    pub fn success(data: Value) -> Self {
        Self {
            status: Status::Success,
            message: None,
            data: Some(data),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_else(|err| {
            log::error!("Failed to encode response envelope: {}", err);
            FALLBACK.to_vec()
        })
    }
}

/// Wrap a handler outcome into envelope bytes.
///
/// If the success value cannot be serialized, the serialization error is
/// reported through an error envelope instead.
pub fn format_json<T: Serialize, E: Display>(result: &Result<T, E>) -> Vec<u8> {
    let envelope = match result {
        Ok(data) => match serde_json::to_value(data) {
            Ok(value) => Envelope::success(value),
            Err(err) => Envelope::error(err.to_string()),
        },
        Err(err) => Envelope::error(err.to_string()),
    };
    envelope.to_bytes()
}
