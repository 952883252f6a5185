//! HTTP front for attribuitions.
//!
//! Any path segment is treated as a command name; GET requests run the
//! command with the request body as payload and answer with the JSON
//! envelope. Business errors still answer `200`; only an unknown command
//! maps to `404`.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod router;

pub use router::{attribuitions_router, AppState};
