//! Command dispatch for attribuitions.
//!
//! A [`Registry`] maps command names to handlers. Each handler validates an
//! untyped JSON payload, performs exactly one [`Storage`] operation and
//! returns a [`Reply`]; [`format_json`] turns the outcome into the uniform
//! `{status, message?, data?}` envelope shared by the CLI and HTTP fronts.
//!
//! [`Storage`]: attribuitions_core::Storage

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod registry;
pub mod response;

pub use config::Config;
pub use error::{CommandError, CommandResult};
pub use handlers::{Reply, SUCCESS_MSG};
pub use registry::{Handler, Registry};
pub use response::{format_json, Envelope, Status};
