//! Core domain model for attribuitions.
//!
//! This crate defines the credited-asset records (attribuitions) with their
//! type and licence lookup tables, and the SQLite-backed [`Storage`] engine
//! that owns the database connection.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod model;
pub mod schema;

pub use error::{Error, Result};
pub use model::{AssetType, Attribuition, Licence, Query, SortOrder};
pub use schema::Storage;
