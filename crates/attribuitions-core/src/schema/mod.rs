//! SQLite schema, seed data and the storage engine.

pub mod db;
pub mod seed;
pub mod tables;

pub use db::Storage;
