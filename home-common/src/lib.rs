//! # Home Common Library
//!
//! Shared code for the home-software tools:
//! - Error and result types
//! - Configuration loading (database path and server port resolution)
//! - Week-boundary time calculations and date formatting
//! - SQLite connection setup and versioned schema migrations

pub mod config;
pub mod db;
pub mod error;
pub mod time;

pub use error::{Error, Result};
