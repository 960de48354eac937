//! # Top Movies Common Library
//!
//! Shared code for the Top Movies web service:
//! - Error taxonomy
//! - Configuration loading (CLI/env/TOML/defaults)
//! - Database initialization and the movie record store

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
