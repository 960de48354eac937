//! Database models and queries

pub mod init;
pub mod models;
pub mod movies;

pub use init::*;
pub use models::*;
