//! Database models

use serde::{Deserialize, Serialize};

/// Review text stored until the user writes one
pub const DEFAULT_REVIEW: &str = "None";

/// A persisted movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: i64,
    pub title: String,
    pub year: i64,
    pub description: String,
    /// 0 until the user rates the movie
    pub rating: f64,
    /// Position among all movies (1 = best); refreshed on every list view
    pub rank: i64,
    pub review: String,
    pub poster_url: String,
}

/// Fields required to create a movie; the rest take their defaults
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub year: i64,
    pub description: String,
    pub poster_url: String,
}
