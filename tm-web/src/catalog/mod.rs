//! External movie metadata provider
//!
//! [`MovieCatalog`] is the seam between the handlers and the provider:
//! `TmdbClient` talks to The Movie Database over HTTPS, tests substitute
//! an in-process stub.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tm_common::db::NewMovie;

mod tmdb_client;

pub use tmdb_client::TmdbClient;

/// Metadata provider errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// One search hit
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MovieCandidate {
    /// Provider-side movie id
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    /// `YYYY-MM-DD`, may be empty for unreleased titles
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl MovieCandidate {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }

    pub fn year(&self) -> Option<i64> {
        self.release_date.as_deref().and_then(year_from_release_date)
    }
}

/// Search endpoint payload
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<MovieCandidate>,
}

/// Details endpoint payload
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MovieDetails {
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl MovieDetails {
    /// Turn provider details into a storable movie
    ///
    /// year = leading segment of the release date before `-`,
    /// poster_url = `image_base_url` + poster path.
    pub fn into_new_movie(self, image_base_url: &str) -> Result<NewMovie, CatalogError> {
        let release_date = self.release_date.unwrap_or_default();
        let year = year_from_release_date(&release_date).ok_or_else(|| {
            CatalogError::Parse(format!(
                "release date {:?} of \"{}\" has no year",
                release_date, self.title
            ))
        })?;

        let poster_url = format!(
            "{}{}",
            image_base_url,
            self.poster_path.as_deref().unwrap_or_default()
        );

        Ok(NewMovie {
            title: self.title,
            year,
            description: self.overview.unwrap_or_default(),
            poster_url,
        })
    }
}

/// Year prefix of an ISO date string (`"2021-10-22"` -> `2021`)
pub fn year_from_release_date(release_date: &str) -> Option<i64> {
    release_date
        .split('-')
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}

/// Movie metadata provider
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Search by title; returns the provider's result list verbatim
    async fn search(&self, title: &str) -> Result<Vec<MovieCandidate>, CatalogError>;

    /// Fetch details for one provider-side id
    async fn details(&self, external_id: &str) -> Result<MovieDetails, CatalogError>;
}
