//! The Movie Database (TMDB) API client
//!
//! Two calls: title search and details by id. Every request carries the
//! configured bearer token. There is no retry; any non-success status is
//! returned to the caller as [`CatalogError::Api`].

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use tm_common::config::TmdbConfig;

use super::{CatalogError, MovieCandidate, MovieCatalog, MovieDetails, SearchResponse};

const USER_AGENT: &str = concat!("topmovies/", env!("CARGO_PKG_VERSION"));

/// TMDB API client
pub struct TmdbClient {
    http_client: reqwest::Client,
    token: String,
    search_url: String,
    details_url: String,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig) -> Result<Self, CatalogError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let http_client = builder
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let details_url = if config.details_url.ends_with('/') {
            config.details_url.clone()
        } else {
            format!("{}/", config.details_url)
        };

        Ok(Self {
            http_client,
            token: config.token.clone(),
            search_url: config.search_url.clone(),
            details_url,
        })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, CatalogError> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api(status.as_u16(), error_text));
        }

        Ok(response)
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    async fn search(&self, title: &str) -> Result<Vec<MovieCandidate>, CatalogError> {
        tracing::debug!(title = %title, url = %self.search_url, "Searching TMDB");

        let request = self.http_client.get(&self.search_url).query(&[("query", title)]);
        let body: SearchResponse = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        tracing::info!(
            title = %title,
            results = body.results.len(),
            "Retrieved search results from TMDB"
        );

        Ok(body.results)
    }

    async fn details(&self, external_id: &str) -> Result<MovieDetails, CatalogError> {
        let url = format!("{}{}", self.details_url, external_id);
        tracing::debug!(external_id = %external_id, url = %url, "Fetching TMDB movie details");

        let details: MovieDetails = self
            .send(self.http_client.get(&url))
            .await?
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        tracing::info!(
            external_id = %external_id,
            title = %details.title,
            "Retrieved movie details from TMDB"
        );

        Ok(details)
    }
}
