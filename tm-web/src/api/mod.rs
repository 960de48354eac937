//! HTTP handlers for tm-web

pub mod add;
pub mod health;
pub mod movies;

pub use add::add_routes;
pub use health::health_routes;
pub use movies::movie_routes;

use serde::Deserialize;

use crate::ApiError;

/// `?id=` query parameter, kept raw so a malformed id maps to 404
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    #[serde(default)]
    pub id: Option<String>,
}

impl IdQuery {
    /// Parse as a record id; missing or malformed ids are NotFound
    pub fn record_id(&self) -> Result<i64, ApiError> {
        let raw = self.id.as_deref().unwrap_or_default().trim();
        raw.parse()
            .map_err(|_| ApiError::NotFound(format!("movie {:?}", raw)))
    }

    /// Provider-side id; only digits are forwarded to the provider
    pub fn external_id(&self) -> Result<String, ApiError> {
        let raw = self.id.as_deref().unwrap_or_default().trim();
        if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
            return Err(ApiError::NotFound(format!("external movie {:?}", raw)));
        }
        Ok(raw.to_string())
    }
}
