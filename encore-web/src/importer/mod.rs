//! External catalog importer
//!
//! Pulls artist, venue and show records from the ticketing catalog's
//! discovery API and reconciles them into the local store. The HTTP client
//! lives here; payload extraction and store reconciliation are separate so
//! they can be tested without the network.

pub mod payload;
pub mod reconcile;

pub use payload::{EventsPayload, VenuesPayload};
pub use reconcile::ImportSummary;

use encore_common::{Error, Result};

/// Prefix of every importer failure surfaced to the client
pub const UNAVAILABLE_MESSAGE: &str = "There was a problem, try again later. Error: ";

/// Environment variable holding the catalog API credential
pub const API_KEY_ENV: &str = "TICKETMASTER_KEY";

const DEFAULT_BASE_URL: &str = "https://app.ticketmaster.com/discovery/v2";

/// Catalog HTTP client. The base URL is overridable so tests can point it
/// at a local stub.
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl CatalogClient {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Client against the production catalog, credential from the process
    /// environment. A missing credential degrades only the import routes.
    pub fn from_env() -> Self {
        Self::new(DEFAULT_BASE_URL, std::env::var(API_KEY_ENV).ok())
    }

    fn key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                Error::Upstream(format!("{} not found in environment variables", API_KEY_ENV))
            })
    }

    /// Fetch music events (the source of both artists and shows)
    pub async fn fetch_events(&self) -> Result<EventsPayload> {
        let key = self.key()?;
        let url = format!("{}/events.json", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("classificationName", "music"),
                ("dmaId", "336"),
                ("apikey", key),
            ])
            .send()
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?
            .error_for_status()
            .map_err(|e| Error::Upstream(e.to_string()))?;

        response
            .json::<EventsPayload>()
            .await
            .map_err(|e| Error::Upstream(e.to_string()))
    }

    /// Fetch music venues
    pub async fn fetch_venues(&self) -> Result<VenuesPayload> {
        let key = self.key()?;
        let url = format!("{}/venues.json", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("classificationName", "music"),
                ("stateCode", "MN"),
                ("apikey", key),
            ])
            .send()
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?
            .error_for_status()
            .map_err(|e| Error::Upstream(e.to_string()))?;

        response
            .json::<VenuesPayload>()
            .await
            .map_err(|e| Error::Upstream(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_is_an_upstream_error() {
        let client = CatalogClient::new("http://localhost:1", None);
        let err = client.key().unwrap_err();
        assert!(matches!(err, Error::Upstream(_)));
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[test]
    fn blank_api_key_is_an_upstream_error() {
        let client = CatalogClient::new("http://localhost:1", Some("  ".to_string()));
        assert!(client.key().is_err());
    }

    #[test]
    fn present_api_key_is_accepted() {
        let client = CatalogClient::new("http://localhost:1", Some("k".to_string()));
        assert_eq!(client.key().unwrap(), "k");
    }
}
