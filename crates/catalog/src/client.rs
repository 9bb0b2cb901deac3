use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use upsalg_core::config::CatalogConfig;
use upsalg_core::domain::listing::RawListing;

use crate::useragent::UserAgentProvider;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed is not configured: catalog.base_url is unset")]
    NotConfigured,
    #[error("feed request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("feed returned status {0}")]
    Status(u16),
    #[error("feed payload could not be decoded: {0}")]
    Decode(String),
}

/// The feed wraps its hits in an envelope; anything else in there is noise.
#[derive(Debug, Default, Deserialize)]
struct FeedEnvelope {
    #[serde(default)]
    products: Vec<serde_json::Value>,
}

/// Decode hits one by one so a single malformed listing only costs itself.
fn decode_listings(envelope: FeedEnvelope) -> Vec<RawListing> {
    let mut listings = Vec::with_capacity(envelope.products.len());
    for value in envelope.products {
        match serde_json::from_value::<RawListing>(value) {
            Ok(listing) => listings.push(listing),
            Err(error) => warn!(%error, "skipping undecodable feed listing"),
        }
    }
    listings
}

/// Client for the retailer's product search endpoint.
pub struct FeedClient {
    http: Client,
    base_url: String,
    api_key: Option<SecretString>,
    agents: Arc<dyn UserAgentProvider>,
}

impl FeedClient {
    pub fn from_config(
        config: &CatalogConfig,
        agents: Arc<dyn UserAgentProvider>,
    ) -> Result<Self, FeedError> {
        let base_url = config.base_url.clone().ok_or(FeedError::NotConfigured)?;
        let http = Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: config.api_key.clone(),
            agents,
        })
    }

    /// Fetch raw listings for one search query.
    pub async fn search(&self, query: &str) -> Result<Vec<RawListing>, FeedError> {
        let url = format!("{}/api/v2/product/search", self.base_url);

        let mut request = self
            .http
            .post(&url)
            .header(reqwest::header::USER_AGENT, self.agents.next())
            .json(&serde_json::json!({ "query": query, "category": "laptops" }));
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let envelope: FeedEnvelope =
            response.json().await.map_err(|error| FeedError::Decode(error.to_string()))?;
        let listings = decode_listings(envelope);

        debug!(count = listings.len(), query, "feed search completed");
        Ok(listings)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use upsalg_core::config::{AppConfig, CatalogConfig};

    use super::{decode_listings, FeedClient, FeedEnvelope, FeedError};
    use crate::useragent::FixedUserAgent;

    fn configured_catalog() -> CatalogConfig {
        let mut catalog = AppConfig::default().catalog;
        catalog.base_url = Some("https://feed.example.dk/".to_owned());
        catalog
    }

    #[test]
    fn client_requires_a_base_url() {
        let catalog = AppConfig::default().catalog;
        let result =
            FeedClient::from_config(&catalog, Arc::new(FixedUserAgent("test".into())));
        assert!(matches!(result, Err(FeedError::NotConfigured)));
    }

    #[test]
    fn trailing_slash_is_normalized_away() {
        let client = FeedClient::from_config(
            &configured_catalog(),
            Arc::new(FixedUserAgent("test".into())),
        )
        .expect("client");
        assert_eq!(client.base_url, "https://feed.example.dk");
    }

    #[test]
    fn malformed_listings_are_skipped_not_fatal() {
        let envelope: FeedEnvelope = serde_json::from_str(
            r#"{
                "products": [
                    {"title": "ASUS Vivobook 15", "price": 4498.0, "ean": "4711121000002"},
                    {"price": 999.0},
                    {"title": "Lenovo IdeaPad Slim 5", "price": "4.799,00"}
                ],
                "total": 3
            }"#,
        )
        .expect("envelope");

        let listings = decode_listings(envelope);
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].title, "ASUS Vivobook 15");
        assert_eq!(listings[1].price, Some(4799.0));
    }

    #[test]
    fn empty_envelope_decodes_to_no_listings() {
        let envelope: FeedEnvelope = serde_json::from_str("{}").expect("envelope");
        assert!(decode_listings(envelope).is_empty());
    }
}
