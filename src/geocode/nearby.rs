use reqwest::Client;
use std::time::Duration;

use super::{GeocodeResult, NearbySearchResponse, PlaceLookup, ResolveError, SEARCH_RADIUS};
use crate::config::Config;
use crate::metadata::Coordinate;

/// Nearby search over HTTP (Google Places compatible).
pub struct NearbySearchClient {
    api_key: String,
    endpoint: String,
    client: Client,
}

impl NearbySearchClient {
    pub fn new(api_key: String, endpoint: String, timeout: Duration) -> Result<Self, ResolveError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api_key,
            endpoint,
            client,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ResolveError> {
        Self::new(
            config.places.api_key.clone(),
            config.places.endpoint.clone(),
            config.timeout(),
        )
    }
}

#[async_trait::async_trait]
impl PlaceLookup for NearbySearchClient {
    fn name(&self) -> &str {
        "Places nearby search"
    }

    async fn resolve(&self, coordinate: Coordinate) -> Result<GeocodeResult, ResolveError> {
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("location", coordinate.to_string()),
                ("radius", SEARCH_RADIUS.to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(ResolveError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let response: NearbySearchResponse = serde_json::from_str(&text)?;
        log::debug!("Places response status: {:?}", response.status);
        if let Some(ref message) = response.error_message {
            log::warn!("Places service message: {message}");
        }

        Ok(GeocodeResult::from_response(&response))
    }
}
