mod nearby;

pub use nearby::NearbySearchClient;

use serde::{Deserialize, Serialize};

use crate::metadata::Coordinate;

/// Search radius sent with every nearby lookup, in metres.
pub const SEARCH_RADIUS: u32 = 500;

/// Classified outcome of one nearby-place lookup.
///
/// Built from the service's `status` string by
/// [`GeocodeResult::from_response`]. Only `Resolved` carries data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GeocodeResult {
    /// `OK`: name (and vicinity, when given) of the first candidate.
    Resolved {
        name: String,
        vicinity: Option<String>,
    },
    /// `ZERO_RESULTS`
    NoResults,
    /// `INVALID_REQUEST`
    InvalidRequest,
    /// `REQUEST_DENIED`
    Denied,
    /// `OVER_QUERY_LIMIT`: the run must stop.
    QuotaExceeded,
    /// `UNKNOWN_ERROR`, an empty status, or anything unrecognised.
    UnknownError,
}

impl GeocodeResult {
    /// Map a decoded response envelope onto a result.
    ///
    /// The mapping is total: every status string lands on exactly one
    /// variant. `OK` with an empty candidate list is treated as
    /// `NoResults`.
    pub fn from_response(response: &NearbySearchResponse) -> Self {
        match response.status.as_str() {
            "OK" => match response.results.first() {
                Some(place) => Self::Resolved {
                    name: place.name.clone(),
                    vicinity: place.vicinity.clone(),
                },
                None => Self::NoResults,
            },
            "ZERO_RESULTS" => Self::NoResults,
            "REQUEST_DENIED" => Self::Denied,
            "INVALID_REQUEST" => Self::InvalidRequest,
            "OVER_QUERY_LIMIT" => Self::QuotaExceeded,
            _ => Self::UnknownError,
        }
    }

    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, Self::QuotaExceeded)
    }
}

/// JSON envelope returned by the nearby-search endpoint.
///
/// Only the fields this crate reads are modelled; everything else in the
/// payload is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NearbySearchResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub results: Vec<Place>,
    pub error_message: Option<String>,
}

/// One candidate place.
#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    #[serde(default)]
    pub name: String,
    pub vicinity: Option<String>,
}

/// Transport-level failure of a lookup. Distinct from the service's own
/// error statuses, which are [`GeocodeResult`] variants.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("place search request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("place search returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to parse place search response: {0}")]
    Body(#[from] serde_json::Error),
}

/// Trait for nearby-place lookup backends.
///
/// The crate ships [`NearbySearchClient`]; tests and embedders can supply
/// their own.
///
/// # Example
///
/// ```rust,no_run
/// use photo_places::geocode::{NearbySearchClient, PlaceLookup};
/// use photo_places::metadata::Coordinate;
/// use std::time::Duration;
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = NearbySearchClient::new(
///     "AIza...".into(),
///     photo_places::config::DEFAULT_ENDPOINT.into(),
///     Duration::from_secs(30),
/// )?;
/// let result = client.resolve(Coordinate::new(37.7694, -122.4862)).await?;
/// println!("{result:?}");
/// # Ok(())
/// # }
/// ```
#[async_trait::async_trait]
pub trait PlaceLookup: Send + Sync {
    /// The display name of this backend.
    fn name(&self) -> &str;
    /// Look up the place nearest to `coordinate`. One attempt, no retry.
    async fn resolve(&self, coordinate: Coordinate) -> Result<GeocodeResult, ResolveError>;
}
