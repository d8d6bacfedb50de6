//! Location resolution.
//!
//! Raw "lat, lon" strings are parsed locally without any network access.
//! Anything else is treated as a place name and handed to a [`Geocoder`],
//! a one-method seam so any provider (or an offline stub in tests) can be
//! substituted without touching synthesis logic.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::errors::RouteError;
use crate::models::Coordinate;

/// A single candidate returned by a geocoding provider.
#[derive(Debug, Clone)]
pub struct GeocodeMatch {
    pub coordinate: Coordinate,
    /// Provider confidence, higher is better. Providers that return results
    /// best-first may report 0 here.
    pub confidence: f64,
}

/// External geocoding collaborator.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Returns candidate matches for a free-form query, best match first.
    async fn geocode(&self, query: &str) -> Result<Vec<GeocodeMatch>, RouteError>;
}

const NOMINATIM_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";
const GEOCODE_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("routegen/", env!("CARGO_PKG_VERSION"));

/// Geocoder backed by the OSM Nominatim search API.
pub struct NominatimClient {
    client: reqwest::Client,
    endpoint: String,
}

impl NominatimClient {
    /// Creates a client with the default endpoint and a bounded timeout.
    pub fn new() -> Self {
        Self::with_timeout(GEOCODE_TIMEOUT)
    }

    /// Creates a client with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            endpoint: NOMINATIM_ENDPOINT.to_string(),
        }
    }

    /// Sets a custom search endpoint (self-hosted Nominatim, test server).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl Default for NominatimClient {
    fn default() -> Self {
        Self::new()
    }
}

/// One place in a Nominatim `jsonv2` response. Coordinates come back as
/// strings in this format.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    importance: Option<f64>,
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn geocode(&self, query: &str) -> Result<Vec<GeocodeMatch>, RouteError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query), ("format", "jsonv2"), ("limit", "5")])
            .send()
            .await
            .map_err(|e| RouteError::GeocodingUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RouteError::GeocodingUnavailable(format!(
                "geocoder returned {status}"
            )));
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| RouteError::GeocodingUnavailable(e.to_string()))?;

        debug!(query, candidates = places.len(), "geocoded place name");

        let matches = places
            .into_iter()
            .filter_map(|place| {
                let lat = place.lat.parse::<f64>().ok()?;
                let lon = place.lon.parse::<f64>().ok()?;
                Some(GeocodeMatch {
                    coordinate: Coordinate::new(lat, lon),
                    confidence: place.importance.unwrap_or(0.0),
                })
            })
            .collect();

        Ok(matches)
    }
}

/// Turns a free-form location string into a coordinate.
pub struct LocationResolver {
    geocoder: Box<dyn Geocoder>,
}

impl LocationResolver {
    pub fn new(geocoder: Box<dyn Geocoder>) -> Self {
        Self { geocoder }
    }

    /// Resolves a raw coordinate pair or a place name into a coordinate.
    pub async fn resolve(&self, input: &str) -> Result<Coordinate, RouteError> {
        let trimmed = input.trim();

        if looks_like_coordinates(trimmed) {
            return parse_coordinates(trimmed);
        }

        debug!(query = trimmed, "delegating to geocoder");
        let matches = self.geocoder.geocode(trimmed).await?;

        matches
            .into_iter()
            .next()
            .map(|best| best.coordinate)
            .ok_or_else(|| RouteError::LocationNotFound(trimmed.to_string()))
    }
}

/// True when the input can only be a numeric "lat, lon" pair. Place names
/// ("Paris, France") contain characters outside the numeric token set and
/// go to the geocoder instead.
fn looks_like_coordinates(input: &str) -> bool {
    input.contains(',')
        && input
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-' | '+' | ' ' | '\t'))
}

/// Parses a "lat, lon" string, validating both tokens and their ranges.
fn parse_coordinates(input: &str) -> Result<Coordinate, RouteError> {
    let invalid = || RouteError::InvalidCoordinateFormat(input.to_string());

    let parts: Vec<&str> = input.split(',').collect();
    if parts.len() != 2 {
        return Err(invalid());
    }

    let lat: f64 = parts[0].trim().parse().map_err(|_| invalid())?;
    let lon: f64 = parts[1].trim().parse().map_err(|_| invalid())?;

    if !lat.is_finite() || !lon.is_finite() {
        return Err(invalid());
    }
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(invalid());
    }

    Ok(Coordinate::new(lat, lon))
}
