use thiserror::Error;

/// Errors surfaced by route synthesis.
///
/// Synthesis is all-or-nothing: any of these aborts the request without
/// producing a partial route.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("requested distance {km} km is outside the accepted {min}-{max} km range")]
    InvalidDistance { km: f64, min: f64, max: f64 },

    #[error("could not parse coordinates from {0:?}")]
    InvalidCoordinateFormat(String),

    #[error("location not found: {0}")]
    LocationNotFound(String),

    #[error("geocoding service unavailable: {0}")]
    GeocodingUnavailable(String),

    #[error("route encoding failed: {0}")]
    EncodingFailure(String),
}
