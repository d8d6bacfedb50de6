//! Loop-route synthesis for cycling training.
//!
//! Given a start location (a raw coordinate pair or a place name), a target
//! distance, and an athlete profile, this crate synthesizes a closed loop of
//! GPS points with a matching elevation profile and encodes it as a GPX 1.1
//! document readable by common GPS tools.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use routegen::prelude::*;
//!
//! let synthesizer = RouteSynthesizer::new(Box::new(NominatimClient::new()));
//! let request = RouteRequest {
//!     start_location: "48.8566, 2.3522".to_string(),
//!     distance_km: 25.0,
//!     athlete: AthleteProfile {
//!         name: "Alex".to_string(),
//!         difficulty: Difficulty::Easy,
//!         terrain: Terrain::Rolling,
//!     },
//!     shape_seed: Some(42),
//! };
//! let route = synthesizer.synthesize(&request).await?;
//! let gpx = TrackFileEncoder::encode(&route)?;
//! ```

pub mod config;
pub mod elevation;
pub mod errors;
pub mod generator;
pub mod geocode;
pub mod geomath;
pub mod gpx;
pub mod models;
pub mod synthesizer;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{DifficultyParams, SynthesisConfig, TerrainParams};
    pub use crate::elevation::ElevationSynthesizer;
    pub use crate::errors::RouteError;
    pub use crate::generator::RoutePointGenerator;
    pub use crate::geocode::{GeocodeMatch, Geocoder, LocationResolver, NominatimClient};
    pub use crate::gpx::TrackFileEncoder;
    pub use crate::models::{
        AthleteProfile, Coordinate, Difficulty, GeneratedRoute, RouteMetadata, RoutePoint,
        RouteRequest, Terrain,
    };
    pub use crate::synthesizer::RouteSynthesizer;
}
