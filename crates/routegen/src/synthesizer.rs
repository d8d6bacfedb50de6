//! Route synthesis orchestration.

use geo::{Distance as _, Haversine, geometry::Point};
use rand::Rng;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info};

use crate::config::SynthesisConfig;
use crate::elevation::ElevationSynthesizer;
use crate::errors::RouteError;
use crate::generator::RoutePointGenerator;
use crate::geocode::{Geocoder, LocationResolver};
use crate::models::{GeneratedRoute, RouteMetadata, RoutePoint, RouteRequest};

/// Salt XORed into the shape seed for the elevation stream, so one request
/// seed reproduces the whole route while the two stages draw independently.
const ELEVATION_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Composes location resolution, loop generation, elevation assignment, and
/// metadata computation into a single stateless operation per request.
pub struct RouteSynthesizer {
    config: SynthesisConfig,
    resolver: LocationResolver,
    generator: RoutePointGenerator,
}

impl RouteSynthesizer {
    pub fn new(geocoder: Box<dyn Geocoder>) -> Self {
        Self::with_config(SynthesisConfig::default(), geocoder)
    }

    pub fn with_config(config: SynthesisConfig, geocoder: Box<dyn Geocoder>) -> Self {
        Self {
            generator: RoutePointGenerator::new(config.clone()),
            resolver: LocationResolver::new(geocoder),
            config,
        }
    }

    /// Synthesizes a loop route for the request.
    ///
    /// The distance bound is checked before any resolution or generation
    /// work. Errors from location resolution propagate unchanged.
    pub async fn synthesize(&self, request: &RouteRequest) -> Result<GeneratedRoute, RouteError> {
        let distance_km = request.distance_km;
        if !distance_km.is_finite()
            || distance_km < self.config.min_distance_km
            || distance_km > self.config.max_distance_km
        {
            return Err(RouteError::InvalidDistance {
                km: distance_km,
                min: self.config.min_distance_km,
                max: self.config.max_distance_km,
            });
        }

        let start = self.resolver.resolve(&request.start_location).await?;

        let seed = request
            .shape_seed
            .unwrap_or_else(|| rand::thread_rng().r#gen());
        debug!(seed, distance_km, "generating loop shape");

        let mut coords =
            self.generator
                .generate(start, distance_km, request.athlete.terrain, seed);

        let elevation = ElevationSynthesizer::new(
            &self.config,
            request.athlete.difficulty,
            request.athlete.terrain,
        );
        let gain_m = elevation.assign(&mut coords, seed ^ ELEVATION_SEED_SALT);

        let mut points = Vec::with_capacity(coords.len());
        let mut cumulative_m = 0.0;
        let mut prev: Option<Point> = None;
        for coordinate in coords {
            let here = Point::new(coordinate.lon, coordinate.lat);
            if let Some(p) = prev {
                cumulative_m += Haversine.distance(p, here);
            }
            prev = Some(here);
            points.push(RoutePoint {
                coordinate,
                cumulative_m,
            });
        }

        let realized_km = cumulative_m / 1000.0;
        let pace = self.config.difficulty(request.athlete.difficulty);
        let hours = realized_km / pace.avg_speed_kmh
            + (gain_m / 100.0) * pace.climb_secs_per_100m / 3600.0;
        let estimated_duration = Duration::seconds((hours * 3600.0).round() as i64);

        info!(
            realized_km,
            gain_m,
            points = points.len(),
            "route synthesized"
        );

        Ok(GeneratedRoute {
            title: format!(
                "{}'s {:.0} km Training Route",
                request.athlete.name, distance_km
            ),
            athlete_name: request.athlete.name.clone(),
            points,
            metadata: RouteMetadata {
                distance_km: realized_km,
                elevation_gain_m: gain_m,
                estimated_duration,
                difficulty: request.athlete.difficulty,
                terrain: request.athlete.terrain,
                shape_seed: seed,
            },
            created_at: OffsetDateTime::now_utc(),
        })
    }
}
