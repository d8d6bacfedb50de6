//! Seeded loop-shape generation.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::config::SynthesisConfig;
use crate::geomath;
use crate::models::{Coordinate, Terrain};

/// Coefficient of variation for per-segment lengths.
const SEGMENT_LENGTH_CV: f64 = 0.1;

/// Generates closed polygon loops approximating a requested distance.
///
/// Way-points are placed around the start on evenly spaced bearings with a
/// terrain-dependent jitter. Segment lengths draw from a clamped normal
/// distribution around the remaining per-segment budget, so the cumulative
/// length tracks the target as points are placed. The loop is closed by
/// re-appending the start coordinate.
///
/// Generation is fully deterministic for a given seed.
pub struct RoutePointGenerator {
    config: SynthesisConfig,
}

impl RoutePointGenerator {
    pub fn new(config: SynthesisConfig) -> Self {
        Self { config }
    }

    /// Number of loop segments for a target distance, keeping per-segment
    /// length near the configured target while never dropping below the
    /// minimum way-point count.
    pub fn waypoint_count(&self, distance_km: f64) -> usize {
        let scaled = (distance_km / self.config.target_segment_km).round() as usize;
        scaled.max(self.config.min_waypoints)
    }

    /// Generates an ordered closed loop starting and ending at `start`.
    ///
    /// The returned sequence always has at least 4 points, the first and
    /// last coordinates are identical, and the cumulative path length stays
    /// within the configured tolerance of `distance_km`.
    pub fn generate(
        &self,
        start: Coordinate,
        distance_km: f64,
        terrain: Terrain,
        seed: u64,
    ) -> Vec<Coordinate> {
        let n = self.waypoint_count(distance_km);
        let jitter = self.config.terrain(terrain).bearing_jitter_rad;
        let mut rng = StdRng::seed_from_u64(seed);
        let length_noise = Normal::new(1.0, SEGMENT_LENGTH_CV).unwrap();

        let mut points = Vec::with_capacity(n + 1);
        points.push(start);
        let mut current = start;
        let mut planned_km = 0.0;

        for i in 0..n - 1 {
            // Budget covers the remaining segments including the closing leg,
            // so earlier deviations are rescaled away over the rest of the loop.
            let segments_left = (n - i) as f64;
            let budget_km = distance_km - planned_km;
            let factor: f64 = length_noise.sample(&mut rng).clamp(0.8, 1.2);
            let step_km = (budget_km / segments_left) * factor;
            let wobble = rng.gen_range(-jitter..jitter);

            let bearing = TAU * i as f64 / n as f64 + wobble;
            let (lat, lon) =
                geomath::destination(current.lat, current.lon, bearing, step_km * 1000.0);
            let mut next = Coordinate::new(lat, lon);

            // The closing leg must fit inside whatever budget is left. If the
            // scheduled bearing would carry the path out of reach, head back
            // toward the start instead.
            let after_km = budget_km - step_km;
            let home_km =
                geomath::haversine_distance_m(lat, lon, start.lat, start.lon) / 1000.0;
            if home_km > after_km {
                let home_bearing =
                    geomath::initial_bearing(current.lat, current.lon, start.lat, start.lon);
                let (lat, lon) = geomath::destination(
                    current.lat,
                    current.lon,
                    home_bearing + wobble * 0.25,
                    step_km * 1000.0,
                );
                next = Coordinate::new(lat, lon);
            }

            points.push(next);
            current = next;
            planned_km += step_km;
        }

        points.push(start);
        points
    }
}
