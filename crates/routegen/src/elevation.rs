//! Elevation profile synthesis.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SynthesisConfig;
use crate::models::{Coordinate, Difficulty, Terrain};

/// Assigns a closed-loop elevation profile to a point sequence.
///
/// Elevations follow a bounded random walk whose step range comes from the
/// difficulty tier, widened by the terrain tier. The accumulated walk is
/// linearly detrended so the loop-closing point returns to the start
/// elevation, and clamped so the profile never dips more than a bounded
/// floor below the start.
#[derive(Debug, Clone)]
pub struct ElevationSynthesizer {
    step_m: f64,
    base_m: f64,
    floor_m: f64,
}

impl ElevationSynthesizer {
    pub fn new(config: &SynthesisConfig, difficulty: Difficulty, terrain: Terrain) -> Self {
        Self {
            step_m: config.difficulty(difficulty).elevation_step_m
                * config.terrain(terrain).elevation_scale,
            base_m: config.base_elevation_m,
            floor_m: config.elevation_floor_m,
        }
    }

    /// Sets an elevation on every point and returns the total positive gain
    /// in meters. Deterministic for a given seed.
    pub fn assign(&self, points: &mut [Coordinate], seed: u64) -> f64 {
        if points.len() < 2 || self.step_m <= 0.0 {
            for point in points.iter_mut() {
                point.elevation = Some(self.base_m);
            }
            return 0.0;
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut offsets = Vec::with_capacity(points.len());
        let mut level = 0.0;
        offsets.push(0.0);
        for _ in 1..points.len() {
            level += rng.gen_range(-self.step_m..self.step_m);
            offsets.push(level);
        }

        // Detrend the walk so elevation(last) == elevation(first).
        let drift = offsets[offsets.len() - 1];
        let last_idx = (offsets.len() - 1) as f64;

        let mut gain = 0.0;
        let mut prev = self.base_m;
        for (i, (point, offset)) in points.iter_mut().zip(&offsets).enumerate() {
            let detrended = offset - drift * (i as f64 / last_idx);
            let elevation = (self.base_m + detrended).max(self.base_m - self.floor_m);
            if i > 0 && elevation > prev {
                gain += elevation - prev;
            }
            point.elevation = Some(elevation);
            prev = elevation;
        }

        gain
    }
}
