//! Tuning parameters for route synthesis.
//!
//! All difficulty and terrain tables live here rather than as module-level
//! constants, so deployments can tune pace and elevation behavior without
//! recompiling.

use serde::{Deserialize, Serialize};

use crate::models::{Difficulty, Terrain};

/// Pace and elevation parameters for one difficulty tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DifficultyParams {
    /// Average riding speed in km/h used for duration estimates.
    pub avg_speed_kmh: f64,
    /// Extra seconds added per 100 m of climbing.
    pub climb_secs_per_100m: f64,
    /// Half-range of the per-segment elevation delta, in meters.
    pub elevation_step_m: f64,
}

/// Path and elevation parameters for one terrain tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TerrainParams {
    /// Bearing jitter half-range in radians. Small values produce a
    /// near-regular polygon, larger ones a winding loop.
    pub bearing_jitter_rad: f64,
    /// Multiplier applied to the difficulty elevation step.
    pub elevation_scale: f64,
}

/// Configuration for route synthesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Minimum accepted request distance in kilometers.
    pub min_distance_km: f64,
    /// Maximum accepted request distance in kilometers.
    pub max_distance_km: f64,
    /// Accepted relative deviation of realized distance from the target.
    pub distance_tolerance: f64,
    /// Lower bound on the way-point count regardless of distance.
    pub min_waypoints: usize,
    /// Preferred segment length used to derive the way-point count.
    pub target_segment_km: f64,
    /// Baseline elevation assigned to the start point, in meters.
    pub base_elevation_m: f64,
    /// How far below the start elevation the profile may dip, in meters.
    pub elevation_floor_m: f64,

    pub easy: DifficultyParams,
    pub medium: DifficultyParams,
    pub hard: DifficultyParams,

    pub flat: TerrainParams,
    pub rolling: TerrainParams,
    pub hilly: TerrainParams,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            min_distance_km: 1.0,
            max_distance_km: 200.0,
            distance_tolerance: 0.15,
            min_waypoints: 12,
            target_segment_km: 2.0,
            base_elevation_m: 150.0,
            elevation_floor_m: 80.0,
            easy: DifficultyParams {
                avg_speed_kmh: 24.0,
                climb_secs_per_100m: 30.0,
                elevation_step_m: 10.0,
            },
            medium: DifficultyParams {
                avg_speed_kmh: 20.0,
                climb_secs_per_100m: 45.0,
                elevation_step_m: 30.0,
            },
            hard: DifficultyParams {
                avg_speed_kmh: 16.0,
                climb_secs_per_100m: 60.0,
                elevation_step_m: 60.0,
            },
            flat: TerrainParams {
                bearing_jitter_rad: 0.08,
                elevation_scale: 0.5,
            },
            rolling: TerrainParams {
                bearing_jitter_rad: 0.3,
                elevation_scale: 1.0,
            },
            hilly: TerrainParams {
                bearing_jitter_rad: 0.55,
                elevation_scale: 1.5,
            },
        }
    }
}

impl SynthesisConfig {
    /// Parameters for a difficulty tier.
    pub fn difficulty(&self, tier: Difficulty) -> &DifficultyParams {
        match tier {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    /// Parameters for a terrain tier.
    pub fn terrain(&self, tier: Terrain) -> &TerrainParams {
        match tier {
            Terrain::Flat => &self.flat,
            Terrain::Rolling => &self.rolling,
            Terrain::Hilly => &self.hilly,
        }
    }
}
