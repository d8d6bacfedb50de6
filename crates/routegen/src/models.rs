//! Core data model for route synthesis.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

/// A geographic point, optionally carrying an elevation in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
    pub elevation: Option<f64>,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            elevation: None,
        }
    }
}

/// Route difficulty tier, controlling pace and elevation variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Medium => write!(f, "medium"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

/// Terrain tier, controlling path winding and elevation variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    Flat,
    Rolling,
    Hilly,
}

impl FromStr for Terrain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "flat" => Ok(Self::Flat),
            "rolling" => Ok(Self::Rolling),
            "hilly" => Ok(Self::Hilly),
            other => Err(format!("unknown terrain: {other}")),
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat => write!(f, "flat"),
            Self::Rolling => write!(f, "rolling"),
            Self::Hilly => write!(f, "hilly"),
        }
    }
}

/// Athlete preferences supplied by the caller. Read-only input to synthesis;
/// the name is used only for labeling the generated route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AthleteProfile {
    pub name: String,
    pub difficulty: Difficulty,
    pub terrain: Terrain,
}

/// A single route-synthesis request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRequest {
    /// Raw coordinate pair ("48.8566, 2.3522") or a place name / address.
    pub start_location: String,
    /// Target loop distance in kilometers.
    pub distance_km: f64,
    pub athlete: AthleteProfile,
    /// Pin this to reproduce an identical route shape; `None` draws a fresh
    /// seed per request.
    #[serde(default)]
    pub shape_seed: Option<u64>,
}

/// A coordinate on the generated route plus the distance covered so far.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub coordinate: Coordinate,
    /// Cumulative distance from the start, in meters.
    pub cumulative_m: f64,
}

/// Summary statistics for a generated route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteMetadata {
    /// Realized loop distance in kilometers. May differ slightly from the
    /// requested distance.
    pub distance_km: f64,
    /// Total positive elevation gain in meters.
    pub elevation_gain_m: f64,
    /// Estimated riding time for the athlete's difficulty tier.
    pub estimated_duration: Duration,
    pub difficulty: Difficulty,
    pub terrain: Terrain,
    /// Seed that produced this route shape; replaying it reproduces the
    /// exact point sequence.
    pub shape_seed: u64,
}

/// A fully synthesized loop route, ready to be encoded.
///
/// First and last point are identical. Produced once per request and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedRoute {
    pub title: String,
    pub athlete_name: String,
    pub points: Vec<RoutePoint>,
    pub metadata: RouteMetadata,
    pub created_at: OffsetDateTime,
}
