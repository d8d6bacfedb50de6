//! End-to-end synthesis tests.
//!
//! These tests run fully offline: geocoding goes through mock [`Geocoder`]
//! implementations, and every route pins a shape seed so results are
//! reproducible.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use routegen::prelude::*;

/// Geocoder with a small fixed gazetteer, best match first.
struct FixedGeocoder;

#[async_trait]
impl Geocoder for FixedGeocoder {
    async fn geocode(&self, query: &str) -> Result<Vec<GeocodeMatch>, RouteError> {
        match query {
            "Boulder, CO" => Ok(vec![
                GeocodeMatch {
                    coordinate: Coordinate::new(40.0150, -105.2705),
                    confidence: 0.9,
                },
                GeocodeMatch {
                    coordinate: Coordinate::new(40.1000, -105.0000),
                    confidence: 0.2,
                },
            ]),
            _ => Ok(Vec::new()),
        }
    }
}

/// Geocoder that simulates a transport outage.
struct UnreachableGeocoder;

#[async_trait]
impl Geocoder for UnreachableGeocoder {
    async fn geocode(&self, _query: &str) -> Result<Vec<GeocodeMatch>, RouteError> {
        Err(RouteError::GeocodingUnavailable(
            "connection timed out".to_string(),
        ))
    }
}

/// Geocoder that records how often it is consulted.
struct CountingGeocoder {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Geocoder for CountingGeocoder {
    async fn geocode(&self, _query: &str) -> Result<Vec<GeocodeMatch>, RouteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }
}

fn paris_request(distance_km: f64, difficulty: Difficulty, terrain: Terrain) -> RouteRequest {
    RouteRequest {
        start_location: "48.8566, 2.3522".to_string(),
        distance_km,
        athlete: AthleteProfile {
            name: "Test Athlete".to_string(),
            difficulty,
            terrain,
        },
        shape_seed: Some(42),
    }
}

fn offline_synthesizer() -> RouteSynthesizer {
    RouteSynthesizer::new(Box::new(FixedGeocoder))
}

#[tokio::test]
async fn paris_easy_rolling_scenario() {
    let synthesizer = offline_synthesizer();
    let request = paris_request(25.0, Difficulty::Easy, Terrain::Rolling);

    let route = synthesizer.synthesize(&request).await.unwrap();

    assert!(route.points.len() >= 4);
    assert!((21.25..=28.75).contains(&route.metadata.distance_km));

    let first = route.points.first().unwrap().coordinate;
    let last = route.points.last().unwrap().coordinate;
    assert_eq!(first.lat, last.lat);
    assert_eq!(first.lon, last.lon);

    // Easy/rolling keeps the climbing modest.
    assert!(route.metadata.elevation_gain_m >= 0.0);
    assert!(route.metadata.elevation_gain_m < 300.0);
    assert!(route.metadata.estimated_duration.is_positive());
}

#[tokio::test]
async fn realized_distance_within_tolerance_across_tiers() {
    let synthesizer = offline_synthesizer();

    for distance in [1.0, 25.0, 200.0] {
        for terrain in [Terrain::Flat, Terrain::Rolling, Terrain::Hilly] {
            for seed in [1, 2, 3] {
                let mut request = paris_request(distance, Difficulty::Medium, terrain);
                request.shape_seed = Some(seed);

                let route = synthesizer.synthesize(&request).await.unwrap();
                let deviation = (route.metadata.distance_km - distance).abs() / distance;
                assert!(
                    deviation <= 0.15,
                    "distance {distance} km terrain {terrain} seed {seed}: \
                     realized {:.2} km",
                    route.metadata.distance_km
                );
            }
        }
    }
}

#[tokio::test]
async fn pinned_seed_reproduces_route() {
    let synthesizer = offline_synthesizer();
    let request = paris_request(40.0, Difficulty::Hard, Terrain::Hilly);

    let a = synthesizer.synthesize(&request).await.unwrap();
    let b = synthesizer.synthesize(&request).await.unwrap();

    assert_eq!(a.points, b.points);
    assert_eq!(a.metadata.distance_km, b.metadata.distance_km);
    assert_eq!(a.metadata.elevation_gain_m, b.metadata.elevation_gain_m);
}

#[tokio::test]
async fn distinct_seeds_produce_distinct_shapes() {
    let synthesizer = offline_synthesizer();
    let mut first = paris_request(40.0, Difficulty::Medium, Terrain::Rolling);
    first.shape_seed = Some(1);
    let mut second = paris_request(40.0, Difficulty::Medium, Terrain::Rolling);
    second.shape_seed = Some(2);

    let a = synthesizer.synthesize(&first).await.unwrap();
    let b = synthesizer.synthesize(&second).await.unwrap();

    assert_ne!(a.points, b.points);
}

#[tokio::test]
async fn elevation_profile_closes_loop() {
    let synthesizer = offline_synthesizer();

    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let route = synthesizer
            .synthesize(&paris_request(50.0, difficulty, Terrain::Hilly))
            .await
            .unwrap();

        let first = route.points.first().unwrap().coordinate.elevation.unwrap();
        let last = route.points.last().unwrap().coordinate.elevation.unwrap();
        assert!(
            (first - last).abs() <= 5.0,
            "difficulty {difficulty}: profile drifts {first:.1} -> {last:.1}"
        );
    }
}

#[tokio::test]
async fn distance_bounds_are_inclusive() {
    let synthesizer = offline_synthesizer();

    for invalid in [0.0, 201.0, -5.0] {
        let result = synthesizer
            .synthesize(&paris_request(invalid, Difficulty::Medium, Terrain::Rolling))
            .await;
        assert!(
            matches!(result, Err(RouteError::InvalidDistance { .. })),
            "distance {invalid} should be rejected"
        );
    }

    for valid in [1.0, 200.0] {
        let result = synthesizer
            .synthesize(&paris_request(valid, Difficulty::Medium, Terrain::Rolling))
            .await;
        assert!(result.is_ok(), "distance {valid} should be accepted");
    }
}

#[tokio::test]
async fn invalid_distance_rejected_before_geocoding() {
    let calls = Arc::new(AtomicUsize::new(0));
    let synthesizer = RouteSynthesizer::new(Box::new(CountingGeocoder {
        calls: calls.clone(),
    }));

    let request = RouteRequest {
        start_location: "Boulder, CO".to_string(),
        distance_km: 500.0,
        athlete: AthleteProfile {
            name: "Test Athlete".to_string(),
            difficulty: Difficulty::Hard,
            terrain: Terrain::Hilly,
        },
        shape_seed: Some(1),
    };

    let result = synthesizer.synthesize(&request).await;

    assert!(matches!(result, Err(RouteError::InvalidDistance { .. })));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unknown_place_is_not_found() {
    let synthesizer = offline_synthesizer();
    let mut request = paris_request(25.0, Difficulty::Medium, Terrain::Rolling);
    request.start_location = "Nonexistent Place Qx7".to_string();

    let result = synthesizer.synthesize(&request).await;
    assert!(matches!(result, Err(RouteError::LocationNotFound(_))));
}

#[tokio::test]
async fn geocoder_outage_surfaces_as_unavailable() {
    let synthesizer = RouteSynthesizer::new(Box::new(UnreachableGeocoder));
    let mut request = paris_request(25.0, Difficulty::Medium, Terrain::Rolling);
    request.start_location = "Boulder, CO".to_string();

    let result = synthesizer.synthesize(&request).await;
    assert!(matches!(result, Err(RouteError::GeocodingUnavailable(_))));
}

#[tokio::test]
async fn geocoded_start_uses_best_match() {
    let synthesizer = offline_synthesizer();
    let mut request = paris_request(20.0, Difficulty::Medium, Terrain::Rolling);
    request.start_location = "Boulder, CO".to_string();

    let route = synthesizer.synthesize(&request).await.unwrap();
    let start = route.points.first().unwrap().coordinate;

    assert!((start.lat - 40.0150).abs() < 1e-9);
    assert!((start.lon - -105.2705).abs() < 1e-9);
}

#[tokio::test]
async fn malformed_coordinate_string_rejected() {
    let synthesizer = offline_synthesizer();
    let mut request = paris_request(25.0, Difficulty::Medium, Terrain::Rolling);
    request.start_location = "48.8566, 2.3522, 7.0".to_string();

    let result = synthesizer.synthesize(&request).await;
    assert!(matches!(
        result,
        Err(RouteError::InvalidCoordinateFormat(_))
    ));
}

#[tokio::test]
async fn encoded_route_round_trips() {
    let synthesizer = offline_synthesizer();
    let route = synthesizer
        .synthesize(&paris_request(25.0, Difficulty::Medium, Terrain::Rolling))
        .await
        .unwrap();

    let gpx = TrackFileEncoder::encode(&route).unwrap();
    let decoded = TrackFileEncoder::decode_points(&gpx).unwrap();

    assert_eq!(decoded.len(), route.points.len());
    for (decoded, original) in decoded.iter().zip(&route.points) {
        assert!((decoded.lat - original.coordinate.lat).abs() < 1e-6);
        assert!((decoded.lon - original.coordinate.lon).abs() < 1e-6);
        assert!(
            (decoded.elevation.unwrap() - original.coordinate.elevation.unwrap()).abs() < 0.06
        );
    }
}
