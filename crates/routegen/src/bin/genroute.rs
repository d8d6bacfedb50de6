//! Generates a training loop and writes it as a GPX document.
//!
//! Run with:
//! ```
//! cargo run -p routegen --bin genroute -- "48.8566, 2.3522" 25 easy rolling "Alex" route.gpx
//! ```
//!
//! Arguments: `<start> <distance-km> [difficulty] [terrain] [athlete] [output.gpx]`.
//! With no output path the document goes to stdout. Set `ROUTE_SEED` to pin
//! the shape seed and reproduce a previous route.

use std::io::Write;

use routegen::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        eprintln!("usage: genroute <start> <distance-km> [difficulty] [terrain] [athlete] [output.gpx]");
        std::process::exit(2);
    }

    let distance_km: f64 = args[1].parse()?;
    let difficulty: Difficulty = match args.get(2) {
        Some(raw) => raw.parse().map_err(anyhow::Error::msg)?,
        None => Difficulty::Medium,
    };
    let terrain: Terrain = match args.get(3) {
        Some(raw) => raw.parse().map_err(anyhow::Error::msg)?,
        None => Terrain::Rolling,
    };
    let athlete_name = args.get(4).cloned().unwrap_or_else(|| "Athlete".to_string());

    let shape_seed = match std::env::var("ROUTE_SEED") {
        Ok(raw) => Some(raw.parse()?),
        Err(_) => None,
    };

    let request = RouteRequest {
        start_location: args[0].clone(),
        distance_km,
        athlete: AthleteProfile {
            name: athlete_name,
            difficulty,
            terrain,
        },
        shape_seed,
    };

    let synthesizer = RouteSynthesizer::new(Box::new(NominatimClient::new()));
    let route = synthesizer.synthesize(&request).await?;
    let gpx = TrackFileEncoder::encode(&route)?;

    tracing::info!(
        distance_km = route.metadata.distance_km,
        elevation_gain_m = route.metadata.elevation_gain_m,
        duration_min = route.metadata.estimated_duration.whole_minutes(),
        seed = route.metadata.shape_seed,
        "route ready"
    );

    match args.get(5) {
        Some(path) => {
            std::fs::write(path, &gpx)?;
            tracing::info!(path = %path, "wrote GPX file");
        }
        None => std::io::stdout().write_all(&gpx)?,
    }

    Ok(())
}
