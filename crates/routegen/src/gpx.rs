//! GPX 1.1 encoding of generated routes.
//!
//! Produces schema-valid GPX with one track and one track segment, readable
//! by common consumer GPS and mapping tools.

use time::format_description::well_known::Rfc3339;

use crate::errors::RouteError;
use crate::models::{Coordinate, GeneratedRoute};

const GPX_CREATOR: &str = "routegen";

/// Serializes a [`GeneratedRoute`] into a GPX 1.1 document.
pub struct TrackFileEncoder;

impl TrackFileEncoder {
    /// Encodes the route as a GPX 1.1 XML document.
    ///
    /// Fails with [`RouteError::EncodingFailure`] only when a point carries
    /// a non-finite or out-of-range value, which upstream invariants should
    /// never allow.
    pub fn encode(route: &GeneratedRoute) -> Result<Vec<u8>, RouteError> {
        let created = route
            .created_at
            .format(&Rfc3339)
            .map_err(|e| RouteError::EncodingFailure(format!("bad creation time: {e}")))?;

        let mut gpx = String::new();

        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(&format!(r#"<gpx version="1.1" creator="{GPX_CREATOR}""#));
        gpx.push_str(r#" xmlns="http://www.topografix.com/GPX/1/1""#);
        gpx.push_str(r#" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance""#);
        gpx.push_str(r#" xsi:schemaLocation="http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd">"#);
        gpx.push('\n');

        gpx.push_str("  <metadata>\n");
        gpx.push_str(&format!("    <name>{}</name>\n", escape_xml(&route.title)));
        gpx.push_str(&format!(
            "    <desc>Training route for {}</desc>\n",
            escape_xml(&route.athlete_name)
        ));
        gpx.push_str(&format!("    <time>{created}</time>\n"));
        gpx.push_str("  </metadata>\n");

        gpx.push_str("  <trk>\n");
        gpx.push_str(&format!("    <name>{}</name>\n", escape_xml(&route.title)));
        gpx.push_str("    <trkseg>\n");

        for point in &route.points {
            let coord = point.coordinate;
            validate_point(&coord)?;

            gpx.push_str(&format!(
                r#"      <trkpt lat="{:.7}" lon="{:.7}">"#,
                coord.lat, coord.lon
            ));
            gpx.push('\n');
            if let Some(ele) = coord.elevation {
                gpx.push_str(&format!("        <ele>{ele:.1}</ele>\n"));
            }
            gpx.push_str("      </trkpt>\n");
        }

        gpx.push_str("    </trkseg>\n");
        gpx.push_str("  </trk>\n");
        gpx.push_str("</gpx>\n");

        Ok(gpx.into_bytes())
    }

    /// Reads the ordered coordinates back out of a GPX document.
    ///
    /// All tracks and segments are flattened in order. Mainly serves
    /// round-trip verification of encoder output.
    pub fn decode_points(data: &[u8]) -> Result<Vec<Coordinate>, RouteError> {
        let gpx = gpx::read(std::io::Cursor::new(data))
            .map_err(|e| RouteError::EncodingFailure(format!("failed to parse track file: {e}")))?;

        let mut points = Vec::new();
        for track in &gpx.tracks {
            for segment in &track.segments {
                for waypoint in &segment.points {
                    points.push(Coordinate {
                        lat: waypoint.point().y(),
                        lon: waypoint.point().x(),
                        elevation: waypoint.elevation,
                    });
                }
            }
        }

        Ok(points)
    }
}

fn validate_point(coord: &Coordinate) -> Result<(), RouteError> {
    let in_range = coord.lat.is_finite()
        && coord.lon.is_finite()
        && (-90.0..=90.0).contains(&coord.lat)
        && (-180.0..=180.0).contains(&coord.lon)
        && coord.elevation.is_none_or(f64::is_finite);

    if in_range {
        Ok(())
    } else {
        Err(RouteError::EncodingFailure(format!(
            "unrepresentable point: lat={} lon={} ele={:?}",
            coord.lat, coord.lon, coord.elevation
        )))
    }
}

/// Escapes XML special characters in a string.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
