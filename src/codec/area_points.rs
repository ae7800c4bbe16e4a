use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AreaParseError {
    #[error("malformed area points: {0}")]
    Json(#[from] serde_json::Error),
    #[error("vertex {index} out of range: ({lat}, {lon})")]
    OutOfRange { index: usize, lat: f64, lon: f64 },
}

/// Vertex written as an object, `{"lat": .., "lon": ..}`
#[derive(Debug, Serialize, Deserialize)]
struct LatLon {
    #[serde(alias = "latitude")]
    lat: f64,
    #[serde(alias = "longitude")]
    lon: f64,
}

/// The two coordinate string layouts found in cached team rows
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAreaPoints {
    Objects(Vec<LatLon>),
    Pairs(Vec<[f64; 2]>),
}

/// Decode a serialized coordinate string into (lat, lon) vertices
///
/// Accepts either an array of `{"lat", "lon"}` objects or an array of
/// `[lat, lon]` pairs. Vertex order is preserved.
pub fn parse_area_points(json: &str) -> Result<Vec<(f64, f64)>, AreaParseError> {
    let raw: RawAreaPoints = serde_json::from_str(json)?;

    let points: Vec<(f64, f64)> = match raw {
        RawAreaPoints::Objects(objs) => objs.into_iter().map(|p| (p.lat, p.lon)).collect(),
        RawAreaPoints::Pairs(pairs) => pairs.into_iter().map(|[lat, lon]| (lat, lon)).collect(),
    };

    for (index, &(lat, lon)) in points.iter().enumerate() {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(AreaParseError::OutOfRange { index, lat, lon });
        }
    }

    Ok(points)
}

/// Encode vertices in the object layout
pub fn encode_area_points(points: &[(f64, f64)]) -> String {
    let objs: Vec<LatLon> = points
        .iter()
        .map(|&(lat, lon)| LatLon { lat, lon })
        .collect();
    // A Vec of plain f64 structs always serializes
    serde_json::to_string(&objs).unwrap_or_else(|_| "[]".to_string())
}
