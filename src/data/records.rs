use serde::{Deserialize, Serialize};

/// Bearing resolved for one detection, in degrees clockwise from true North,
/// always in `[0, 360)`. Face orientation is already folded in. A detection
/// whose bearing is undefined has no record at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AzimuthRecord {
    pub index: usize,
    pub bearing_degrees: f64,
}

impl AzimuthRecord {
    pub fn new(index: usize, bearing_degrees: f64) -> Self {
        Self {
            index,
            bearing_degrees,
        }
    }
}

/// Distance resolved for one detection, in meters. `None` means depth
/// estimation failed for the region and must propagate as absence, never as
/// a zero distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceRecord {
    pub index: usize,
    pub distance_meters: Option<f64>,
}

impl DistanceRecord {
    pub fn new(index: usize, distance_meters: Option<f64>) -> Self {
        Self {
            index,
            distance_meters,
        }
    }
}

/// Final geolocated detection. Exists only for indices that have both a
/// bearing and a non-null distance; class and confidence ride along for
/// traceability back to the detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub index: usize,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "class")]
    pub class_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub confidence: f32,
}
