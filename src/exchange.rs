//! Typed load/save for the intermediate artifacts that decouple the pipeline
//! stages. Each artifact is one JSON array of records, so any stage can be
//! re-run on its own from files on disk.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::LocateError;

pub const DETECTIONS_FILE: &str = "detections.json";
pub const AZIMUTHS_FILE: &str = "azimuths.json";
pub const DISTANCES_FILE: &str = "distances.json";
pub const COORDINATES_FILE: &str = "coordinates.json";

pub fn save_records<T: Serialize>(path: &Path, records: &[T]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Loads one artifact. An absent or malformed file is a `MissingInput`: the
/// stage that needs it cannot run for this image.
pub fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LocateError> {
    let json = fs::read_to_string(path)
        .map_err(|err| LocateError::missing_input(path.display().to_string(), err))?;
    serde_json::from_str(&json).map_err(|err| {
        LocateError::missing_input(path.display().to_string(), format!("malformed JSON: {err}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CubeFace, Detection, DistanceRecord, FaceBox};

    #[test]
    fn detection_wire_shape_matches_artifact_format() {
        let det = Detection::new(3, CubeFace::Right, FaceBox::new(1.0, 2.0, 3.0, 4.0), 7, 0.5)
            .with_label("car");
        let json = serde_json::to_value(&det).unwrap();
        assert_eq!(json["index"], 3);
        assert_eq!(json["face"], "right");
        assert_eq!(json["bbox"][0], 1.0);
        assert_eq!(json["class"], 7);
        assert_eq!(json["label"], "car");
    }

    #[test]
    fn absent_distance_serializes_as_null() {
        let json = serde_json::to_string(&DistanceRecord::new(2, None)).unwrap();
        assert!(json.contains("\"distance_meters\":null"));
    }

    #[test]
    fn round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DISTANCES_FILE);
        let records = vec![
            DistanceRecord::new(0, Some(12.5)),
            DistanceRecord::new(1, None),
        ];

        save_records(&path, &records).unwrap();
        let loaded: Vec<DistanceRecord> = load_records(&path).unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn missing_artifact_is_missing_input() {
        let err = load_records::<DistanceRecord>(Path::new("/nonexistent/distances.json"))
            .unwrap_err();
        assert!(matches!(err, LocateError::MissingInput { .. }));
    }
}
