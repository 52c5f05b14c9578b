use std::collections::HashMap;

use rayon::prelude::*;

use crate::data::{AzimuthRecord, CameraPose, Detection, DistanceRecord, GeoCoordinate};
use crate::error::LocateError;
use crate::geometry::destination_point;

/// Joins azimuth and distance records by detection index and projects every
/// complete pair to a destination GPS coordinate.
///
/// A detection missing its bearing, or carrying a null distance, produces no
/// output record. That omission is the observable signal for downstream
/// quality metrics; it is never conflated with a zero-distance placement at
/// the camera position.
pub fn resolve_coordinates(
    pose: &CameraPose,
    detections: &[Detection],
    azimuths: &[AzimuthRecord],
    distances: &[DistanceRecord],
) -> Result<Vec<GeoCoordinate>, LocateError> {
    let bearings: HashMap<usize, f64> = azimuths
        .iter()
        .map(|r| (r.index, r.bearing_degrees))
        .collect();
    let meters: HashMap<usize, f64> = distances
        .iter()
        .filter_map(|r| r.distance_meters.map(|d| (r.index, d)))
        .collect();

    let coordinates: Vec<GeoCoordinate> = detections
        .par_iter()
        .filter_map(|det| {
            let bearing = *bearings.get(&det.index)?;
            let distance = *meters.get(&det.index)?;
            if distance < 0.0 {
                log::warn!(
                    "Detection {} has a negative distance ({} m), treating as absent",
                    det.index,
                    distance
                );
                return None;
            }
            let (latitude, longitude) =
                destination_point(pose.latitude, pose.longitude, bearing, distance);
            Some(GeoCoordinate {
                index: det.index,
                latitude,
                longitude,
                class_id: det.class_id,
                label: det.label.clone(),
                confidence: det.confidence,
            })
        })
        .collect();

    // The projection clamps and normalizes, so anything outside these ranges
    // is a broken invariant rather than bad input.
    for coord in &coordinates {
        if !coord.latitude.is_finite() || coord.latitude.abs() > 90.0 {
            debug_assert!(false, "latitude out of range: {}", coord.latitude);
            return Err(LocateError::NumericDomain {
                operation: "destination_point latitude",
                value: coord.latitude,
            });
        }
        if !coord.longitude.is_finite() || coord.longitude.abs() > 180.0 {
            debug_assert!(false, "longitude out of range: {}", coord.longitude);
            return Err(LocateError::NumericDomain {
                operation: "destination_point longitude",
                value: coord.longitude,
            });
        }
    }

    Ok(coordinates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CubeFace, FaceBox};

    fn det(index: usize) -> Detection {
        Detection::new(index, CubeFace::Front, FaceBox::new(0.0, 0.0, 10.0, 10.0), 1, 0.8)
    }

    #[test]
    fn join_keeps_only_complete_pairs() {
        let pose = CameraPose::new(40.0, -3.0);
        let detections = vec![det(0), det(1), det(2), det(3)];
        let azimuths = vec![
            AzimuthRecord::new(0, 90.0),
            AzimuthRecord::new(1, 180.0),
            AzimuthRecord::new(3, 270.0),
        ];
        let distances = vec![
            DistanceRecord::new(0, Some(1000.0)),
            DistanceRecord::new(1, None),
            DistanceRecord::new(2, Some(50.0)),
        ];

        let coords = resolve_coordinates(&pose, &detections, &azimuths, &distances).unwrap();
        let indices: Vec<usize> = coords.iter().map(|c| c.index).collect();
        // 1 has a null distance, 2 has no bearing, 3 has no distance record.
        assert_eq!(indices, vec![0]);
        assert_eq!(coords[0].class_id, 1);
        assert_eq!(coords[0].confidence, 0.8);
    }

    #[test]
    fn negative_distance_is_treated_as_absent() {
        let pose = CameraPose::new(40.0, -3.0);
        let detections = vec![det(0)];
        let azimuths = vec![AzimuthRecord::new(0, 90.0)];
        let distances = vec![DistanceRecord::new(0, Some(-5.0))];

        let coords = resolve_coordinates(&pose, &detections, &azimuths, &distances).unwrap();
        assert!(coords.is_empty());
    }
}
