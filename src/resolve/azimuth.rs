use rayon::prelude::*;

use crate::data::{AzimuthRecord, Detection, Orientation};
use crate::error::LocateError;
use crate::geometry::{normalize_bearing, FaceGeometry};

/// Resolves the bearing of a single detection from its bounding-box center.
///
/// The heading offset is applied after the face geometry, then the result is
/// normalized back into `[0, 360)`. A detection centered exactly on the
/// zenith/nadir singularity has no bearing and reports `UndefinedGeometry`
/// instead of a silent 0.
pub fn resolve_azimuth(
    detection: &Detection,
    geometry: &FaceGeometry,
    orientation: &Orientation,
) -> Result<f64, LocateError> {
    let raw = geometry
        .azimuth_from_pixel(
            detection.face,
            detection.bbox.cx() as f64,
            detection.bbox.cy() as f64,
        )
        .ok_or(LocateError::UndefinedGeometry {
            face: detection.face,
            index: detection.index,
        })?;
    Ok(normalize_bearing(raw + orientation.heading_deg))
}

/// Resolves bearings for a whole detection set.
///
/// Each detection is independent, so the map runs in parallel. Detections
/// with undefined geometry are omitted from the output; the omission is what
/// downstream consumers observe, not a sentinel value.
pub fn resolve_azimuths(
    detections: &[Detection],
    geometry: &FaceGeometry,
    orientation: &Orientation,
) -> Vec<AzimuthRecord> {
    detections
        .par_iter()
        .filter_map(|det| match resolve_azimuth(det, geometry, orientation) {
            Ok(bearing) => Some(AzimuthRecord::new(det.index, bearing)),
            Err(err) => {
                log::warn!("Skipping detection {}: {}", det.index, err);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CubeFace, FaceBox};

    fn det(index: usize, face: CubeFace, cx: f32, cy: f32) -> Detection {
        Detection::new(
            index,
            face,
            FaceBox::default().with_cxcy_wh(cx, cy, 10.0, 10.0),
            0,
            0.9,
        )
    }

    #[test]
    fn heading_offset_rotates_and_wraps() {
        let geom = FaceGeometry::new(512);
        let front_center = det(0, CubeFace::Front, 256.0, 256.0);

        let east = resolve_azimuth(&front_center, &geom, &Orientation::new(90.0)).unwrap();
        assert!((east - 90.0).abs() < 1e-9);

        let wrapped = resolve_azimuth(&front_center, &geom, &Orientation::new(-10.0)).unwrap();
        assert!((wrapped - 350.0).abs() < 1e-9);
    }

    #[test]
    fn pole_detection_is_omitted_not_zeroed() {
        let geom = FaceGeometry::new(512);
        let detections = vec![
            det(0, CubeFace::Front, 256.0, 256.0),
            det(1, CubeFace::Up, 256.0, 256.0),
            det(2, CubeFace::Right, 256.0, 256.0),
        ];

        let records = resolve_azimuths(&detections, &geom, &Orientation::default());
        let indices: Vec<usize> = records.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 2]);
        for record in &records {
            assert!(record.bearing_degrees >= 0.0 && record.bearing_degrees < 360.0);
        }
    }

    #[test]
    fn seam_neighbors_stay_continuous() {
        let geom = FaceGeometry::new(1000);
        let west_of_seam = resolve_azimuth(
            &det(0, CubeFace::Front, 499.5, 500.0),
            &geom,
            &Orientation::default(),
        )
        .unwrap();
        let east_of_seam = resolve_azimuth(
            &det(1, CubeFace::Front, 500.5, 500.0),
            &geom,
            &Orientation::default(),
        )
        .unwrap();

        assert!(west_of_seam < 360.0 && west_of_seam > 359.9);
        assert!(east_of_seam >= 0.0 && east_of_seam < 0.1);
        let gap = (east_of_seam - west_of_seam).rem_euclid(360.0);
        assert!(gap < 0.2, "adjacent pixels diverged across the seam: {}", gap);
    }
}
