use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use exif::{Exif, In, Rational, Reader, Tag, Value};

use crate::data::CameraPose;
use crate::error::LocateError;

/// Reads the camera GPS origin from an image's EXIF tags.
///
/// The geodesic stage cannot run without an origin, so missing or malformed
/// GPS metadata is fatal for the image (and only for the image; a batch run
/// records the failure and moves on).
pub fn read_camera_pose(path: &Path) -> Result<CameraPose, LocateError> {
    let file = File::open(path)
        .map_err(|err| LocateError::missing_input(path.display().to_string(), err))?;
    let exif = Reader::new()
        .read_from_container(&mut BufReader::new(file))
        .map_err(|err| {
            LocateError::missing_input(path.display().to_string(), format!("no EXIF data: {err}"))
        })?;

    let latitude = gps_angle(&exif, Tag::GPSLatitude, Tag::GPSLatitudeRef, b'S')?;
    let longitude = gps_angle(&exif, Tag::GPSLongitude, Tag::GPSLongitudeRef, b'W')?;
    Ok(CameraPose::new(latitude, longitude))
}

/// One signed GPS angle from its value tag plus hemisphere reference tag.
fn gps_angle(exif: &Exif, tag: Tag, ref_tag: Tag, negative_ref: u8) -> Result<f64, LocateError> {
    let field = exif
        .get_field(tag, In::PRIMARY)
        .ok_or_else(|| LocateError::missing_input("GPS metadata", format!("no {tag} tag")))?;

    let dms = match &field.value {
        Value::Rational(parts) if parts.len() >= 3 => parts,
        _ => {
            return Err(LocateError::missing_input(
                "GPS metadata",
                format!("{tag} is not a degree/minute/second triple"),
            ))
        }
    };

    let degrees = dms_to_degrees(&dms[..3])?;
    let negative = match exif.get_field(ref_tag, In::PRIMARY).map(|f| &f.value) {
        Some(Value::Ascii(refs)) => refs
            .first()
            .and_then(|r| r.first())
            .is_some_and(|&c| c == negative_ref),
        _ => false,
    };

    Ok(if negative { -degrees } else { degrees })
}

fn dms_to_degrees(dms: &[Rational]) -> Result<f64, LocateError> {
    let degrees = dms[0].to_f64() + dms[1].to_f64() / 60.0 + dms[2].to_f64() / 3600.0;
    if !degrees.is_finite() {
        return Err(LocateError::missing_input(
            "GPS metadata",
            "non-finite coordinate (zero denominator?)",
        ));
    }
    Ok(degrees)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rational(num: u32, denom: u32) -> Rational {
        Rational { num, denom }
    }

    #[test]
    fn dms_converts_to_decimal_degrees() {
        // 40 degrees 26' 46.08" = 40.4461...
        let dms = [rational(40, 1), rational(26, 1), rational(4608, 100)];
        let deg = dms_to_degrees(&dms).unwrap();
        assert!((deg - 40.4461333333).abs() < 1e-9);
    }

    #[test]
    fn fractional_degree_rationals_are_supported() {
        let dms = [rational(403, 10), rational(0, 1), rational(0, 1)];
        let deg = dms_to_degrees(&dms).unwrap();
        assert!((deg - 40.3).abs() < 1e-12);
    }

    #[test]
    fn zero_denominator_is_rejected() {
        let dms = [rational(40, 0), rational(0, 1), rational(0, 1)];
        assert!(dms_to_degrees(&dms).is_err());
    }

    #[test]
    fn missing_file_is_missing_input() {
        let err = read_camera_pose(Path::new("/nonexistent/pano.jpg")).unwrap_err();
        assert!(matches!(err, LocateError::MissingInput { .. }));
    }
}
