use super::{normalize_bearing, normalize_longitude};

/// Mean Earth radius in meters (spherical model).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle destination point: where you end up after traveling
/// `distance_m` meters from `(lat_deg, lon_deg)` along the initial bearing
/// `bearing_deg` (degrees clockwise from North).
///
/// Degrees at the boundary, radians inside. The asin argument is clamped to
/// `[-1, 1]` before the call, so a distance overshooting a pole folds over it
/// instead of raising a domain error. Zero distance returns the origin
/// bit-exactly.
pub fn destination_point(lat_deg: f64, lon_deg: f64, bearing_deg: f64, distance_m: f64) -> (f64, f64) {
    if distance_m == 0.0 {
        return (lat_deg, lon_deg);
    }

    let lat1 = lat_deg.to_radians();
    let lon1 = lon_deg.to_radians();
    let theta = normalize_bearing(bearing_deg).to_radians();
    let delta = distance_m / EARTH_RADIUS_M;

    let sin_lat2 =
        (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).clamp(-1.0, 1.0);
    let lat2 = sin_lat2.asin();
    let lon2 = lon1
        + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * sin_lat2);

    (lat2.to_degrees(), normalize_longitude(lon2.to_degrees()))
}

/// Great-circle (haversine) distance between two points, in meters.
pub fn great_circle_distance(lat1_deg: f64, lon1_deg: f64, lat2_deg: f64, lon2_deg: f64) -> f64 {
    let lat1 = lat1_deg.to_radians();
    let lat2 = lat2_deg.to_radians();
    let dlat = (lat2_deg - lat1_deg).to_radians();
    let dlon = (lon2_deg - lon1_deg).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().clamp(-1.0, 1.0).asin();
    EARTH_RADIUS_M * c
}

/// Initial bearing of the great circle from the first point to the second,
/// in degrees clockwise from North, in `[0, 360)`.
pub fn initial_bearing(lat1_deg: f64, lon1_deg: f64, lat2_deg: f64, lon2_deg: f64) -> f64 {
    let lat1 = lat1_deg.to_radians();
    let lat2 = lat2_deg.to_radians();
    let dlon = (lon2_deg - lon1_deg).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    normalize_bearing(y.atan2(x).to_degrees())
}
