//! Haversine distance and geofence containment. Pure functions, no state;
//! callers are responsible for validating coordinates first
//! (`GeoPoint::is_valid`).

use crate::model::GeoPoint;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Slack added to the fence radius so a zero-radius fence still accepts an
/// exactly coincident sample despite floating-point rounding.
pub const FENCE_EPSILON_M: f64 = 0.5;

/// Great-circle distance between two points, in meters.
pub fn distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let d_phi = (b.latitude - a.latitude).to_radians();
    let d_lambda = (b.longitude - a.longitude).to_radians();

    let h = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// True when `observed` lies within `radius_m` meters of `center`.
pub fn within_fence(observed: GeoPoint, center: GeoPoint, radius_m: f64) -> bool {
    distance(observed, center) <= radius_m + FENCE_EPSILON_M
}
