use crate::models::Location;

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
/// Average walking pace, roughly 5 km/h.
pub const WALKING_SPEED_MPS: f64 = 1.4;

/// Great-circle distance in meters (haversine, spherical Earth).
///
/// Non-finite coordinates are not rejected: they come back as a non-finite
/// distance, so callers must validate positions they did not produce.
pub fn distance_meters(a: Location, b: Location) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push h a hair outside [0, 1] near antipodes; asin would return NaN.
    let c = 2.0 * h.clamp(0.0, 1.0).sqrt().asin();
    EARTH_RADIUS_M * c
}

/// Walking minutes for `meters`, rounded up. Zero distance is zero minutes.
pub fn walk_time_minutes(meters: f64) -> u32 {
    let seconds = meters / WALKING_SPEED_MPS;
    (seconds / 60.0).ceil() as u32
}

/// `"850m"` below one kilometer, `"1.2km"` from there on.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{}m", meters.round() as i64)
    } else {
        format!("{:.1}km", meters / 1000.0)
    }
}
