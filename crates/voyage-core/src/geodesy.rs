//! Great-circle math for route legs.

use crate::error::{Result, VoyageError};
use crate::models::Coordinate;

/// Mean Earth radius in nautical miles.
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// Calculate the great-circle distance between two points in nautical miles
/// using the haversine formula.
///
/// Symmetric in its arguments and 0 for identical points. Fails only when a
/// coordinate component is not finite.
pub fn distance_nm(a: Coordinate, b: Coordinate) -> Result<f64> {
    ensure_finite(a)?;
    ensure_finite(b)?;

    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let dphi = (b.lat - a.lat).to_radians();
    let dlambda = (b.lon - a.lon).to_radians();
    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    // Rounding can push h a hair outside [0, 1] for antipodal points.
    let h = h.clamp(0.0, 1.0);
    Ok(2.0 * EARTH_RADIUS_NM * h.sqrt().atan2((1.0 - h).sqrt()))
}

/// Initial bearing from `a` to `b` in degrees, normalized to [0, 360).
///
/// The direction between identical points is undefined; 0 is returned.
pub fn bearing_deg(a: Coordinate, b: Coordinate) -> Result<f64> {
    ensure_finite(a)?;
    ensure_finite(b)?;
    if a == b {
        return Ok(0.0);
    }

    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let delta_lambda = (b.lon - a.lon).to_radians();

    let y = delta_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    Ok(normalize_degrees(y.atan2(x).to_degrees()))
}

/// Sum of all leg distances along a waypoint sequence.
pub fn route_distance_nm(waypoints: &[Coordinate]) -> Result<f64> {
    waypoints
        .windows(2)
        .map(|pair| distance_nm(pair[0], pair[1]))
        .sum()
}

/// Wrap an angle in degrees into [0, 360).
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

fn ensure_finite(point: Coordinate) -> Result<()> {
    if point.lat.is_finite() && point.lon.is_finite() {
        Ok(())
    } else {
        Err(VoyageError::InvalidCoordinate {
            lat: point.lat,
            lon: point.lon,
        })
    }
}
