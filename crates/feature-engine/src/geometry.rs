//! Geometry engine: great-circle distance between two coordinates.
//!
//! Haversine on a sphere of radius 6371 km. Both points are validated
//! before any trigonometry runs.

use crate::error::{ensure_finite, Result};
use crate::result::{guarded, DomainErrorKind, MetricResult};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

const LATITUDE_MAX: f64 = 90.0;
const LONGITUDE_MAX: f64 = 180.0;

/// Distance in kilometers between `(lat1, lon1)` and `(lat2, lon2)`.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> MetricResult<f64> {
    guarded("distance_km", || {
        validate_point(lat1, lon1)?;
        validate_point(lat2, lon2)?;
        ensure_finite(haversine(lat1, lon1, lat2, lon2), "distance")
    })
}

fn validate_point(lat: f64, lon: f64) -> Result<()> {
    // Written so NaN falls outside the domain
    if !(lat.abs() <= LATITUDE_MAX) || !(lon.abs() <= LONGITUDE_MAX) {
        return Err(DomainErrorKind::OutOfRange.into());
    }
    Ok(())
}

fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_r = lat1.to_radians();
    let lat2_r = lat2.to_radians();
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1_r.cos() * lat2_r.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1 for antipodal points
    let a = a.clamp(0.0, 1.0);
    EARTH_RADIUS_KM * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}
