//! Physics engine: wavelength → frequency.

use crate::error::{ensure_finite, Result};
use crate::result::{guarded, DomainErrorKind, MetricResult};

/// Speed of light in vacuum, m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Frequency in Hz of light with the given wavelength in millimeters.
///
/// `f = c / λ` with λ converted to meters. Only `wavelength_mm > 0` is
/// accepted; there is no upper bound.
pub fn frequency(wavelength_mm: f64) -> MetricResult<f64> {
    guarded("frequency", || compute_frequency(wavelength_mm))
}

fn compute_frequency(wavelength_mm: f64) -> Result<f64> {
    // NaN fails this comparison too
    if !(wavelength_mm > 0.0) {
        return Err(DomainErrorKind::NonPositiveInput.into());
    }
    let wavelength_m = wavelength_mm / 1000.0;
    ensure_finite(SPEED_OF_LIGHT / wavelength_m, "frequency")
}
