//! Chebyshev series evaluation on a normalized coordinate.
//!
//! Calibration segments map their `[z_lower, z_upper]` window onto `[-1, 1]`:
//!
//! ```text
//! k = ((z - z_lower) - (z_upper - z)) / (z_upper - z_lower)
//! T(k) = Σ c_i cos(i · arccos(k))
//! ```
//!
//! The trigonometric form is only defined for `|k| <= 1`, so `k` is clamped
//! before `arccos`. Readings that sit on a window edge can land a few ulps
//! outside after the affine map.

/// Map `z` from `[z_lower, z_upper]` onto `[-1, 1]`.
pub fn normalized_coordinate(z: f64, z_lower: f64, z_upper: f64) -> f64 {
    ((z - z_lower) - (z_upper - z)) / (z_upper - z_lower)
}

/// Evaluate `Σ c_i T_i(k)` with `k` clamped into `[-1, 1]`.
///
/// NaN `k` propagates to a NaN result.
pub fn chebyshev_series(coefficients: &[f64], k: f64) -> f64 {
    let theta = k.clamp(-1.0, 1.0).acos();
    coefficients
        .iter()
        .enumerate()
        .map(|(i, c)| c * (i as f64 * theta).cos())
        .sum()
}
