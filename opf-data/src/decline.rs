//! Illustrative Arps exponential decline curve.
//!
//! Fixed parameters, index-based time: `q(t) = round(qi * e^(-D*t), 2)`
//! for `t = 0..n`. This is a demonstration overlay, not a fit.

use crate::round_to;

/// Decline constant `D` per time step.
pub const DECLINE_RATE: f64 = 0.01;

/// Initial rate used when no observed rate is a finite number.
pub const FALLBACK_INITIAL_RATE: f64 = 1000.0;

/// First finite observed rate, or [`FALLBACK_INITIAL_RATE`].
pub fn initial_rate(observed: &[Option<f64>]) -> f64 {
    observed
        .iter()
        .flatten()
        .copied()
        .find(|v| v.is_finite())
        .unwrap_or(FALLBACK_INITIAL_RATE)
}

/// Exponential decline from `qi` over `len` steps, rounded to two decimals.
pub fn exponential_curve(qi: f64, len: usize) -> Vec<f64> {
    (0..len)
        .map(|t| round_to(qi * (-DECLINE_RATE * t as f64).exp(), 2))
        .collect()
}

/// Decline curve seeded from the first finite observed rate.
pub fn decline_from_observed(observed: &[Option<f64>]) -> Vec<f64> {
    exponential_curve(initial_rate(observed), observed.len())
}
