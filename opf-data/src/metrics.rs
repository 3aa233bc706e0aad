//! Error metrics between observed and simulated series.

use crate::error::{DataError, Result};

/// Mean squared error, `(1/n) * Σ (obs[i] - sim[i])^2`.
///
/// Positions where either side is missing are skipped and do not count
/// towards `n`.
pub fn mse(observed: &[Option<f64>], simulated: &[Option<f64>]) -> Result<f64> {
    if observed.len() != simulated.len() {
        return Err(DataError::LengthMismatch {
            observed: observed.len(),
            simulated: simulated.len(),
        });
    }

    let (sum, n) = observed
        .iter()
        .zip(simulated)
        .filter_map(|pair| match pair {
            (Some(o), Some(s)) => Some((o - s).powi(2)),
            _ => None,
        })
        .fold((0.0, 0usize), |(sum, n), sq| (sum + sq, n + 1));

    if n == 0 {
        return Err(DataError::EmptySeries);
    }
    Ok(sum / n as f64)
}
