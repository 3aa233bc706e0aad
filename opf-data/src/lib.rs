//! Data processing for production series.
//!
//! This crate turns loaded series into what the charts display: error
//! metrics, the placeholder simulated series, the illustrative decline
//! curve, and the padded historical/forecast alignment.

pub mod alignment;
pub mod decline;
pub mod error;
pub mod metrics;
pub mod simulation;

pub use error::{DataError, Result};

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::round_to;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_to(495.024_875, 2), 495.02);
        assert_eq!(round_to(0.666_666, 4), 0.6667);
        assert_eq!(round_to(-1.005, 1), -1.0);
    }
}
