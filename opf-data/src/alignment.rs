//! Alignment of historical and forecast series on one shared label axis.
//!
//! `labels = historical ++ forecast`. The historical series is padded with
//! nulls over the forecast window and every forecast series is padded with
//! nulls over the historical window, so each output has `labels.len()`
//! values and the historical line stops where the bands begin.
//!
//! When the last historical label and the leading forecast labels are ISO
//! dates, forecast points dated on or before the last historical date are
//! dropped before concatenation. Other labels are concatenated unchanged.

use crate::error::{DataError, Result};
use log::warn;
use opf_series::{FutureForecast, Series, TimePoint};

/// Series ready to bind to a single chart, all of length `labels.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedForecast {
    pub labels: Vec<TimePoint>,
    pub historical: Series,
    pub p10: Series,
    pub p50: Series,
    pub p90: Series,
    pub ensemble: Vec<Series>,
    /// Leading forecast points dropped because they overlapped the history.
    pub trimmed: usize,
}

/// `values ++ [null; pad]`
pub fn pad_right(values: &[Option<f64>], pad: usize) -> Series {
    values.iter().copied().chain(std::iter::repeat(None).take(pad)).collect()
}

/// `[null; pad] ++ values`
pub fn pad_left(pad: usize, values: &[Option<f64>]) -> Series {
    std::iter::repeat(None).take(pad).chain(values.iter().copied()).collect()
}

/// Number of leading forecast labels dated on or before the last historical one.
pub fn overlapping_prefix(historical: &[TimePoint], forecast: &[TimePoint]) -> usize {
    let Some(last) = historical.last().and_then(TimePoint::as_date) else {
        return 0;
    };
    forecast
        .iter()
        .take_while(|tp| tp.as_date().is_some_and(|d| d <= last))
        .count()
}

/// Build the padded historical, percentile and ensemble series.
///
/// At most `ensemble_traces` members of `forecast.simulations` are included.
pub fn align_forecast(
    historical_dates: &[TimePoint],
    historical_values: &[Option<f64>],
    forecast: &FutureForecast,
    ensemble_traces: usize,
) -> Result<AlignedForecast> {
    let trimmed = overlapping_prefix(historical_dates, &forecast.dates);
    if trimmed > 0 {
        if trimmed == forecast.dates.len() {
            return Err(DataError::ForecastOverlap {
                last_historical: historical_dates
                    .last()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
            });
        }
        warn!(
            "Dropping {} forecast points that overlap the historical range",
            trimmed
        );
    }

    let future_dates = &forecast.dates[trimmed..];
    let hist_len = historical_dates.len();
    let tail = |series: &Series| pad_left(hist_len, series.get(trimmed..).unwrap_or_default());

    let labels = historical_dates
        .iter()
        .chain(future_dates)
        .cloned()
        .collect();

    Ok(AlignedForecast {
        labels,
        historical: pad_right(historical_values, future_dates.len()),
        p10: tail(&forecast.p10),
        p50: tail(&forecast.p50),
        p90: tail(&forecast.p90),
        ensemble: forecast
            .simulations
            .iter()
            .take(ensemble_traces)
            .map(tail)
            .collect(),
        trimmed,
    })
}
