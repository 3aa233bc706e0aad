use thiserror::Error;

/// Errors from series arithmetic and alignment.
#[derive(Error, Debug, PartialEq)]
pub enum DataError {
    /// Observed and simulated series differ in length
    #[error("series lengths differ (observed: {observed}, simulated: {simulated})")]
    LengthMismatch { observed: usize, simulated: usize },

    /// No position has both an observed and a simulated value
    #[error("no comparable values in series")]
    EmptySeries,

    /// Every forecast point falls inside the historical range
    #[error("forecast starts on or before the last historical date {last_historical}")]
    ForecastOverlap { last_historical: String },
}

pub type Result<T> = std::result::Result<T, DataError>;
