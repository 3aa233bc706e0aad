//! Errors surfaced to the user as notices.

use opf_data::DataError;
use opf_series::SeriesError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    /// Fit or forecast requested before any successful upload
    #[error("Load a valid CSV file first")]
    NoData,

    /// Upload triggered with an empty file picker
    #[error("Select a CSV file first")]
    NoFileSelected,

    /// The loaded response carries no forecast dates
    #[error("The loaded file has no forecast to display")]
    EmptyForecast,

    /// Upload round trip or response validation failed
    #[error("Error processing the file: {0}")]
    Upload(#[from] SeriesError),

    /// Series arithmetic or alignment failed
    #[error(transparent)]
    Data(#[from] DataError),

    /// A dataset does not line up with the panel's labels
    #[error("dataset `{dataset}` on {panel} has {found} values for {expected} labels")]
    Misaligned {
        panel: &'static str,
        dataset: String,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, DashboardError>;
