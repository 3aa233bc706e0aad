//! Core types for oil/water/BSW production series.
//!
//! This crate provides:
//! - `model`: historical dataset, future forecast and validation payloads
//! - `time_point`: opaque time-axis labels with optional ISO date view
//! - `response`: wire format of the `/procesar` endpoint and its validation
//! - `client`: the upload backend seam and, with the `api` feature, a reqwest client

pub mod client;
pub mod error;
pub mod model;
pub mod response;
pub mod time_point;

pub use error::{Result, SeriesError};
pub use model::{FutureForecast, HistoricalDataset, Series, Snapshot, ValidationSimulation};
pub use time_point::TimePoint;
