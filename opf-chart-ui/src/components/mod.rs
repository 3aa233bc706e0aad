//! Reusable Dioxus RSX components for the production dashboard.

mod action_bar;
mod chart_container;
mod chart_header;
mod error_summary;
mod status_banner;

pub use action_bar::{ActionBar, CSV_INPUT_ID};
pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use error_summary::ErrorSummary;
pub use status_banner::StatusBanner;
