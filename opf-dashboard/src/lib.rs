//! Application state and controllers for the production dashboard.
//!
//! [`Dashboard`] bundles the [`store::SeriesStore`], the four
//! [`chart::ChartPanel`]s and the [`decline::DeclineCurveChart`]. The
//! upload, fit and forecast operations are plain methods returning a
//! `Result`, so any event adapter (a Dioxus page, the CLI, a test) can drive
//! them without a rendering environment.
//!
//! # Usage
//!
//! ```rust
//! use opf_dashboard::chart::RecordingRenderer;
//! use opf_dashboard::decline::RecordingSurface;
//! use opf_dashboard::{Dashboard, DashboardError};
//!
//! let mut dashboard =
//!     Dashboard::new(|_| RecordingRenderer::default(), RecordingSurface::default());
//! assert!(matches!(dashboard.run_forecast(), Err(DashboardError::NoData)));
//! ```

pub mod chart;
pub mod decline;
pub mod error;
pub mod fit;
pub mod forecast;
pub mod store;
pub mod upload;

pub use error::{DashboardError, Result};
pub use fit::FitReport;
pub use forecast::{ForecastOptions, ForecastSummary};
pub use upload::{handle_upload, UploadOutcome};

use chart::{ChartPanel, ChartRenderer, PanelId};
use decline::{ChartSurface, DeclineCurveChart};
use store::SeriesStore;

/// Everything the page holds between user actions.
pub struct Dashboard<R: ChartRenderer, S: ChartSurface> {
    store: SeriesStore,
    oil: ChartPanel<R>,
    water: ChartPanel<R>,
    bsw: ChartPanel<R>,
    accumulated_oil: ChartPanel<R>,
    decline: DeclineCurveChart<S>,
    forecast_options: ForecastOptions,
    last_fit: Option<FitReport>,
}

impl<R: ChartRenderer, S: ChartSurface> Dashboard<R, S> {
    /// Create the panels with one renderer each and an unbound decline chart.
    pub fn new(mut renderer_for: impl FnMut(PanelId) -> R, decline_surface: S) -> Self {
        Self {
            store: SeriesStore::new(),
            oil: ChartPanel::new(PanelId::Oil, renderer_for(PanelId::Oil)),
            water: ChartPanel::new(PanelId::Water, renderer_for(PanelId::Water)),
            bsw: ChartPanel::new(PanelId::Bsw, renderer_for(PanelId::Bsw)),
            accumulated_oil: ChartPanel::new(
                PanelId::AccumulatedOil,
                renderer_for(PanelId::AccumulatedOil),
            ),
            decline: DeclineCurveChart::new(decline_surface),
            forecast_options: ForecastOptions::default(),
            last_fit: None,
        }
    }

    pub fn with_forecast_options(mut self, options: ForecastOptions) -> Self {
        self.forecast_options = options;
        self
    }

    pub fn store(&self) -> &SeriesStore {
        &self.store
    }

    pub fn panel(&self, id: PanelId) -> &ChartPanel<R> {
        match id {
            PanelId::Oil => &self.oil,
            PanelId::Water => &self.water,
            PanelId::Bsw => &self.bsw,
            PanelId::AccumulatedOil => &self.accumulated_oil,
        }
    }

    pub fn decline(&self) -> &DeclineCurveChart<S> {
        &self.decline
    }

    /// MSE summary of the last fit since the last upload.
    pub fn last_fit(&self) -> Option<&FitReport> {
        self.last_fit.as_ref()
    }
}
