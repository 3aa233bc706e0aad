//! Forecast: overlay P10/P50/P90 bands after the historical oil rate.

use crate::chart::{ChartRenderer, Dataset, LineStyle};
use crate::decline::ChartSurface;
use crate::error::{DashboardError, Result};
use crate::Dashboard;
use log::info;
use opf_data::alignment::{align_forecast, AlignedForecast};
use opf_series::TimePoint;
use serde::Serialize;

/// Extra forecast layers beyond the percentile bands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForecastOptions {
    /// How many ensemble members to draw as faint traces; 0 draws none.
    pub ensemble_traces: usize,
}

/// Result of a forecast overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ForecastSummary {
    pub labels: usize,
    pub forecast_points: usize,
    /// Forecast points dropped for overlapping the history.
    pub trimmed: usize,
}

/// Historical, P10 (dashed), P50, P90 (dashed), then any ensemble traces.
pub fn forecast_datasets(aligned: AlignedForecast) -> (Vec<TimePoint>, Vec<Dataset>) {
    let mut datasets = vec![
        Dataset::line("Historical", "#FF6384")
            .with_order(5)
            .with_values(aligned.historical),
        Dataset::line("P10", "#0077B6")
            .with_style(LineStyle::Dashed)
            .with_order(10)
            .with_values(aligned.p10),
        Dataset::line("P50", "#2A9D8F")
            .with_order(11)
            .with_values(aligned.p50),
        Dataset::line("P90", "#8338EC")
            .with_style(LineStyle::Dashed)
            .with_order(12)
            .with_values(aligned.p90),
    ];
    datasets.extend(aligned.ensemble.into_iter().map(|values| {
        Dataset::line("Simulation", "rgba(147, 136, 136, 0.3)")
            .with_style(LineStyle::Faint)
            .with_order(1)
            .with_values(values)
    }));
    (aligned.labels, datasets)
}

impl<R: ChartRenderer, S: ChartSurface> Dashboard<R, S> {
    /// Replace the Oil panel's datasets with the historical line and the
    /// percentile bands on `historical ++ forecast` labels.
    pub fn run_forecast(&mut self) -> Result<ForecastSummary> {
        let snapshot = self.store.snapshot();
        if snapshot.forecast.is_empty() {
            return Err(if snapshot.is_empty() {
                DashboardError::NoData
            } else {
                DashboardError::EmptyForecast
            });
        }
        let h = &snapshot.historical;

        let aligned = align_forecast(
            &h.dates,
            &h.oil_rate,
            &snapshot.forecast,
            self.forecast_options.ensemble_traces,
        )?;
        let summary = ForecastSummary {
            labels: aligned.labels.len(),
            forecast_points: aligned.labels.len() - h.len(),
            trimmed: aligned.trimmed,
        };

        let (labels, datasets) = forecast_datasets(aligned);
        self.oil.replace_datasets(labels, datasets)?;

        info!(
            "Forecast overlay: {} labels, {} forecast points",
            summary.labels, summary.forecast_points
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::PanelId;
    use crate::testing::{dashboard, labels, snapshot, some};
    use opf_data::DataError;
    use opf_series::FutureForecast;

    #[test]
    fn forecast_before_upload_is_no_data() {
        let mut dash = dashboard();
        assert!(matches!(dash.run_forecast(), Err(DashboardError::NoData)));
        assert_eq!(dash.panel(PanelId::Oil).renderer().redraws, 0);
    }

    #[test]
    fn empty_forecast_is_reported() {
        let mut dash = dashboard();
        let mut snap = snapshot();
        snap.forecast = FutureForecast::default();
        let t = dash.begin_upload();
        dash.apply_upload(t, snap).unwrap();

        assert!(matches!(dash.run_forecast(), Err(DashboardError::EmptyForecast)));
        assert_eq!(dash.panel(PanelId::Oil).renderer().redraws, 1);
    }

    #[test]
    fn overlays_padded_percentiles_on_oil_panel() {
        let mut dash = dashboard();
        let t = dash.begin_upload();
        dash.apply_upload(t, snapshot()).unwrap();

        let summary = dash.run_forecast().unwrap();
        assert_eq!(
            summary,
            ForecastSummary {
                labels: 5,
                forecast_points: 2,
                trimmed: 0
            }
        );

        let oil = dash.panel(PanelId::Oil).state();
        let names: Vec<&str> = oil.datasets.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(names, ["Historical", "P10", "P50", "P90"]);
        assert!(oil.datasets.iter().all(|d| d.values.len() == oil.labels.len()));

        assert_eq!(
            oil.datasets[0].values,
            vec![Some(120.0), Some(110.0), Some(100.0), None, None]
        );
        assert_eq!(
            oil.datasets[2].values,
            vec![None, None, None, Some(95.0), Some(90.0)]
        );
        assert_eq!(oil.datasets[1].style, LineStyle::Dashed);
        assert_eq!(oil.datasets[2].style, LineStyle::Solid);
        assert_eq!(oil.datasets[3].style, LineStyle::Dashed);
        assert_eq!(dash.panel(PanelId::Oil).renderer().redraws, 2);
    }

    #[test]
    fn pads_short_history_and_forecast() {
        let mut dash = dashboard();
        let mut snap = snapshot();
        snap.historical.dates = labels(&["d1", "d2"]);
        snap.historical.oil_rate = some(&[10.0, 20.0]);
        snap.forecast = FutureForecast {
            dates: labels(&["d3", "d4"]),
            p10: some(&[25.0, 35.0]),
            p50: some(&[30.0, 40.0]),
            p90: some(&[35.0, 45.0]),
            simulations: Vec::new(),
        };
        // Only the oil series matter for the overlay.
        let t = dash.begin_upload();
        dash.store.load_if_latest(t, snap);

        dash.run_forecast().unwrap();
        let oil = dash.panel(PanelId::Oil).state();
        assert_eq!(oil.labels, labels(&["d1", "d2", "d3", "d4"]));
        assert_eq!(oil.datasets[0].values, vec![Some(10.0), Some(20.0), None, None]);
        assert_eq!(oil.datasets[2].values, vec![None, None, Some(30.0), Some(40.0)]);
    }

    #[test]
    fn ensemble_traces_follow_percentiles() {
        let mut dash = dashboard().with_forecast_options(ForecastOptions { ensemble_traces: 5 });
        let t = dash.begin_upload();
        dash.apply_upload(t, snapshot()).unwrap();
        dash.run_forecast().unwrap();

        let oil = dash.panel(PanelId::Oil).state();
        assert_eq!(oil.datasets.len(), 6, "two ensemble members available");
        assert_eq!(oil.datasets[4].style, LineStyle::Faint);
        assert_eq!(oil.datasets[5].values, vec![None, None, None, Some(94.0), Some(88.0)]);
    }

    #[test]
    fn overlapping_forecast_is_rejected() {
        let mut dash = dashboard();
        let mut snap = snapshot();
        snap.forecast.dates = labels(&["2020-02-01", "2020-03-01"]);
        let t = dash.begin_upload();
        dash.apply_upload(t, snap).unwrap();

        let err = dash.run_forecast().unwrap_err();
        assert!(matches!(
            err,
            DashboardError::Data(DataError::ForecastOverlap { .. })
        ));
        assert_eq!(dash.panel(PanelId::Oil).state().datasets.len(), 2);
    }
}
