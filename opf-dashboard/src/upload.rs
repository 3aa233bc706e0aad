//! Upload: post the CSV, load the response, show the historical series.

use crate::chart::{ChartRenderer, BSW_ACCUMULATED, WATER_ACCUMULATED};
use crate::decline::ChartSurface;
use crate::error::{DashboardError, Result};
use crate::store::UploadTicket;
use crate::Dashboard;
use log::info;
use opf_series::client::{UploadBackend, UploadFile};
use opf_series::Snapshot;
use std::cell::RefCell;

/// What happened to a completed upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The response was loaded and the panels redrawn.
    Applied { rows: usize, forecast_points: usize },
    /// A newer upload started meanwhile; the response was dropped.
    Superseded,
}

impl<R: ChartRenderer, S: ChartSurface> Dashboard<R, S> {
    /// Start an upload attempt; pass the ticket to [`Dashboard::apply_upload`].
    pub fn begin_upload(&mut self) -> UploadTicket {
        self.store.issue_ticket()
    }

    /// Load a snapshot and push the historical series to all panels.
    ///
    /// Oil gets `[observed, []]`, Water `[rate, accumulated]`, BSW
    /// `[bsw, accumulated]` and AccumulatedOil `[accumulated oil, observed]`,
    /// one redraw each. A misaligned snapshot is rejected before the store
    /// or any panel changes.
    pub fn apply_upload(
        &mut self,
        ticket: UploadTicket,
        snapshot: Snapshot,
    ) -> Result<UploadOutcome> {
        snapshot.validate()?;
        if !self.store.load_if_latest(ticket, snapshot) {
            return Ok(UploadOutcome::Superseded);
        }
        self.last_fit = None;

        let snapshot = self.store.snapshot();
        let h = &snapshot.historical;

        self.oil.reset_layout();
        self.oil.set_series(h.dates.clone(), vec![h.oil_rate.clone(), Vec::new()])?;

        self.accumulated_oil.set_series(
            h.dates.clone(),
            vec![h.accumulated_oil.clone(), h.oil_rate.clone()],
        )?;

        self.water.rename_dataset(1, WATER_ACCUMULATED);
        self.water.set_series(
            h.dates.clone(),
            vec![h.water_rate.clone(), h.accumulated_water.clone()],
        )?;

        self.bsw.rename_dataset(1, BSW_ACCUMULATED);
        self.bsw.set_series(
            h.dates.clone(),
            vec![h.bsw.clone(), h.accumulated_bsw.clone()],
        )?;

        info!(
            "Loaded {} historical rows and {} forecast points",
            h.len(),
            snapshot.forecast.len()
        );
        Ok(UploadOutcome::Applied {
            rows: h.len(),
            forecast_points: snapshot.forecast.len(),
        })
    }
}

/// Full upload action: one request, then load on success.
///
/// On any failure the previously loaded state stays as it was. The
/// dashboard is not borrowed while the request is in flight, so other
/// actions keep working and a newer upload supersedes this one.
pub async fn handle_upload<R, S, B>(
    dashboard: &RefCell<Dashboard<R, S>>,
    backend: &B,
    file: Option<UploadFile>,
) -> Result<UploadOutcome>
where
    R: ChartRenderer,
    S: ChartSurface,
    B: UploadBackend,
{
    let file = file.ok_or(DashboardError::NoFileSelected)?;
    let ticket = dashboard.borrow_mut().begin_upload();
    let snapshot = backend.submit(file).await?.into_snapshot()?;
    dashboard.borrow_mut().apply_upload(ticket, snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::PanelId;
    use crate::testing::{dashboard, snapshot};
    use opf_series::response::{check_status, ProcessResponse};
    use opf_series::SeriesError;

    /// Replays a canned body, or fails with the given status.
    struct CannedBackend {
        status: u16,
        body: String,
    }

    impl CannedBackend {
        fn ok(body: &str) -> Self {
            Self {
                status: 200,
                body: body.to_string(),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                status,
                body: r#"{"error": "boom"}"#.to_string(),
            }
        }
    }

    impl UploadBackend for CannedBackend {
        async fn submit(&self, _file: UploadFile) -> opf_series::Result<ProcessResponse> {
            check_status(self.status, &self.body)
        }
    }

    const BODY: &str = r#"{
        "historico": {
            "fechas": ["2021-01-01", "2021-02-01"],
            "valores": [50.0, 45.0],
            "accumulatedOil": [50.0, 95.0],
            "accumulatedWater": [5.0, 11.0],
            "rateWater": [5.0, 6.0],
            "bsw": [9.0, 11.7],
            "accumulatedBSW": [9.0, 10.4]
        },
        "validacion": {},
        "futuro": {"fechas": ["2021-03-01"], "p10": [40.0], "p50": [43.0], "p90": [47.0]}
    }"#;

    fn csv() -> Option<UploadFile> {
        Some(UploadFile::new("well.csv", b"Tiempo;RateOil\n".to_vec()))
    }

    #[test]
    fn apply_pushes_historical_series_to_every_panel() {
        let mut dash = dashboard();
        let ticket = dash.begin_upload();
        let outcome = dash.apply_upload(ticket, snapshot()).unwrap();
        assert_eq!(
            outcome,
            UploadOutcome::Applied {
                rows: 3,
                forecast_points: 2
            }
        );

        for id in PanelId::ALL {
            assert_eq!(dash.panel(id).renderer().redraws, 1, "{id:?} redraws once");
            assert_eq!(dash.panel(id).state().labels.len(), 3);
        }

        let oil = dash.panel(PanelId::Oil).state();
        assert_eq!(oil.datasets[0].values, snapshot().historical.oil_rate);
        assert!(oil.datasets[1].values.is_empty());

        let acc = dash.panel(PanelId::AccumulatedOil).state();
        assert_eq!(acc.datasets[0].values, snapshot().historical.accumulated_oil);
        assert_eq!(acc.datasets[1].values, snapshot().historical.oil_rate);
        assert_eq!(acc.datasets[0].values.len(), acc.labels.len());
        assert_eq!(acc.datasets[1].values.len(), acc.labels.len());

        let water = dash.panel(PanelId::Water).state();
        assert_eq!(water.datasets[1].values, snapshot().historical.accumulated_water);
        let bsw = dash.panel(PanelId::Bsw).state();
        assert_eq!(bsw.datasets[0].values, snapshot().historical.bsw);
    }

    #[test]
    fn upload_after_forecast_restores_oil_layout() {
        let mut dash = dashboard();
        let t = dash.begin_upload();
        dash.apply_upload(t, snapshot()).unwrap();
        dash.run_forecast().unwrap();
        assert_eq!(dash.panel(PanelId::Oil).state().datasets.len(), 4);

        let t = dash.begin_upload();
        dash.apply_upload(t, snapshot()).unwrap();
        assert_eq!(dash.panel(PanelId::Oil).state().datasets, {
            let mut template = PanelId::Oil.template();
            template[0].values = snapshot().historical.oil_rate;
            template
        });
    }

    #[tokio::test]
    async fn handle_upload_loads_response() {
        let dash = RefCell::new(dashboard());
        let outcome = handle_upload(&dash, &CannedBackend::ok(BODY), csv()).await.unwrap();

        assert_eq!(
            outcome,
            UploadOutcome::Applied {
                rows: 2,
                forecast_points: 1
            }
        );
        let dash = dash.borrow();
        assert_eq!(dash.store().current().historical.oil_rate, vec![Some(50.0), Some(45.0)]);
    }

    #[tokio::test]
    async fn failed_upload_keeps_previous_state() {
        let dash = RefCell::new(dashboard());
        handle_upload(&dash, &CannedBackend::ok(BODY), csv()).await.unwrap();
        let before = dash.borrow().store().current().clone();

        let err = handle_upload(&dash, &CannedBackend::failing(500), csv())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DashboardError::Upload(SeriesError::Rejected { status: 500, .. })
        ));
        assert!(err.to_string().starts_with("Error processing the file"));
        let dash = dash.borrow();
        assert_eq!(dash.store().current(), &before);
        assert_eq!(dash.panel(PanelId::Oil).renderer().redraws, 1);
    }

    #[tokio::test]
    async fn malformed_response_fails_loudly() {
        let dash = RefCell::new(dashboard());
        let body = BODY.replace("\"valores\": [50.0, 45.0]", "\"valores\": [50.0]");
        let err = handle_upload(&dash, &CannedBackend::ok(&body), csv())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DashboardError::Upload(SeriesError::LengthMismatch { .. })
        ));
        assert!(!dash.borrow().store().is_loaded());
    }

    #[test]
    fn misaligned_snapshot_changes_nothing() {
        let mut dash = dashboard();
        let t = dash.begin_upload();
        dash.apply_upload(t, snapshot()).unwrap();
        let before = dash.store().current().clone();

        let mut bad = snapshot();
        bad.historical.oil_rate = vec![Some(1.0), Some(2.0), Some(3.0)];
        bad.historical.accumulated_water.pop();
        let t = dash.begin_upload();
        let err = dash.apply_upload(t, bad).unwrap_err();

        assert!(matches!(
            err,
            DashboardError::Upload(SeriesError::LengthMismatch { ref field, .. })
                if field == "historical.accumulated_water"
        ));
        assert_eq!(dash.store().current(), &before);
        for id in PanelId::ALL {
            assert_eq!(dash.panel(id).renderer().redraws, 1, "{id:?} not redrawn");
        }
        assert_eq!(
            dash.panel(PanelId::Oil).state().datasets[0].values,
            snapshot().historical.oil_rate
        );
    }

    #[tokio::test]
    async fn missing_file_is_rejected_without_request() {
        let dash = RefCell::new(dashboard());
        let err = handle_upload(&dash, &CannedBackend::failing(500), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DashboardError::NoFileSelected));
    }

    #[test]
    fn stale_response_is_superseded() {
        let mut dash = dashboard();
        let slow = dash.begin_upload();
        let fast = dash.begin_upload();

        let mut fresh = snapshot();
        fresh.historical.oil_rate = vec![Some(1.0), Some(2.0), Some(3.0)];
        dash.apply_upload(fast, fresh.clone()).unwrap();

        assert_eq!(
            dash.apply_upload(slow, snapshot()).unwrap(),
            UploadOutcome::Superseded
        );
        assert_eq!(dash.store().current(), &fresh);
        assert_eq!(dash.panel(PanelId::Oil).renderer().redraws, 1);
    }
}
