//! Drive the dashboard headlessly and report what each chart would show.

use crate::write_output;
use log::{info, warn};
use opf_dashboard::chart::{ChartState, PanelId, RecordingRenderer};
use opf_dashboard::decline::RecordingSurface;
use opf_dashboard::{
    handle_upload, Dashboard, FitReport, ForecastOptions, ForecastSummary, UploadOutcome,
};
use opf_data::simulation::RandomNoise;
use opf_series::client::{HttpBackend, UploadBackend, UploadConfig, UploadFile};
use opf_series::response::ProcessResponse;
use serde::Serialize;
use std::cell::RefCell;
use std::path::Path;

type HeadlessDashboard = Dashboard<RecordingRenderer, RecordingSurface>;

/// Where the response comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// A response body saved earlier with `opf-cli upload`.
    Replay(String),
    /// A live upload to `{endpoint}/procesar`.
    Upload { endpoint: String, file: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChartOptions {
    pub fit: bool,
    pub forecast: bool,
    pub seed: Option<u64>,
    pub ensemble: usize,
}

/// Serves a saved response body instead of contacting a backend.
pub struct ReplayBackend {
    body: String,
}

impl ReplayBackend {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

impl UploadBackend for ReplayBackend {
    async fn submit(&self, _file: UploadFile) -> opf_series::Result<ProcessResponse> {
        ProcessResponse::from_json(&self.body)
    }
}

#[derive(Debug, Serialize)]
pub struct PanelReport {
    pub id: PanelId,
    pub canvas: &'static str,
    pub state: ChartState,
}

/// Everything the page would display after the requested actions.
#[derive(Debug, Serialize)]
pub struct ChartReport {
    pub rows: usize,
    pub panels: Vec<PanelReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decline: Option<ChartState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit: Option<FitReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<ForecastSummary>,
}

/// Load the response into a fresh dashboard, then fit and forecast on request.
pub async fn build_report<B: UploadBackend>(
    backend: &B,
    file: UploadFile,
    options: ChartOptions,
) -> anyhow::Result<ChartReport> {
    let dashboard = RefCell::new(
        HeadlessDashboard::new(|_| RecordingRenderer::default(), RecordingSurface::default())
            .with_forecast_options(ForecastOptions {
                ensemble_traces: options.ensemble,
            }),
    );

    let rows = match handle_upload(&dashboard, backend, Some(file)).await? {
        UploadOutcome::Applied { rows, .. } => rows,
        UploadOutcome::Superseded => anyhow::bail!("upload was superseded"),
    };

    let mut dashboard = dashboard.into_inner();

    let fit = if options.fit {
        let report = match options.seed {
            Some(seed) => dashboard.run_fit(&mut RandomNoise::seeded(seed))?,
            None => dashboard.run_fit(&mut RandomNoise::from_entropy())?,
        };
        info!("{}", report);
        Some(report)
    } else {
        None
    };

    let forecast = if options.forecast {
        let summary = dashboard.run_forecast()?;
        if summary.trimmed > 0 {
            warn!(
                "Dropped {} forecast points overlapping the history",
                summary.trimmed
            );
        }
        Some(summary)
    } else {
        None
    };

    let panels = PanelId::ALL
        .iter()
        .map(|&id| PanelReport {
            id,
            canvas: id.canvas_id(),
            state: dashboard.panel(id).state().clone(),
        })
        .collect();

    Ok(ChartReport {
        rows,
        panels,
        decline: dashboard.decline().state().cloned(),
        fit,
        forecast,
    })
}

pub async fn run_chart(
    source: Source,
    options: ChartOptions,
    out: Option<&str>,
) -> anyhow::Result<()> {
    let report = match source {
        Source::Replay(path) => {
            info!("Replaying response from {}", path);
            let body = std::fs::read_to_string(&path)?;
            let file = UploadFile::new(path.as_str(), Vec::new());
            build_report(&ReplayBackend::new(body), file, options).await?
        }
        Source::Upload { endpoint, file } => {
            info!("Uploading {} to {}", file, endpoint);
            let backend = HttpBackend::new(UploadConfig::for_origin(&endpoint))?;
            let upload = UploadFile::from_path(Path::new(&file))?;
            build_report(&backend, upload, options).await?
        }
    };

    write_output(out, &serde_json::to_string_pretty(&report)?)
}
