//! Oil, water and BSW production dashboard.
//!
//! Thin event adapter over `opf-dashboard`:
//! 1. Picking a CSV posts it to `/procesar` on the page's origin; the
//!    response is validated, loaded into the series store and the four
//!    panels show the historical series.
//! 2. "Run fit" draws observed vs placeholder-simulated series, shows the
//!    MSE summary and rebuilds the decline curve chart.
//! 3. "Run forecast" replaces the oil panel with the historical line and the
//!    P10/P50/P90 bands.
//!
//! Charts are drawn by Chart.js through the bridge in `opf-chart-ui`.

use dioxus::prelude::*;
use opf_chart_ui::components::{
    ActionBar, ChartContainer, ChartHeader, ErrorSummary, StatusBanner, CSV_INPUT_ID,
};
use opf_chart_ui::js_bridge;
use opf_chart_ui::renderer::{ChartJsRenderer, ChartJsSurface};
use opf_chart_ui::state::AppState;
use opf_dashboard::chart::PanelId;
use opf_dashboard::decline::DECLINE_CANVAS_ID;
use opf_dashboard::{handle_upload, Dashboard, DashboardError, UploadOutcome};
use opf_data::simulation::RandomNoise;
use opf_series::client::{HttpBackend, UploadConfig, UploadFile};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

type PageDashboard = Dashboard<ChartJsRenderer, ChartJsSurface>;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::launch(App);
}

/// Read the file currently selected in the CSV input, if any.
async fn selected_file() -> Result<Option<UploadFile>, String> {
    let input = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CSV_INPUT_ID))
        .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok());
    let Some(file) = input.and_then(|i| i.files()).and_then(|files| files.get(0)) else {
        return Ok(None);
    };

    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("could not read {}: {:?}", file.name(), e))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(Some(UploadFile::new(file.name(), bytes)))
}

fn page_origin() -> Result<String, String> {
    web_sys::window()
        .ok_or_else(|| "no window".to_string())?
        .location()
        .origin()
        .map_err(|e| format!("{:?}", e))
}

/// Upload the selected file and load the response into `dashboard`.
async fn upload(
    dashboard: &RefCell<PageDashboard>,
) -> Result<Option<(String, UploadOutcome)>, String> {
    let file = selected_file().await?;
    let name = file.as_ref().map(|f| f.name.clone()).unwrap_or_default();
    let backend = HttpBackend::new(UploadConfig::for_origin(&page_origin()?))
        .map_err(|e| e.to_string())?;

    match handle_upload(dashboard, &backend, file).await {
        Ok(outcome) => Ok(Some((name, outcome))),
        Err(DashboardError::NoFileSelected) => Ok(None),
        Err(e) => Err(e.to_string()),
    }
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);
    let dashboard: Rc<RefCell<PageDashboard>> = use_hook(|| {
        Rc::new(RefCell::new(Dashboard::new(
            ChartJsRenderer::new,
            ChartJsSurface::new(DECLINE_CANVAS_ID),
        )))
    });

    // Load the Chart.js glue once
    use_hook(js_bridge::init_charts);

    let on_file = {
        let dashboard = Rc::clone(&dashboard);
        move |_evt: FormEvent| {
            let dashboard = Rc::clone(&dashboard);
            spawn(async move {
                let started = (state.uploads)().start();
                state.uploads.set(started);
                state.notice.set(None);
                let result = upload(&dashboard).await;
                let finished = (state.uploads)().finish();
                state.uploads.set(finished);
                match result {
                    Ok(Some((name, UploadOutcome::Applied { rows, .. }))) => {
                        log::info!("Loaded {} ({} rows)", name, rows);
                        state.file_name.set(Some(name));
                        state.fit_report.set(None);
                    }
                    Ok(Some((name, UploadOutcome::Superseded))) => {
                        log::warn!("Upload of {} superseded by a newer one", name);
                    }
                    Ok(None) => {}
                    Err(e) => {
                        log::error!("Upload failed: {}", e);
                        state.notice.set(Some(e));
                    }
                }
            });
        }
    };

    let on_fit = {
        let dashboard = Rc::clone(&dashboard);
        move |_evt: MouseEvent| {
            let result = dashboard
                .borrow_mut()
                .run_fit(&mut RandomNoise::from_entropy());
            match result {
                Ok(report) => {
                    state.notice.set(None);
                    state.fit_report.set(Some(report));
                }
                Err(e) => state.notice.set(Some(e.to_string())),
            }
        }
    };

    let on_forecast = {
        let dashboard = Rc::clone(&dashboard);
        move |_evt: MouseEvent| match dashboard.borrow_mut().run_forecast() {
            Ok(summary) => {
                log::info!("Forecast drawn over {} labels", summary.labels);
                state.notice.set(None);
            }
            Err(e) => state.notice.set(Some(e.to_string())),
        }
    };

    let canvas_ids = PanelId::ALL.map(PanelId::canvas_id);
    let subtitle = (state.file_name)()
        .map(|name| format!("Loaded: {}", name))
        .unwrap_or_default();

    rsx! {
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            ChartHeader {
                title: "Production Dashboard".to_string(),
                subtitle: subtitle,
            }

            ActionBar {
                on_file: on_file,
                on_fit: on_fit,
                on_forecast: on_forecast,
                busy: (state.uploads)().is_busy(),
            }

            StatusBanner {
                loading: (state.uploads)().is_busy(),
                notice: (state.notice)(),
                on_dismiss: move |_| state.notice.set(None),
            }
            if let Some(report) = (state.fit_report)() {
                ErrorSummary { report: report }
            }

            div {
                style: "display: grid; grid-template-columns: repeat(2, 1fr); gap: 16px;",
                for canvas_id in canvas_ids {
                    ChartContainer { key: "{canvas_id}", id: canvas_id.to_string() }
                }
            }
            ChartContainer { id: DECLINE_CANVAS_ID.to_string(), min_height: 400 }
        }
    }
}
