//! Chart.js-backed implementations of the dashboard's chart seams.

use crate::js_bridge;
use opf_dashboard::chart::{ChartRenderer, ChartState, PanelId};
use opf_dashboard::decline::{ChartInstance, ChartSurface};

fn state_json(state: &ChartState) -> Option<String> {
    match serde_json::to_string(state) {
        Ok(json) => Some(json),
        Err(e) => {
            log::error!("Failed to serialize chart state '{}': {}", state.title, e);
            None
        }
    }
}

/// Redraws one long-lived panel chart in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartJsRenderer {
    canvas_id: &'static str,
}

impl ChartJsRenderer {
    pub fn new(panel: PanelId) -> Self {
        Self {
            canvas_id: panel.canvas_id(),
        }
    }
}

impl ChartRenderer for ChartJsRenderer {
    fn redraw(&mut self, state: &ChartState) {
        if let Some(json) = state_json(state) {
            js_bridge::render_chart(self.canvas_id, &json);
        }
    }
}

/// Canvas on which a fresh chart is created per bind.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartJsSurface {
    canvas_id: &'static str,
}

impl ChartJsSurface {
    pub fn new(canvas_id: &'static str) -> Self {
        Self { canvas_id }
    }
}

/// A chart created on a [`ChartJsSurface`].
#[derive(Debug)]
pub struct ChartJsInstance {
    canvas_id: &'static str,
}

impl ChartInstance for ChartJsInstance {
    fn dispose(self) {
        js_bridge::destroy_chart(self.canvas_id);
    }
}

impl ChartSurface for ChartJsSurface {
    type Instance = ChartJsInstance;

    fn bind(&mut self, state: &ChartState) -> ChartJsInstance {
        if let Some(json) = state_json(state) {
            js_bridge::create_chart(self.canvas_id, &json);
        }
        ChartJsInstance {
            canvas_id: self.canvas_id,
        }
    }
}
