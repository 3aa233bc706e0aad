//! Per-panel chart state and the seam to the charting library.
//!
//! A [`ChartPanel`] owns its [`ChartState`] and mutates it in place; the
//! [`ChartRenderer`] it wraps is told to redraw exactly once per update.
//! Nothing in a panel is authoritative: it can always be rebuilt from the
//! series store.

use crate::error::{DashboardError, Result};
use opf_series::{Series, TimePoint};
use serde::Serialize;

/// The four production panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PanelId {
    Oil,
    Water,
    Bsw,
    AccumulatedOil,
}

impl PanelId {
    pub const ALL: [PanelId; 4] = [
        PanelId::Oil,
        PanelId::Water,
        PanelId::Bsw,
        PanelId::AccumulatedOil,
    ];

    /// DOM id of the canvas the panel is mounted on.
    pub fn canvas_id(self) -> &'static str {
        match self {
            PanelId::Oil => "chart-oil",
            PanelId::Water => "chart-water",
            PanelId::Bsw => "chart-bsw",
            PanelId::AccumulatedOil => "chart-accumulated-oil",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PanelId::Oil => "Oil Rate",
            PanelId::Water => "Water Rate",
            PanelId::Bsw => "BSW (%)",
            PanelId::AccumulatedOil => "Accumulated Production",
        }
    }

    /// Datasets a panel starts with and returns to on layout reset.
    pub fn template(self) -> Vec<Dataset> {
        match self {
            PanelId::Oil => vec![
                Dataset::line("Oil rate (observed)", "#FF6384"),
                Dataset::line("Oil rate (simulated)", "#36A2EB"),
            ],
            PanelId::Water => vec![
                Dataset::line("Water rate (observed)", "#4BC0C0"),
                Dataset::line(WATER_ACCUMULATED, "#FFCE56"),
            ],
            PanelId::Bsw => vec![
                Dataset::line("BSW % (observed)", "#9966FF"),
                Dataset::line(BSW_ACCUMULATED, "#4A4A4A"),
            ],
            PanelId::AccumulatedOil => vec![
                Dataset::line("Accumulated production", "#9966FF"),
                Dataset::line("Historical production", "#C65353"),
            ],
        }
    }
}

pub const WATER_ACCUMULATED: &str = "Water (accumulated)";
pub const WATER_SIMULATED: &str = "Water rate (simulated)";
pub const BSW_ACCUMULATED: &str = "BSW % (accumulated)";
pub const BSW_SIMULATED: &str = "BSW % (simulated)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    /// Thin, translucent, no point markers.
    Faint,
}

/// One named line on a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub color: String,
    pub style: LineStyle,
    /// Draw priority; lower values are drawn on top.
    pub order: i32,
    pub values: Series,
}

impl Dataset {
    pub fn line(label: &str, color: &str) -> Self {
        Self {
            label: label.to_string(),
            color: color.to_string(),
            style: LineStyle::Solid,
            order: 0,
            values: Vec::new(),
        }
    }

    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    pub fn with_values(mut self, values: Series) -> Self {
        self.values = values;
        self
    }
}

/// What a chart widget displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartState {
    pub title: String,
    pub labels: Vec<TimePoint>,
    pub datasets: Vec<Dataset>,
}

impl ChartState {
    pub fn empty(title: &str, datasets: Vec<Dataset>) -> Self {
        Self {
            title: title.to_string(),
            labels: Vec::new(),
            datasets,
        }
    }
}

/// Redraws a chart widget from its state.
pub trait ChartRenderer {
    fn redraw(&mut self, state: &ChartState);
}

/// Keeps the last drawn state; used by the CLI and by tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingRenderer {
    pub redraws: usize,
    pub last: Option<ChartState>,
}

impl ChartRenderer for RecordingRenderer {
    fn redraw(&mut self, state: &ChartState) {
        self.redraws += 1;
        self.last = Some(state.clone());
    }
}

/// One chart widget plus the state bound to it.
#[derive(Debug)]
pub struct ChartPanel<R> {
    id: PanelId,
    state: ChartState,
    renderer: R,
}

impl<R: ChartRenderer> ChartPanel<R> {
    pub fn new(id: PanelId, renderer: R) -> Self {
        Self {
            id,
            state: ChartState::empty(id.title(), id.template()),
            renderer,
        }
    }

    pub fn id(&self) -> PanelId {
        self.id
    }

    pub fn state(&self) -> &ChartState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Restore the template datasets without redrawing.
    pub fn reset_layout(&mut self) {
        if self.state.datasets.len() != self.id.template().len() {
            log::debug!("Restoring default layout on {:?} panel", self.id);
        }
        self.state.datasets = self.id.template();
    }

    /// Retitle one dataset without redrawing.
    pub fn rename_dataset(&mut self, index: usize, label: &str) {
        if let Some(ds) = self.state.datasets.get_mut(index) {
            ds.label = label.to_string();
        }
    }

    /// Set labels and the values of the leading datasets, then redraw once.
    ///
    /// An empty series clears its dataset; any other series must have one
    /// value per label.
    pub fn set_series(&mut self, labels: Vec<TimePoint>, values: Vec<Series>) -> Result<()> {
        for (ds, v) in self.state.datasets.iter().zip(&values) {
            self.check_len(&ds.label, labels.len(), v)?;
        }
        self.state.labels = labels;
        for (ds, v) in self.state.datasets.iter_mut().zip(values) {
            ds.values = v;
        }
        self.renderer.redraw(&self.state);
        Ok(())
    }

    /// Replace labels and the whole dataset list, then redraw once.
    pub fn replace_datasets(
        &mut self,
        labels: Vec<TimePoint>,
        datasets: Vec<Dataset>,
    ) -> Result<()> {
        for ds in &datasets {
            self.check_len(&ds.label, labels.len(), &ds.values)?;
        }
        self.state.labels = labels;
        self.state.datasets = datasets;
        self.renderer.redraw(&self.state);
        Ok(())
    }

    fn check_len(&self, dataset: &str, expected: usize, values: &Series) -> Result<()> {
        if !values.is_empty() && values.len() != expected {
            return Err(DashboardError::Misaligned {
                panel: self.id.title(),
                dataset: dataset.to_string(),
                expected,
                found: values.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: usize) -> Vec<TimePoint> {
        (0..n as i64).map(TimePoint::from).collect()
    }

    #[test]
    fn new_panel_uses_template() {
        let panel = ChartPanel::new(PanelId::Water, RecordingRenderer::default());
        assert_eq!(panel.state().title, "Water Rate");
        assert_eq!(panel.state().datasets.len(), 2);
        assert!(panel.state().labels.is_empty());
        assert_eq!(panel.renderer().redraws, 0);
    }

    #[test]
    fn set_series_redraws_once() {
        let mut panel = ChartPanel::new(PanelId::Oil, RecordingRenderer::default());
        panel
            .set_series(labels(2), vec![vec![Some(1.0), Some(2.0)], Vec::new()])
            .unwrap();

        assert_eq!(panel.renderer().redraws, 1);
        let drawn = panel.renderer().last.as_ref().unwrap();
        assert_eq!(drawn.datasets[0].values, vec![Some(1.0), Some(2.0)]);
        assert!(drawn.datasets[1].values.is_empty());
    }

    #[test]
    fn misaligned_series_leaves_state_untouched() {
        let mut panel = ChartPanel::new(PanelId::Bsw, RecordingRenderer::default());
        let err = panel
            .set_series(labels(3), vec![vec![Some(1.0)], Vec::new()])
            .unwrap_err();

        assert!(matches!(err, DashboardError::Misaligned { expected: 3, found: 1, .. }));
        assert!(panel.state().labels.is_empty());
        assert_eq!(panel.renderer().redraws, 0);
    }

    #[test]
    fn replace_then_reset_layout() {
        let mut panel = ChartPanel::new(PanelId::Oil, RecordingRenderer::default());
        let datasets = vec![
            Dataset::line("a", "#000").with_values(vec![None]),
            Dataset::line("b", "#111").with_values(vec![Some(1.0)]),
            Dataset::line("c", "#222").with_style(LineStyle::Dashed),
        ];
        panel.replace_datasets(labels(1), datasets).unwrap();
        assert_eq!(panel.state().datasets.len(), 3);

        panel.reset_layout();
        assert_eq!(panel.state().datasets, PanelId::Oil.template());
        assert_eq!(panel.renderer().redraws, 1, "reset does not redraw");
    }

    #[test]
    fn rename_ignores_missing_index() {
        let mut panel = ChartPanel::new(PanelId::Water, RecordingRenderer::default());
        panel.rename_dataset(1, WATER_SIMULATED);
        panel.rename_dataset(9, "nope");
        assert_eq!(panel.state().datasets[1].label, WATER_SIMULATED);
    }

    #[test]
    fn state_serializes_nulls_and_styles() {
        let state = ChartState {
            title: "t".to_string(),
            labels: vec![TimePoint::from("2020-01-01")],
            datasets: vec![Dataset::line("P10", "#0077b6")
                .with_style(LineStyle::Dashed)
                .with_values(vec![None])],
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["datasets"][0]["style"], "dashed");
        assert!(json["datasets"][0]["values"][0].is_null());
        assert_eq!(json["labels"][0], "2020-01-01");
    }
}
