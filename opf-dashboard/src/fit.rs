//! Fit: compare observed series against the placeholder simulation.
//!
//! The "simulated" series are fixed perturbations of the observed ones
//! (see `opf_data::simulation`), not a fitted model.

use crate::chart::{ChartRenderer, BSW_SIMULATED, WATER_SIMULATED};
use crate::decline::ChartSurface;
use crate::error::{DashboardError, Result};
use crate::Dashboard;
use log::info;
use opf_data::metrics::mse;
use opf_data::simulation::{NoiseSource, BSW, OIL, WATER};
use opf_data::DataError;
use serde::Serialize;
use std::fmt;

/// Mean squared error per series; `None` when a series has no values to compare.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitReport {
    pub oil: Option<f64>,
    pub water: Option<f64>,
    pub bsw: Option<f64>,
}

impl FitReport {
    /// `(name, mse)` in display order.
    pub fn entries(&self) -> [(&'static str, Option<f64>); 3] {
        [("Oil", self.oil), ("Water", self.water), ("BSW", self.bsw)]
    }
}

/// Two-decimal display used by the error summary.
pub fn format_mse(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "n/a".to_string(),
    }
}

impl fmt::Display for FitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .entries()
            .iter()
            .map(|(name, v)| format!("{} MSE: {}", name, format_mse(*v)))
            .collect();
        f.write_str(&parts.join(" | "))
    }
}

fn comparable_mse(observed: &[Option<f64>], simulated: &[Option<f64>]) -> Result<Option<f64>> {
    match mse(observed, simulated) {
        Ok(v) => Ok(Some(v)),
        Err(DataError::EmptySeries) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl<R: ChartRenderer, S: ChartSurface> Dashboard<R, S> {
    /// Simulate, score, redraw Oil/Water/BSW with observed vs simulated,
    /// and rebuild the decline chart.
    ///
    /// Aborts with [`DashboardError::NoData`] before touching any chart when
    /// nothing is loaded.
    pub fn run_fit<N: NoiseSource + ?Sized>(&mut self, noise: &mut N) -> Result<FitReport> {
        if !self.store.is_loaded() {
            return Err(DashboardError::NoData);
        }
        let snapshot = self.store.snapshot();
        let h = &snapshot.historical;

        let oil_sim = OIL.apply(&h.oil_rate, &mut *noise);
        let water_sim = WATER.apply(&h.water_rate, &mut *noise);
        let bsw_sim = BSW.apply(&h.bsw, &mut *noise);

        let report = FitReport {
            oil: comparable_mse(&h.oil_rate, &oil_sim)?,
            water: comparable_mse(&h.water_rate, &water_sim)?,
            bsw: comparable_mse(&h.bsw, &bsw_sim)?,
        };

        self.oil.reset_layout();
        self.oil.set_series(h.dates.clone(), vec![h.oil_rate.clone(), oil_sim])?;

        self.water.rename_dataset(1, WATER_SIMULATED);
        self.water.set_series(h.dates.clone(), vec![h.water_rate.clone(), water_sim])?;

        self.bsw.rename_dataset(1, BSW_SIMULATED);
        self.bsw.set_series(h.dates.clone(), vec![h.bsw.clone(), bsw_sim])?;

        self.decline.render(&h.dates, &h.oil_rate);

        info!("Fit complete: {}", report);
        self.last_fit = Some(report);
        Ok(report)
    }
}
