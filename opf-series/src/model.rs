//! In-memory production data held between an upload and the next one.

use crate::error::{Result, SeriesError};
use crate::time_point::TimePoint;
use serde::{Deserialize, Serialize};

/// Ordered, nullable values aligned position-by-position with a label sequence.
pub type Series = Vec<Option<f64>>;

/// Historical production for one well, as parsed by the backend.
///
/// Every series shares `dates`; lengths are checked when the dataset is
/// built from a response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoricalDataset {
    pub dates: Vec<TimePoint>,
    pub oil_rate: Series,
    pub water_rate: Series,
    pub bsw: Series,
    pub accumulated_oil: Series,
    pub accumulated_water: Series,
    pub accumulated_bsw: Series,
}

impl HistoricalDataset {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Probabilistic future forecast with P10/P50/P90 bands.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FutureForecast {
    pub dates: Vec<TimePoint>,
    pub p10: Series,
    pub p50: Series,
    pub p90: Series,
    /// Full ensemble behind the percentiles; empty when the backend omits it.
    pub simulations: Vec<Series>,
}

impl FutureForecast {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Typed view of the fields the backend currently puts in `validacion`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ValidationView {
    #[serde(default, rename = "fechas")]
    pub dates: Vec<TimePoint>,
    #[serde(default, rename = "mejor_simulacion")]
    pub best_simulation: Series,
    #[serde(default)]
    pub p10: Series,
    #[serde(default)]
    pub p50: Series,
    #[serde(default)]
    pub p90: Series,
}

/// Validation simulation over the second half of the history.
///
/// Kept as raw JSON and passed through untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationSimulation(pub serde_json::Value);

impl ValidationSimulation {
    /// Best-effort typed view; `None` when the payload has another shape.
    pub fn view(&self) -> Option<ValidationView> {
        serde_json::from_value(self.0.clone()).ok()
    }
}

/// Everything one successful upload produces, replaced as a unit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub historical: HistoricalDataset,
    pub validation: ValidationSimulation,
    pub forecast: FutureForecast,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.historical.is_empty()
    }

    /// Check that every series lines up with its labels.
    pub fn validate(&self) -> Result<()> {
        let h = &self.historical;
        let n = h.len();
        check_len("historical.oil_rate", n, &h.oil_rate)?;
        check_len("historical.water_rate", n, &h.water_rate)?;
        check_len("historical.bsw", n, &h.bsw)?;
        check_len("historical.accumulated_oil", n, &h.accumulated_oil)?;
        check_len("historical.accumulated_water", n, &h.accumulated_water)?;
        check_len("historical.accumulated_bsw", n, &h.accumulated_bsw)?;

        let f = &self.forecast;
        let m = f.len();
        check_len("forecast.p10", m, &f.p10)?;
        check_len("forecast.p50", m, &f.p50)?;
        check_len("forecast.p90", m, &f.p90)?;
        for (i, sim) in f.simulations.iter().enumerate() {
            check_len(&format!("forecast.simulations[{}]", i), m, sim)?;
        }
        Ok(())
    }
}

pub(crate) fn check_len(field: &str, expected: usize, series: &Series) -> Result<()> {
    if series.len() != expected {
        return Err(SeriesError::LengthMismatch {
            field: field.to_string(),
            expected,
            found: series.len(),
        });
    }
    Ok(())
}
