//! Wire format of the `/procesar` endpoint.
//!
//! ```text
//! { historico: { fechas, valores, accumulatedOil, accumulatedWater,
//!                rateWater, bsw, accumulatedBSW },
//!   validacion: <opaque>,
//!   futuro: { fechas, p10, p50, p90, simulaciones? } }
//! ```
//!
//! All `historico` and `futuro` fields except `simulaciones` are required.
//! [`ProcessResponse::into_snapshot`] checks that every series lines up with
//! its labels before anything reaches a chart.

use crate::error::{Result, SeriesError};
use crate::model::{
    check_len, FutureForecast, HistoricalDataset, Series, Snapshot, ValidationSimulation,
};
use crate::time_point::TimePoint;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricoPayload {
    pub fechas: Vec<TimePoint>,
    pub valores: Series,
    #[serde(rename = "accumulatedOil")]
    pub accumulated_oil: Series,
    #[serde(rename = "accumulatedWater")]
    pub accumulated_water: Series,
    #[serde(rename = "rateWater")]
    pub rate_water: Series,
    pub bsw: Series,
    #[serde(rename = "accumulatedBSW")]
    pub accumulated_bsw: Series,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuturoPayload {
    pub fechas: Vec<TimePoint>,
    pub p10: Series,
    pub p50: Series,
    pub p90: Series,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulaciones: Option<Vec<Series>>,
}

/// Successful `/procesar` response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub historico: HistoricoPayload,
    pub validacion: serde_json::Value,
    pub futuro: FuturoPayload,
}

/// Error body the backend sends alongside non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ProcessResponse {
    /// Decode a response body.
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Validate lengths and convert into the in-memory snapshot.
    pub fn into_snapshot(self) -> Result<Snapshot> {
        let h = self.historico;
        let n = h.fechas.len();
        check_len("historico.valores", n, &h.valores)?;
        check_len("historico.accumulatedOil", n, &h.accumulated_oil)?;
        check_len("historico.accumulatedWater", n, &h.accumulated_water)?;
        check_len("historico.rateWater", n, &h.rate_water)?;
        check_len("historico.bsw", n, &h.bsw)?;
        check_len("historico.accumulatedBSW", n, &h.accumulated_bsw)?;

        let f = self.futuro;
        let m = f.fechas.len();
        check_len("futuro.p10", m, &f.p10)?;
        check_len("futuro.p50", m, &f.p50)?;
        check_len("futuro.p90", m, &f.p90)?;
        let simulations = f.simulaciones.unwrap_or_default();
        for (i, sim) in simulations.iter().enumerate() {
            check_len(&format!("futuro.simulaciones[{}]", i), m, sim)?;
        }

        Ok(Snapshot {
            historical: HistoricalDataset {
                dates: h.fechas,
                oil_rate: h.valores,
                water_rate: h.rate_water,
                bsw: h.bsw,
                accumulated_oil: h.accumulated_oil,
                accumulated_water: h.accumulated_water,
                accumulated_bsw: h.accumulated_bsw,
            },
            validation: ValidationSimulation(self.validacion),
            forecast: FutureForecast {
                dates: f.fechas,
                p10: f.p10,
                p50: f.p50,
                p90: f.p90,
                simulations,
            },
        })
    }
}

/// Turn a finished round trip into a decoded body or [`SeriesError::Rejected`].
pub fn check_status(status: u16, body: &str) -> Result<ProcessResponse> {
    if !(200..300).contains(&status) {
        return Err(SeriesError::Rejected {
            status,
            message: error_message(body),
        });
    }
    ProcessResponse::from_json(body)
}

/// Pull the backend's `{"error": ...}` message out of a failure body.
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body).ok().map(|b| b.error)
}
