//! Stand-alone decline-curve chart, rebuilt on every fit.
//!
//! Each render binds a fresh chart instance to the drawing surface. The
//! previous instance is disposed first, and the last one is disposed when
//! the chart itself is dropped, so repeated fits never accumulate bindings.

use crate::chart::{ChartState, Dataset};
use log::debug;
use opf_data::decline::decline_from_observed;
use opf_series::TimePoint;
use std::cell::RefCell;
use std::rc::Rc;

/// DOM id of the decline chart canvas.
pub const DECLINE_CANVAS_ID: &str = "chart-decline";

pub const DECLINE_TITLE: &str = "Observed production vs. Arps exponential";

/// A live chart bound to a surface.
pub trait ChartInstance {
    /// Release the binding.
    fn dispose(self);
}

/// Something a new chart instance can be created on.
pub trait ChartSurface {
    type Instance: ChartInstance;

    fn bind(&mut self, state: &ChartState) -> Self::Instance;
}

/// Observed oil rate plus the exponential curve over the same labels.
pub fn decline_state(dates: &[TimePoint], observed: &[Option<f64>]) -> ChartState {
    let curve = decline_from_observed(observed).into_iter().map(Some).collect();
    ChartState {
        title: DECLINE_TITLE.to_string(),
        labels: dates.to_vec(),
        datasets: vec![
            Dataset::line("Oil rate (observed)", "#FF6384").with_values(observed.to_vec()),
            Dataset::line("Arps exponential (simulated)", "#00B894").with_values(curve),
        ],
    }
}

pub struct DeclineCurveChart<S: ChartSurface> {
    surface: S,
    current: Option<S::Instance>,
    state: Option<ChartState>,
}

impl<S: ChartSurface> DeclineCurveChart<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            current: None,
            state: None,
        }
    }

    /// Dispose any previous instance, then bind a new one for `dates`/`observed`.
    pub fn render(&mut self, dates: &[TimePoint], observed: &[Option<f64>]) -> &ChartState {
        let state = decline_state(dates, observed);
        if let Some(previous) = self.current.take() {
            debug!("Disposing previous decline chart");
            previous.dispose();
        }
        self.current = Some(self.surface.bind(&state));
        self.state.insert(state)
    }

    pub fn state(&self) -> Option<&ChartState> {
        self.state.as_ref()
    }

    pub fn is_bound(&self) -> bool {
        self.current.is_some()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: ChartSurface> Drop for DeclineCurveChart<S> {
    fn drop(&mut self) {
        if let Some(instance) = self.current.take() {
            instance.dispose();
        }
    }
}

/// Counters shared between a [`RecordingSurface`] and its instances.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SurfaceLog {
    pub binds: usize,
    pub disposals: usize,
    pub last: Option<ChartState>,
}

impl SurfaceLog {
    pub fn live(&self) -> usize {
        self.binds - self.disposals
    }
}

/// In-memory surface that records binds and disposals.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    log: Rc<RefCell<SurfaceLog>>,
}

impl RecordingSurface {
    pub fn log(&self) -> Rc<RefCell<SurfaceLog>> {
        Rc::clone(&self.log)
    }
}

#[derive(Debug)]
pub struct RecordingInstance {
    log: Rc<RefCell<SurfaceLog>>,
}

impl ChartInstance for RecordingInstance {
    fn dispose(self) {
        self.log.borrow_mut().disposals += 1;
    }
}

impl ChartSurface for RecordingSurface {
    type Instance = RecordingInstance;

    fn bind(&mut self, state: &ChartState) -> RecordingInstance {
        let mut log = self.log.borrow_mut();
        log.binds += 1;
        log.last = Some(state.clone());
        RecordingInstance {
            log: Rc::clone(&self.log),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates() -> Vec<TimePoint> {
        ["2020-01-01", "2020-02-01", "2020-03-01"]
            .into_iter()
            .map(TimePoint::from)
            .collect()
    }

    #[test]
    fn state_pairs_observed_with_curve() {
        let state = decline_state(&dates(), &[Some(f64::NAN), Some(500.0), Some(600.0)]);
        assert_eq!(state.labels.len(), 3);
        assert_eq!(state.datasets.len(), 2);
        assert_eq!(state.datasets[1].values[0], Some(500.0));
        assert_eq!(state.datasets[1].values[1], Some(495.02));
    }

    #[test]
    fn rerender_disposes_previous_instance() {
        let surface = RecordingSurface::default();
        let log = surface.log();
        let mut chart = DeclineCurveChart::new(surface);

        for _ in 0..5 {
            chart.render(&dates(), &[Some(100.0), Some(90.0), Some(80.0)]);
        }

        let log = log.borrow();
        assert_eq!(log.binds, 5);
        assert_eq!(log.disposals, 4);
        assert_eq!(log.live(), 1, "only the latest instance stays bound");
    }

    #[test]
    fn drop_releases_last_instance() {
        let surface = RecordingSurface::default();
        let log = surface.log();
        {
            let mut chart = DeclineCurveChart::new(surface);
            chart.render(&dates(), &[None, None, None]);
            assert!(chart.is_bound());
            assert_eq!(chart.state().unwrap().datasets[1].values[0], Some(1000.0));
        }
        assert_eq!(log.borrow().live(), 0);
    }
}
