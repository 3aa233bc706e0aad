//! Application state managed via Dioxus context.
//!
//! `AppState` bundles the reactive signals the page renders from. The
//! dashboard itself (series store and chart panels) is not reactive; it
//! lives behind an `Rc<RefCell<_>>` owned by the app and only these
//! signals change what Dioxus re-renders.

use dioxus::prelude::*;
use opf_dashboard::FitReport;

/// Shared UI state for the production dashboard.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Uploads started but not yet finished
    pub uploads: Signal<InFlight>,
    /// User-visible notice for the last failed action
    pub notice: Signal<Option<String>>,
    /// Name of the last successfully loaded file
    pub file_name: Signal<Option<String>>,
    /// MSE summary of the last fit
    pub fit_report: Signal<Option<FitReport>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            uploads: Signal::new(InFlight::default()),
            notice: Signal::new(None),
            file_name: Signal::new(None),
            fit_report: Signal::new(None),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Count of overlapping uploads; the page stays busy until the last one ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InFlight(u32);

impl InFlight {
    pub fn start(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn finish(self) -> Self {
        Self(self.0.saturating_sub(1))
    }

    pub fn is_busy(self) -> bool {
        self.0 > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_busy_until_last_upload_finishes() {
        let first = InFlight::default().start();
        let both = first.start();
        assert!(both.is_busy());

        // the older upload resolves first
        let one_left = both.finish();
        assert!(one_left.is_busy());
        assert!(!one_left.finish().is_busy());
    }

    #[test]
    fn extra_finish_does_not_underflow() {
        let idle = InFlight::default().finish();
        assert_eq!(idle, InFlight::default());
        assert!(!idle.is_busy());
    }
}
