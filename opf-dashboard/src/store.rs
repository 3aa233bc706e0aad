//! Process-wide series state, replaced as a whole on each successful upload.

use log::{debug, warn};
use opf_series::Snapshot;
use std::rc::Rc;

/// Identifies one upload attempt; only the most recent one may load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UploadTicket(u64);

/// Holds the last loaded [`Snapshot`].
///
/// Readers get an `Rc` to an immutable snapshot, so a load is a single
/// pointer swap and never visible half-done. Before the first load,
/// `current()` is the empty snapshot.
#[derive(Debug, Default)]
pub struct SeriesStore {
    current: Rc<Snapshot>,
    issued: u64,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all held state.
    pub fn load(&mut self, snapshot: Snapshot) {
        debug!(
            "Loading snapshot: {} historical rows, {} forecast points",
            snapshot.historical.len(),
            snapshot.forecast.len()
        );
        self.current = Rc::new(snapshot);
    }

    pub fn current(&self) -> &Snapshot {
        &self.current
    }

    /// Shared handle to the current snapshot.
    pub fn snapshot(&self) -> Rc<Snapshot> {
        Rc::clone(&self.current)
    }

    pub fn is_loaded(&self) -> bool {
        !self.current.is_empty()
    }

    /// Start an upload attempt. Earlier tickets become stale.
    pub fn issue_ticket(&mut self) -> UploadTicket {
        self.issued += 1;
        UploadTicket(self.issued)
    }

    pub fn is_latest(&self, ticket: UploadTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Load only if no newer upload has started since `ticket` was issued.
    pub fn load_if_latest(&mut self, ticket: UploadTicket, snapshot: Snapshot) -> bool {
        if !self.is_latest(ticket) {
            warn!(
                "Discarding stale upload #{} (latest is #{})",
                ticket.0, self.issued
            );
            return false;
        }
        self.load(snapshot);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opf_series::{HistoricalDataset, TimePoint};

    fn snapshot(label: &str) -> Snapshot {
        Snapshot {
            historical: HistoricalDataset {
                dates: vec![TimePoint::from(label)],
                oil_rate: vec![Some(1.0)],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn starts_empty() {
        let store = SeriesStore::new();
        assert!(!store.is_loaded());
        assert_eq!(store.current(), &Snapshot::default());
    }

    #[test]
    fn load_replaces_everything() {
        let mut store = SeriesStore::new();
        store.load(snapshot("2020-01-01"));
        let before = store.snapshot();
        store.load(snapshot("2021-01-01"));

        assert_eq!(store.current().historical.dates[0].to_string(), "2021-01-01");
        assert_eq!(
            before.historical.dates[0].to_string(),
            "2020-01-01",
            "earlier readers keep their snapshot"
        );
    }

    #[test]
    fn stale_ticket_cannot_load() {
        let mut store = SeriesStore::new();
        let slow = store.issue_ticket();
        let fast = store.issue_ticket();

        assert!(store.load_if_latest(fast, snapshot("2022-01-01")));
        assert!(!store.load_if_latest(slow, snapshot("2019-01-01")));
        assert_eq!(store.current().historical.dates[0].to_string(), "2022-01-01");
    }
}
