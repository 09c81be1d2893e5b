use chrono::{DateTime, Utc};

use crate::filter::{FilterField, FilterInput, FilterState, apply_filter};
use crate::source::Snapshot;
use crate::vehicle::VehiclePosition;
use crate::view::{Icon, MapView};

/// Page state: the fetched snapshot plus the current filter.
///
/// The snapshot is set once from the single fetch. Each user action replaces
/// the filter wholesale.
#[derive(Debug, Clone)]
pub struct Session {
    snapshot: Snapshot,
    filter: FilterState,
}

impl Session {
    #[must_use]
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot, filter: FilterState::default() }
    }

    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    #[must_use]
    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// The "apply filter" action.
    pub fn apply(&mut self, input: &FilterInput) {
        self.filter = FilterState::from_input(input);
        tracing::debug!(filter = ?self.filter, "filter applied");
    }

    /// The "reset filters" action.
    pub fn reset(&mut self) {
        self.filter = FilterState::default();
    }

    /// Remove a single filter field, leaving the others in place.
    pub fn clear(&mut self, field: FilterField) {
        self.filter = self.filter.without(field);
    }

    /// The vehicles passing the current filter.
    #[must_use]
    pub fn visible(&self) -> Vec<VehiclePosition> {
        apply_filter(&self.snapshot.vehicles, &self.filter)
    }

    #[must_use]
    pub fn view(&self, now: DateTime<Utc>, icon: Icon) -> MapView {
        MapView::build(&self.snapshot.vehicles, &self.filter, now, icon)
    }
}
