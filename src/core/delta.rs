//! Incremental line change calculation
//!
//! Turns the cumulative counts reported for a session into the change since
//! the previous invocation. When a counter has not moved, the previously
//! displayed value is shown again instead of a zero.

use crate::core::store::StatsStore;
use crate::core::types::{LineCounts, SessionStats};

fn delta_component(current: i64, cumulative: i64, last_displayed: i64) -> i64 {
    if current == cumulative {
        last_displayed
    } else {
        // A decreasing counter yields a negative delta, printed as-is
        current.saturating_sub(cumulative)
    }
}

/// Next state for a session given its previous state and the current totals.
/// The returned `last_displayed` is the delta to show for this invocation.
pub(crate) fn compute_delta(previous: &SessionStats, current: LineCounts) -> SessionStats {
    let delta = LineCounts::new(
        delta_component(
            current.added,
            previous.cumulative.added,
            previous.last_displayed.added,
        ),
        delta_component(
            current.removed,
            previous.cumulative.removed,
            previous.last_displayed.removed,
        ),
    );
    SessionStats {
        cumulative: current,
        last_displayed: delta,
    }
}

/// Runs one read-compute-write cycle against a store
pub(crate) struct DeltaTracker<'a, S: StatsStore> {
    store: &'a S,
}

impl<'a, S: StatsStore> DeltaTracker<'a, S> {
    pub(crate) fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Delta to display for `session_id` at the given cumulative totals.
    /// A failed save does not change the returned value.
    pub(crate) fn track(&self, session_id: &str, current: LineCounts) -> LineCounts {
        let previous = self.store.load(session_id).unwrap_or_default();
        let next = compute_delta(&previous, current);
        self.store.save(session_id, &next);
        next.last_displayed
    }
}
