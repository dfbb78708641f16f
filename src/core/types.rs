//! Per-session line change tracking types
//!
//! `SessionStats` is the domain view; `StatsRecord` is the on-disk shape
//! (`{"added":..,"removed":..,"lastDisplay":{"added":..,"removed":..}}`).

use serde::{Deserialize, Serialize};

/// A pair of added/removed line counts
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct LineCounts {
    pub(crate) added: i64,
    pub(crate) removed: i64,
}

impl LineCounts {
    pub(crate) fn new(added: i64, removed: i64) -> Self {
        Self { added, removed }
    }
}

/// Last observed cumulative counts and the delta displayed alongside them
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SessionStats {
    pub(crate) cumulative: LineCounts,
    /// Only meaningful relative to `cumulative` at the time it was written
    pub(crate) last_displayed: LineCounts,
}

/// Persisted form of `SessionStats`. Missing fields read as zero.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct StatsRecord {
    added: i64,
    removed: i64,
    #[serde(rename = "lastDisplay")]
    last_display: LineCounts,
}

impl From<StatsRecord> for SessionStats {
    fn from(record: StatsRecord) -> Self {
        SessionStats {
            cumulative: LineCounts::new(record.added, record.removed),
            last_displayed: record.last_display,
        }
    }
}

impl From<&SessionStats> for StatsRecord {
    fn from(stats: &SessionStats) -> Self {
        StatsRecord {
            added: stats.cumulative.added,
            removed: stats.cumulative.removed,
            last_display: stats.last_displayed,
        }
    }
}
