//! Session line-change tracking: persistence, delta calculation and cleanup

mod delta;
mod janitor;
mod store;
mod types;

pub(crate) use delta::DeltaTracker;
pub(crate) use janitor::spawn_sweep;
pub(crate) use store::{FileStatsStore, StatsStore};
pub(crate) use types::LineCounts;
#[cfg(test)]
pub(crate) use types::SessionStats;
