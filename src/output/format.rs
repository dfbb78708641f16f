use std::path::Path;

use crate::consts::UNKNOWN_PROJECT;
use crate::core::LineCounts;

use super::theme::{GREEN, RED, RESET};

/// Uncolored placeholder shown when the payload has no cost data
pub(crate) const NO_COST_STATS: &str = "+0 -0";

/// `+added -removed` with green/red markers. Negative values are printed as-is.
pub(crate) fn format_line_stats(counts: LineCounts) -> String {
    format!(
        "{GREEN}+{}{RESET} {RED}-{}{RESET}",
        counts.added, counts.removed
    )
}

/// Colored `+0 -0`
pub(crate) fn zero_line_stats() -> String {
    format_line_stats(LineCounts::default())
}

/// Final path component of the workspace directory
pub(crate) fn project_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_PROJECT.to_string())
}
