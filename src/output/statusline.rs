//! Two-line status line rendering
//!
//! Line 1: model, per-prompt line delta, output style, session time and
//! session totals. Line 2: project, git branch and uncommitted diff stats.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;

use crate::core::{DeltaTracker, StatsStore};
use crate::output::format::{NO_COST_STATS, format_line_stats, project_name, zero_line_stats};
use crate::output::theme::{BLUE, BRIGHT, CYAN, GRAY, GREEN, MAGENTA, RESET, YELLOW};
use crate::source::{GitContext, Payload};
use crate::utils::format_session_time;

/// Lines changed since the previous invocation for this session.
/// Performs the store read-compute-write cycle only when cost data is present;
/// a failure inside that cycle shows colored zeros and leaves the rest of the
/// line intact.
pub(crate) fn render_delta_stats<S: StatsStore>(
    payload: &Payload,
    tracker: &DeltaTracker<'_, S>,
) -> String {
    let Some(cost) = payload.cost() else {
        return NO_COST_STATS.to_string();
    };
    catch_unwind(AssertUnwindSafe(|| {
        tracker.track(payload.session_id(), cost.line_totals())
    }))
    .map(format_line_stats)
    .unwrap_or_else(|_| zero_line_stats())
}

/// Cumulative lines changed since session start, straight from the payload
pub(crate) fn render_total_stats(payload: &Payload) -> String {
    match payload.cost() {
        Some(cost) => format_line_stats(cost.line_totals()),
        None => NO_COST_STATS.to_string(),
    }
}

pub(crate) fn render_assistant_line<S: StatsStore>(
    payload: &Payload,
    tracker: &DeltaTracker<'_, S>,
) -> String {
    let delta = render_delta_stats(payload, tracker);
    let session_time = format_session_time(payload.cost().and_then(|c| c.total_duration_ms));
    format!(
        "{CYAN}🤖 {BRIGHT}{}{RESET} ({delta}) {GRAY}|{RESET} {MAGENTA}🎨 {}{RESET} {GRAY}|{RESET} {YELLOW}⌚ {session_time}{RESET} | Total : {}",
        payload.model_name(),
        payload.output_style(),
        render_total_stats(payload),
    )
}

pub(crate) fn render_project_line(project_dir: &Path, git: &GitContext) -> String {
    format!(
        "{BLUE}📁 {BRIGHT}{}{RESET} {GRAY}|{RESET} {GREEN}🌿 {}{RESET} ({})",
        project_name(project_dir),
        git.branch,
        format_line_stats(git.stats),
    )
}

/// Static assistant line used when rendering fails
pub(crate) fn assistant_fallback_line() -> String {
    format!(
        "{CYAN}🤖 {BRIGHT}Claude{RESET} ({}) {GRAY}|{RESET} {MAGENTA}🎨 default{RESET} {GRAY}|{RESET} {YELLOW}⏱️ 0m{RESET}",
        zero_line_stats()
    )
}

/// Static project line used when rendering fails
pub(crate) fn project_fallback_line() -> String {
    format!(
        "{BLUE}📁 {BRIGHT}Unknown{RESET} {GRAY}|{RESET} {GREEN}🌿 unknown{RESET} ({})",
        zero_line_stats()
    )
}
