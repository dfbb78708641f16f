use std::io::{self, Read, Write};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use crate::config::Config;
use crate::core::{DeltaTracker, FileStatsStore, spawn_sweep};
use crate::output::{
    assistant_fallback_line, project_fallback_line, render_assistant_line, render_project_line,
};
use crate::source::{GitContext, Payload};
use crate::utils::debug_log;

/// How long to wait for the background cache sweep before exiting
const SWEEP_GRACE: Duration = Duration::from_millis(250);

/// Render one line, substituting the static fallback if rendering panics
fn render_guarded<F>(render: F, fallback: fn() -> String) -> String
where
    F: FnOnce() -> String,
{
    catch_unwind(AssertUnwindSafe(render)).unwrap_or_else(|_| fallback())
}

fn read_stdin() -> Option<String> {
    let mut input = String::new();
    match io::stdin().read_to_string(&mut input) {
        Ok(_) => Some(input),
        Err(e) => {
            debug_log!("Failed to read stdin: {e}");
            None
        }
    }
}

/// Read the payload, print both lines, then give the cache sweep a short
/// window to finish. Malformed input prints nothing.
pub(crate) fn run(config: &Config) {
    let Some(input) = read_stdin() else {
        return;
    };
    let payload = match Payload::parse(&input) {
        Ok(payload) => payload,
        Err(e) => {
            debug_log!("{e}");
            return;
        }
    };

    let store = FileStatsStore::new(config.stats_dir());
    let tracker = DeltaTracker::new(&store);

    let assistant_line = render_guarded(
        || render_assistant_line(&payload, &tracker),
        assistant_fallback_line,
    );
    let project_line = render_guarded(
        || {
            let dir = payload.workspace_dir();
            let git = GitContext::collect(&dir);
            render_project_line(&dir, &git)
        },
        project_fallback_line,
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{assistant_line}");
    let _ = writeln!(stdout, "{project_line}");
    let _ = stdout.flush();
    drop(stdout);

    let reports = spawn_sweep(store.dir().to_path_buf(), store.ttl());
    if reports.recv_timeout(SWEEP_GRACE).is_err() {
        debug_log!("Cache sweep still running, abandoning it");
    }
}
