//! Opt-in stderr diagnostics
//!
//! stdout belongs to the status line, so diagnostics only ever go to stderr
//! and only after `--debug` (or `debug = true` in config) switched them on.

use std::sync::atomic::{AtomicBool, Ordering};

static DIAGNOSTICS: AtomicBool = AtomicBool::new(false);

pub(crate) fn set_debug(enabled: bool) {
    DIAGNOSTICS.store(enabled, Ordering::Relaxed);
}

pub(crate) fn debug_enabled() -> bool {
    DIAGNOSTICS.load(Ordering::Relaxed)
}

/// `eprintln!` with a `ccstatusline:` prefix, emitted only in debug mode
macro_rules! debug_log {
    ($($arg:tt)*) => {
        if $crate::utils::debug_enabled() {
            eprintln!("ccstatusline: {}", format_args!($($arg)*));
        }
    };
}

pub(crate) use debug_log;
