pub(crate) mod debug;
pub(crate) mod duration;

pub(crate) use debug::{debug_enabled, debug_log, set_debug};
pub(crate) use duration::format_session_time;
