/// Fallback value when the branch cannot be resolved
pub(crate) const UNKNOWN: &str = "unknown";

/// Branch label for a workspace without a `.git` entry
pub(crate) const NO_GIT: &str = "no-git";

/// Session key used when the payload carries no `session_id`
pub(crate) const DEFAULT_SESSION: &str = "default";

/// Output style label used when the payload carries none
pub(crate) const DEFAULT_STYLE: &str = "default";

/// Model label used when the payload carries none
pub(crate) const DEFAULT_MODEL: &str = "Claude";

/// Project label used when the workspace path has no final component
pub(crate) const UNKNOWN_PROJECT: &str = "Unknown";

/// Name of the per-session cache directory next to the executable
pub(crate) const CACHE_DIR_NAME: &str = "claude_cache";
