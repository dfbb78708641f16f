use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::consts::CACHE_DIR_NAME;
use crate::error::ConfigError;
use crate::utils::debug_log;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) debug: bool,
    /// Overrides the per-session stats directory
    #[serde(default)]
    pub(crate) cache_dir: Option<String>,
}

const APP_DIR: &str = "ccstatusline";
const CONFIG_FILE: &str = "config.toml";

impl Config {
    /// First readable config among the candidate locations, or defaults.
    /// Unreadable or invalid files are skipped with a debug diagnostic.
    pub(crate) fn load() -> Self {
        candidate_paths()
            .into_iter()
            .find_map(|path| match Self::from_path(&path) {
                Ok(Some(config)) => {
                    debug_log!("Loaded config from {}", path.display());
                    Some(config)
                }
                Ok(None) => None,
                Err(e) => {
                    debug_log!("{e}");
                    None
                }
            })
            .unwrap_or_default()
    }

    /// `Ok(None)` when nothing exists at `path`
    fn from_path(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.display().to_string(),
                    source,
                });
            }
        };
        toml::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })
    }

    /// Directory holding the per-session stats entries.
    ///
    /// `cache_dir` from config, else `claude_cache` next to the executable,
    /// else `claude_cache` under the user cache directory.
    pub(crate) fn stats_dir(&self) -> PathBuf {
        if let Some(dir) = self.cache_dir.as_deref().filter(|d| !d.trim().is_empty()) {
            return expand_home(dir.trim());
        }
        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(PathBuf::from))
        {
            return exe_dir.join(CACHE_DIR_NAME);
        }
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("ccstatusline")
            .join(CACHE_DIR_NAME)
    }
}

/// `~/.config/ccstatusline/config.toml`, the platform config dir
/// (Application Support, %APPDATA%), then `~/.ccstatusline.toml`
fn candidate_paths() -> Vec<PathBuf> {
    let home = dirs::home_dir();
    let mut paths: Vec<PathBuf> = Vec::with_capacity(3);
    let candidates = [
        home.as_ref()
            .map(|h| h.join(".config").join(APP_DIR).join(CONFIG_FILE)),
        dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE)),
        home.as_ref().map(|h| h.join(format!(".{APP_DIR}.toml"))),
    ];
    for path in candidates.into_iter().flatten() {
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
    paths
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}
