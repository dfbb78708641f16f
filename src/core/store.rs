//! Per-session stats persistence
//!
//! One JSON file per session (`stats_<key>.json`) under a storage root.
//! Reads and writes never fail the caller: a missing, stale or corrupt entry
//! loads as absent, and a failed write is reported and ignored.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tempfile::{Builder, NamedTempFile};

use crate::core::types::{SessionStats, StatsRecord};
use crate::error::StoreError;
use crate::utils::debug_log;

/// Session entries older than this are ignored on load and swept by the janitor
pub(crate) const STATS_TTL: Duration = Duration::from_secs(24 * 60 * 60);

pub(crate) const ENTRY_PREFIX: &str = "stats_";
pub(crate) const ENTRY_SUFFIX: &str = ".json";

/// Temp files are named `stats_.tmp<random>.json`: inside the janitor's
/// pattern, yet unreachable from a sanitized session key (no leading `.`).
const TEMP_PREFIX: &str = "stats_.tmp";

/// Key-value persistence of `SessionStats` by session id
pub(crate) trait StatsStore {
    /// Previously saved stats, or `None` when absent or unreadable
    fn load(&self, session_id: &str) -> Option<SessionStats>;

    /// Persist stats for a session. Returns `false` when the write was ignored.
    fn save(&self, session_id: &str, stats: &SessionStats) -> bool;
}

/// File-backed store rooted at a single cache directory
#[derive(Debug, Clone)]
pub(crate) struct FileStatsStore {
    dir: PathBuf,
    ttl: Duration,
}

impl FileStatsStore {
    pub(crate) fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            ttl: STATS_TTL,
        }
    }

    pub(crate) fn dir(&self) -> &Path {
        &self.dir
    }

    pub(crate) fn ttl(&self) -> Duration {
        self.ttl
    }

    pub(crate) fn entry_path(&self, session_id: &str) -> PathBuf {
        self.dir.join(entry_file_name(session_id))
    }

    fn try_load(&self, session_id: &str) -> Result<Option<SessionStats>, StoreError> {
        let path = self.entry_path(session_id);
        let meta = match fs::metadata(&path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Read {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        if let Some(age) = meta
            .modified()
            .ok()
            .and_then(|modified| SystemTime::now().duration_since(modified).ok())
            && age > self.ttl
        {
            debug_log!(
                "Ignoring stale stats entry {} ({:.1}h old)",
                path.display(),
                age.as_secs_f64() / 3600.0
            );
            return Ok(None);
        }

        let file = File::open(&path).map_err(|source| StoreError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let record: StatsRecord =
            serde_json::from_reader(file).map_err(|source| StoreError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Some(record.into()))
    }

    /// A temp file an interrupted save may leave behind, swept like any entry
    fn create_temp_entry(&self) -> std::io::Result<NamedTempFile> {
        Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(ENTRY_SUFFIX)
            .tempfile_in(&self.dir)
    }

    fn try_save(&self, session_id: &str, stats: &SessionStats) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::CreateDir {
            path: self.dir.display().to_string(),
            source,
        })?;

        let path = self.entry_path(session_id);
        let write_err = |source: std::io::Error| StoreError::Write {
            path: path.display().to_string(),
            source,
        };

        // Write beside the entry and rename over it so readers never see a torn file
        let tmp = self.create_temp_entry().map_err(write_err)?;
        let mut writer = BufWriter::new(tmp);
        serde_json::to_writer(&mut writer, &StatsRecord::from(stats))
            .map_err(StoreError::Serialize)?;
        writer.flush().map_err(write_err)?;
        let tmp = writer.into_inner().map_err(|e| write_err(e.into_error()))?;
        tmp.persist(&path).map_err(|e| write_err(e.error))?;
        Ok(())
    }
}

impl StatsStore for FileStatsStore {
    fn load(&self, session_id: &str) -> Option<SessionStats> {
        match self.try_load(session_id) {
            Ok(stats) => stats,
            Err(e) => {
                debug_log!("{e}");
                None
            }
        }
    }

    fn save(&self, session_id: &str, stats: &SessionStats) -> bool {
        match self.try_save(session_id, stats) {
            Ok(()) => true,
            Err(e) => {
                debug_log!("{e}");
                false
            }
        }
    }
}

/// File name for a session entry. Characters outside `[A-Za-z0-9._-]` and a
/// leading `.` become `_`, so ids can never escape the storage root.
pub(crate) fn entry_file_name(session_id: &str) -> String {
    let key: String = session_id
        .chars()
        .enumerate()
        .map(|(i, c)| match c {
            '.' if i == 0 => '_',
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') => c,
            _ => '_',
        })
        .collect();
    format!("{ENTRY_PREFIX}{key}{ENTRY_SUFFIX}")
}
