//! Removal of stale per-session stats entries
//!
//! A sweep visits every `stats_*.json` entry under the storage root and
//! deletes those last modified more than the retention threshold ago.
//! Per-entry failures are counted and skipped.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, SystemTime};

use crate::core::store::{ENTRY_PREFIX, ENTRY_SUFFIX};
use crate::utils::debug_log;

/// Outcome of one sweep
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SweepReport {
    pub(crate) scanned: usize,
    pub(crate) removed: usize,
    pub(crate) failed: usize,
}

fn entry_pattern(dir: &Path) -> String {
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    format!("{escaped}/{ENTRY_PREFIX}*{ENTRY_SUFFIX}")
}

fn is_expired(path: &Path, ttl: Duration, now: SystemTime) -> std::io::Result<bool> {
    let modified = fs::metadata(path)?.modified()?;
    // Future mtimes (clock skew) count as fresh
    Ok(now
        .duration_since(modified)
        .map(|age| age > ttl)
        .unwrap_or(false))
}

/// Sweep `dir` using the current time
pub(crate) fn sweep(dir: &Path, ttl: Duration) -> SweepReport {
    sweep_at(dir, ttl, SystemTime::now())
}

/// Sweep `dir` as if the current time were `now`
pub(crate) fn sweep_at(dir: &Path, ttl: Duration, now: SystemTime) -> SweepReport {
    let mut report = SweepReport::default();
    if !dir.is_dir() {
        return report;
    }

    let paths = match glob::glob(&entry_pattern(dir)) {
        Ok(paths) => paths,
        Err(e) => {
            debug_log!("Invalid cache sweep pattern for {}: {}", dir.display(), e);
            return report;
        }
    };

    for entry in paths {
        report.scanned += 1;
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                report.failed += 1;
                debug_log!("Failed to read cache entry: {e}");
                continue;
            }
        };

        match is_expired(&path, ttl, now) {
            Ok(false) => {}
            Ok(true) => match fs::remove_file(&path) {
                Ok(()) => report.removed += 1,
                // Already gone: another invocation swept it first
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    report.failed += 1;
                    debug_log!("Failed to remove {}: {}", path.display(), e);
                }
            },
            Err(e) => {
                report.failed += 1;
                debug_log!("Failed to stat {}: {}", path.display(), e);
            }
        }
    }

    debug_log!(
        "Cache sweep of {}: scanned {}, removed {}, failed {}",
        dir.display(),
        report.scanned,
        report.removed,
        report.failed
    );
    report
}

/// Run a sweep on the rayon pool without waiting for it.
/// The report arrives on the returned channel if the process lives long enough.
pub(crate) fn spawn_sweep(dir: PathBuf, ttl: Duration) -> Receiver<SweepReport> {
    let (tx, rx) = mpsc::channel();
    rayon::spawn(move || {
        let report = sweep(&dir, ttl);
        let _ = tx.send(report);
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::backdate;
    use std::fs::File;
    use tempfile::TempDir;

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    fn write_entry(dir: &Path, name: &str, age: Duration) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, r#"{"added":1,"removed":0,"lastDisplay":{"added":1,"removed":0}}"#)
            .unwrap();
        backdate(&path, age);
        path
    }

    #[test]
    fn removes_only_expired_entries() {
        let tmp = TempDir::new().unwrap();
        let old = write_entry(tmp.path(), "stats_old.json", Duration::from_secs(25 * 3600));
        let fresh = write_entry(tmp.path(), "stats_new.json", Duration::from_secs(3600));

        let report = sweep(tmp.path(), DAY);
        assert_eq!(
            report,
            SweepReport {
                scanned: 2,
                removed: 1,
                failed: 0
            }
        );
        assert!(!old.exists());
        assert!(fresh.exists());
    }

    #[test]
    fn ignores_files_outside_naming_convention() {
        let tmp = TempDir::new().unwrap();
        let other = write_entry(tmp.path(), "notes.json", Duration::from_secs(48 * 3600));
        let wrong_ext = write_entry(tmp.path(), "stats_a.txt", Duration::from_secs(48 * 3600));

        let report = sweep(tmp.path(), DAY);
        assert_eq!(report.scanned, 0);
        assert!(other.exists());
        assert!(wrong_ext.exists());
    }

    #[test]
    fn boundary_age_is_kept() {
        let tmp = TempDir::new().unwrap();
        let path = write_entry(tmp.path(), "stats_edge.json", Duration::ZERO);
        let modified = fs::metadata(&path).unwrap().modified().unwrap();

        let report = sweep_at(tmp.path(), DAY, modified + DAY);
        assert_eq!(report.removed, 0);
        assert!(path.exists());

        let report = sweep_at(tmp.path(), DAY, modified + DAY + Duration::from_secs(1));
        assert_eq!(report.removed, 1);
        assert!(!path.exists());
    }

    #[test]
    fn future_mtime_is_kept() {
        let tmp = TempDir::new().unwrap();
        let path = write_entry(tmp.path(), "stats_skew.json", Duration::ZERO);
        let modified = fs::metadata(&path).unwrap().modified().unwrap();

        let report = sweep_at(tmp.path(), DAY, modified - Duration::from_secs(3600));
        assert_eq!(report.removed, 0);
        assert!(path.exists());
    }

    #[test]
    fn failing_entry_does_not_stop_sweep() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("stats_blocker.json");
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("inner"), "x").unwrap();
        // Directories cannot be opened for writing, so backdate read-only
        File::open(&blocker)
            .unwrap()
            .set_modified(SystemTime::now() - Duration::from_secs(30 * 3600))
            .unwrap();
        let old = write_entry(tmp.path(), "stats_zz.json", Duration::from_secs(30 * 3600));

        let report = sweep(tmp.path(), DAY);
        assert_eq!(
            report,
            SweepReport {
                scanned: 2,
                removed: 1,
                failed: 1
            }
        );
        assert!(blocker.exists());
        assert!(!old.exists());
    }

    #[test]
    fn sweep_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        write_entry(tmp.path(), "stats_a.json", Duration::from_secs(30 * 3600));
        write_entry(tmp.path(), "stats_b.json", Duration::from_secs(60));

        let first = sweep(tmp.path(), DAY);
        let second = sweep(tmp.path(), DAY);
        assert_eq!(first.removed, 1);
        assert_eq!(second.removed, 0);
        assert_eq!(second.scanned, 1);
        assert!(tmp.path().join("stats_b.json").exists());
    }

    #[test]
    fn missing_directory_is_noop() {
        let tmp = TempDir::new().unwrap();
        let report = sweep(&tmp.path().join("absent"), DAY);
        assert_eq!(report, SweepReport::default());
    }

    #[test]
    fn directory_with_glob_metacharacters() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("cache [1]");
        fs::create_dir_all(&dir).unwrap();
        let old = write_entry(&dir, "stats_x.json", Duration::from_secs(25 * 3600));

        let report = sweep(&dir, DAY);
        assert_eq!(report.removed, 1);
        assert!(!old.exists());
    }

    #[test]
    fn spawned_sweep_reports_back() {
        let tmp = TempDir::new().unwrap();
        let old = write_entry(tmp.path(), "stats_bg.json", Duration::from_secs(26 * 3600));

        let rx = spawn_sweep(tmp.path().to_path_buf(), DAY);
        let report = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(report.removed, 1);
        assert!(!old.exists());
    }
}
