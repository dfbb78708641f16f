//! Git metadata for the workspace line
//!
//! Collected once per invocation by shelling out to `git`. Every failure
//! degrades to a sentinel branch name and zero stats.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::consts::{NO_GIT, UNKNOWN};
use crate::core::LineCounts;
use crate::error::GitError;
use crate::utils::debug_log;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GitContext {
    pub(crate) branch: String,
    /// Uncommitted changes against HEAD
    pub(crate) stats: LineCounts,
}

impl GitContext {
    fn fallback(branch: &str) -> Self {
        Self {
            branch: branch.to_string(),
            stats: LineCounts::default(),
        }
    }

    pub(crate) fn unknown() -> Self {
        Self::fallback(UNKNOWN)
    }

    pub(crate) fn collect(dir: &Path) -> Self {
        if !dir.is_dir() {
            debug_log!("Workspace {} is not a directory", dir.display());
            return Self::unknown();
        }
        if !dir.join(".git").exists() {
            return Self::fallback(NO_GIT);
        }
        if let Err(e) = run_git(dir, &["status", "--porcelain"]) {
            debug_log!("{e}");
            return Self::unknown();
        }

        let branch = resolve_branch(dir);
        let stats = match run_git(dir, &["diff", "--numstat", "HEAD"]) {
            Ok(output) => parse_numstat(&output),
            Err(e) => {
                debug_log!("{e}");
                LineCounts::default()
            }
        };
        Self { branch, stats }
    }
}

fn run_git(dir: &Path, args: &[&str]) -> Result<String, GitError> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .map_err(GitError::Spawn)?;
    if !output.status.success() {
        return Err(GitError::Status {
            args: args.join(" "),
            status: output.status.to_string(),
        });
    }
    String::from_utf8(output.stdout).map_err(GitError::Utf8)
}

/// Branch name, or the short commit hash when HEAD is detached
fn resolve_branch(dir: &Path) -> String {
    let name = match run_git(dir, &["rev-parse", "--abbrev-ref", "HEAD"]) {
        Ok(name) => name.trim().to_string(),
        Err(e) => {
            debug_log!("{e}");
            return UNKNOWN.to_string();
        }
    };
    if !name.is_empty() && name != "HEAD" {
        return name;
    }
    match run_git(dir, &["rev-parse", "--short", "HEAD"]) {
        Ok(commit) if !commit.trim().is_empty() => commit.trim().to_string(),
        _ => UNKNOWN.to_string(),
    }
}

/// Sum the added/removed columns of `git diff --numstat`.
/// Binary files report `-` and count as 0.
pub(crate) fn parse_numstat(output: &str) -> LineCounts {
    let mut totals = LineCounts::default();
    for line in output.lines().filter(|l| !l.trim().is_empty()) {
        let mut parts = line.split('\t');
        let (Some(added), Some(removed)) = (parts.next(), parts.next()) else {
            continue;
        };
        totals.added += added.trim().parse::<i64>().unwrap_or(0);
        totals.removed += removed.trim().parse::<i64>().unwrap_or(0);
    }
    totals
}
