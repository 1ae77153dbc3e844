//! Per-file commit history and repository activity queries.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use scout_core::{Result, ScoutError};

use crate::contributors::{self, ContributorStats};
use crate::runner::{GitRunner, SystemGit};

/// A repository is "actively maintained" if it saw a commit this recently.
const ACTIVE_WINDOW_DAYS: u64 = 90;

/// Commit history of one tracked file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileHistory {
    pub path: PathBuf,
    /// Commits touching the file; doubles as the churn score.
    pub commit_count: usize,
    pub authors: BTreeSet<String>,
    /// Epoch seconds of the newest commit touching the file.
    pub last_modified: i64,
    /// Epoch seconds of the commit that added the file, or `last_modified`
    /// when no add commit is visible (renames, shallow history).
    pub creation_date: i64,
}

/// Mines commit history through a [`GitRunner`].
///
/// Construction validates the repository; every query after that degrades to
/// an empty or zero result instead of failing.
pub struct HistoryMiner {
    runner: Box<dyn GitRunner>,
}

// The boxed runner has no useful Debug form of its own
impl std::fmt::Debug for HistoryMiner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryMiner").finish_non_exhaustive()
    }
}

impl HistoryMiner {
    /// Open a repository on disk, validating that it exists and has a `.git`.
    pub fn open(repo: &Path) -> Result<Self> {
        if !repo.exists() {
            return Err(ScoutError::Config(format!(
                "repository path does not exist: {}",
                repo.display()
            )));
        }
        if !repo.join(".git").exists() {
            return Err(ScoutError::Config(format!(
                "not a git repository: {}",
                repo.display()
            )));
        }
        Ok(Self {
            runner: Box::new(SystemGit::new(repo)),
        })
    }

    /// Build a miner over any runner. Used by tests with a scripted fake.
    pub fn with_runner(runner: Box<dyn GitRunner>) -> Self {
        Self { runner }
    }

    /// History of one file, or `None` when no commit touches it.
    pub fn file_history(&self, path: &Path) -> Option<FileHistory> {
        let spec = path.to_string_lossy();

        let commit_count = self
            .runner
            .run(&["rev-list", "--count", "HEAD", "--", &spec])
            .ok()
            .and_then(|out| out.trim().parse::<usize>().ok())?;
        if commit_count == 0 {
            return None;
        }

        let authors: BTreeSet<String> = self
            .runner
            .run(&["log", "--format=%an", "--", &spec])
            .map(|out| {
                out.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let last_modified = self
            .runner
            .run(&["log", "-1", "--format=%ct", "--", &spec])
            .ok()
            .and_then(|out| out.trim().parse::<i64>().ok())
            .unwrap_or(0);

        // Oldest add commit is the last line of the filtered log
        let creation_date = self
            .runner
            .run(&["log", "--diff-filter=A", "--format=%ct", "--", &spec])
            .ok()
            .and_then(|out| out.lines().rev().find_map(|line| line.trim().parse().ok()))
            .unwrap_or(last_modified);

        Some(FileHistory {
            path: path.to_path_buf(),
            commit_count,
            authors,
            last_modified,
            creation_date,
        })
    }

    /// Tracked files with history, most-changed first, top `limit`.
    pub fn hotspots(&self, limit: usize) -> Vec<FileHistory> {
        let Ok(listing) = self.runner.run(&["ls-files"]) else {
            return Vec::new();
        };

        let mut histories: Vec<FileHistory> = listing
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(|line| self.file_history(Path::new(line)))
            .collect();
        histories.sort_by(|a, b| b.commit_count.cmp(&a.commit_count));
        histories.truncate(limit);
        histories
    }

    /// Per-file commit counts within the last `days` days.
    pub fn recent_activity(&self, days: u64) -> BTreeMap<PathBuf, usize> {
        let since = format!("--since={days}.days.ago");
        let Ok(log) = self.runner.run(&["log", &since, "--name-only", "--format="]) else {
            return BTreeMap::new();
        };

        let mut counts = BTreeMap::new();
        for line in log.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            *counts.entry(PathBuf::from(line)).or_insert(0) += 1;
        }
        counts
    }

    /// Whether any commit landed within the last 90 days.
    pub fn is_actively_maintained(&self) -> bool {
        let since = format!("--since={ACTIVE_WINDOW_DAYS}.days.ago");
        self.runner
            .run(&["rev-list", "--count", &since, "HEAD"])
            .ok()
            .and_then(|out| out.trim().parse::<usize>().ok())
            .map(|count| count > 0)
            .unwrap_or(false)
    }

    /// Commits reachable from HEAD, 0 on failure.
    pub fn total_commits(&self) -> usize {
        self.runner
            .run(&["rev-list", "--count", "HEAD"])
            .ok()
            .and_then(|out| out.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Local branch count, 0 on failure.
    pub fn branch_count(&self) -> usize {
        self.runner
            .run(&["branch", "--list"])
            .map(|out| out.lines().filter(|line| !line.trim().is_empty()).count())
            .unwrap_or(0)
    }

    /// Per-author commit and line totals, empty on failure.
    pub fn contributor_stats(&self) -> Vec<ContributorStats> {
        contributors::contributor_stats(self.runner.as_ref())
    }
}
