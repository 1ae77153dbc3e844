//! Git history mining: churn, authorship, and contributor stats.
//!
//! All queries run through the narrow [`runner::GitRunner`] seam over the
//! `git` binary, so history mining never links a VCS library and tests can
//! script every query. Construction validates the repository; after that,
//! every failed query degrades to an empty or zero result.

pub mod contributors;
pub mod history;
pub mod runner;

pub use contributors::ContributorStats;
pub use history::{FileHistory, HistoryMiner};
pub use runner::{GitRunner, SystemGit};
