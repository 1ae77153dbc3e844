//! Narrow seam over the `git` binary.

use std::path::PathBuf;
use std::process::Command;

use scout_core::{Result, ScoutError};

/// Runs git queries and returns their stdout as text.
///
/// Mining code only depends on this trait, so tests can substitute a scripted
/// fake instead of invoking a real git binary.
pub trait GitRunner {
    fn run(&self, args: &[&str]) -> Result<String>;
}

/// [`GitRunner`] that shells out to `git -C <repo>`.
#[derive(Debug, Clone)]
pub struct SystemGit {
    repo: PathBuf,
}

impl SystemGit {
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self { repo: repo.into() }
    }
}

impl GitRunner for SystemGit {
    fn run(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo)
            .args(args)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScoutError::Git(format!(
                "git {} failed: {}",
                args.join(" "),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
