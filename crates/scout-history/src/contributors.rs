//! Per-author contribution totals.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::runner::GitRunner;

/// Aggregate contribution figures for one author.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContributorStats {
    pub name: String,
    /// Empty when the author entry carries no email.
    pub email: String,
    pub commit_count: usize,
    pub files_touched: usize,
    pub lines_added: usize,
    pub lines_deleted: usize,
}

/// Mine per-author stats from `shortlog` plus per-author log queries.
///
/// Malformed shortlog rows are skipped. Per-author query failures leave that
/// author's file and line totals at zero rather than dropping the author.
pub fn contributor_stats(runner: &dyn GitRunner) -> Vec<ContributorStats> {
    let Ok(shortlog) = runner.run(&["shortlog", "-sne", "HEAD"]) else {
        return Vec::new();
    };

    let mut stats = Vec::new();
    for line in shortlog.lines() {
        let Some((commit_count, name, email)) = parse_shortlog_row(line) else {
            continue;
        };

        // git matches --author as a regex substring; the email is the
        // tighter key when shortlog gives us one
        let author_key = if email.is_empty() { &name } else { &email };
        let author_arg = format!("--author={author_key}");

        let files_touched = runner
            .run(&["log", &author_arg, "--name-only", "--format="])
            .map(|out| {
                out.lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .collect::<BTreeSet<_>>()
                    .len()
            })
            .unwrap_or(0);

        let (lines_added, lines_deleted) = runner
            .run(&["log", &author_arg, "--numstat", "--format="])
            .map(|out| tally_numstat(&out))
            .unwrap_or((0, 0));

        stats.push(ContributorStats {
            name,
            email,
            commit_count,
            files_touched,
            lines_added,
            lines_deleted,
        });
    }

    stats
}

/// Parse one `shortlog -sne` row: `<count>\t<name> [<email>]`.
fn parse_shortlog_row(line: &str) -> Option<(usize, String, String)> {
    let (count, identity) = line.trim().split_once('\t')?;
    let commit_count: usize = count.trim().parse().ok()?;

    let identity = identity.trim();
    match identity.rsplit_once(" <") {
        Some((name, email)) if email.ends_with('>') => Some((
            commit_count,
            name.trim().to_string(),
            email.trim_end_matches('>').to_string(),
        )),
        _ => Some((commit_count, identity.to_string(), String::new())),
    }
}

/// Sum `--numstat` rows. Binary markers (`-`) count as zero lines.
fn tally_numstat(log: &str) -> (usize, usize) {
    let mut added = 0;
    let mut deleted = 0;
    for line in log.lines() {
        let mut parts = line.split('\t');
        let (Some(a), Some(d), Some(_path)) = (parts.next(), parts.next(), parts.next()) else {
            continue;
        };
        added += a.trim().parse::<usize>().unwrap_or(0);
        deleted += d.trim().parse::<usize>().unwrap_or(0);
    }
    (added, deleted)
}
