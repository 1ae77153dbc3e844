//! Core-module ranking fused from graph and history signals.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use scout_extract::symbols::FileAnalysis;
use scout_graph::DependencyGraph;
use scout_history::FileHistory;

/// One ranked core module.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoreModuleRow {
    pub path: PathBuf,
    pub dependent_count: usize,
    pub importance: f64,
    /// Commits touching the file; 0 when history is unavailable.
    pub churn: usize,
    /// Distinct authors; 0 when history is unavailable.
    pub authors: usize,
    pub core_score: f64,
}

/// Rank core-module candidates by the fused core score, highest first.
///
/// The score weighs importance 40%, dependents 30%, churn 20% and author
/// count 10%, with churn and author terms capped so one signal cannot
/// dominate. Files absent from `hotspots` score their history terms as zero.
/// `candidates` bounds how many modules are pulled from the graph before
/// fusion.
pub fn core_module_rows(
    graph: &DependencyGraph,
    hotspots: &[FileHistory],
    candidates: usize,
) -> Vec<CoreModuleRow> {
    let by_path: BTreeMap<&PathBuf, &FileHistory> =
        hotspots.iter().map(|h| (&h.path, h)).collect();

    let mut rows: Vec<CoreModuleRow> = graph
        .core_modules(candidates)
        .into_iter()
        .map(|module| {
            let importance = graph.importance_score(&module.path);
            let (churn, authors) = by_path
                .get(&module.path)
                .map(|h| (h.commit_count, h.authors.len()))
                .unwrap_or((0, 0));

            let core_score = importance * 0.4
                + module.dependent_count as f64 * 3.0 * 0.3
                + (churn as f64 * 2.0).min(50.0) * 0.2
                + (authors as f64 * 5.0).min(50.0) * 0.1;

            CoreModuleRow {
                path: module.path.clone(),
                dependent_count: module.dependent_count,
                importance,
                churn,
                authors,
                core_score,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.core_score.partial_cmp(&a.core_score).unwrap_or(std::cmp::Ordering::Equal));
    rows
}

/// Render the core-modules analysis as markdown.
pub fn core_modules_report(
    analyses: &BTreeMap<PathBuf, FileAnalysis>,
    graph: &DependencyGraph,
    hotspots: &[FileHistory],
    candidates: usize,
) -> String {
    let rows = core_module_rows(graph, hotspots, candidates);
    let entry_points = graph.entry_points();
    let clusters = graph.clusters();

    let mut out = String::from("**Core Modules Analysis**\n\n");
    out.push_str("These are the most important modules to understand:\n\n");

    for (i, row) in rows.iter().take(10).enumerate() {
        let _ = writeln!(out, "{}. **{}**", i + 1, row.path.display());
        let _ = writeln!(out, "   - Core Score: {:.1}/100", row.core_score);
        let _ = writeln!(out, "   - Used by {} other modules", row.dependent_count);
        let _ = writeln!(out, "   - Importance: {:.1}/100", row.importance);
        if row.churn > 0 {
            let _ = writeln!(out, "   - Modified {} times", row.churn);
        }
        if row.authors > 0 {
            let _ = writeln!(out, "   - Worked on by {} developers", row.authors);
        }
        if row.core_score > 70.0 {
            out.push_str("   - 🌟 **Critical**: Essential for understanding the codebase\n");
        } else if row.core_score > 50.0 {
            out.push_str("   - ⭐ **Important**: Key module with significant dependencies\n");
        }
        out.push('\n');
    }

    if !entry_points.is_empty() {
        out.push_str("\n**Entry Points** (good starting points):\n");
        for node in entry_points.iter().take(5) {
            let _ = writeln!(out, "  - {}", node.path.display());
        }
    }

    if !clusters.is_empty() {
        out.push_str("\n**Module Clusters** (related modules):\n");
        for cluster in clusters.iter().take(5) {
            let _ = writeln!(out, "  - **{}**: {} modules", cluster.name, cluster.modules.len());
        }
    }

    out.push_str("\n**Summary:**\n");
    let _ = writeln!(out, "- Total modules analyzed: {}", analyses.len());
    let _ = writeln!(out, "- Core modules identified: {}", rows.len());
    let _ = writeln!(out, "- Entry points found: {}", entry_points.len());
    let _ = writeln!(out, "- Module clusters: {}", clusters.len());

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs;
    use tempfile::TempDir;

    fn history(path: &str, commits: usize, authors: &[&str]) -> FileHistory {
        FileHistory {
            path: PathBuf::from(path),
            commit_count: commits,
            authors: authors.iter().map(|a| a.to_string()).collect::<BTreeSet<_>>(),
            last_modified: 1_700_000_000,
            creation_date: 1_600_000_000,
        }
    }

    fn fixture() -> (TempDir, BTreeMap<PathBuf, FileAnalysis>, DependencyGraph) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("core.py"), "def api():\n    return 1\n").unwrap();
        fs::write(dir.path().join("a.py"), "import core\n").unwrap();
        fs::write(dir.path().join("b.py"), "import core\n").unwrap();

        let analyses = scout_extract::analyze_repository(dir.path()).unwrap();
        let graph = DependencyGraph::build(&analyses);
        (dir, analyses, graph)
    }

    #[test]
    fn history_raises_a_module_in_the_ranking() {
        let (_dir, _analyses, graph) = fixture();
        let quiet = core_module_rows(&graph, &[], 15);
        let churned = core_module_rows(
            &graph,
            &[history("core.py", 12, &["Ada", "Grace"])],
            15,
        );

        let score_of = |rows: &[CoreModuleRow]| {
            rows.iter()
                .find(|r| r.path == PathBuf::from("core.py"))
                .map(|r| r.core_score)
                .unwrap()
        };
        assert!(score_of(&churned) > score_of(&quiet));
    }

    #[test]
    fn missing_history_means_zero_churn() {
        let (_dir, _analyses, graph) = fixture();
        let rows = core_module_rows(&graph, &[], 15);
        assert!(rows.iter().all(|r| r.churn == 0 && r.authors == 0));
    }

    #[test]
    fn most_depended_on_module_ranks_first() {
        let (_dir, _analyses, graph) = fixture();
        let rows = core_module_rows(&graph, &[], 15);
        assert_eq!(rows[0].path, PathBuf::from("core.py"));
        assert_eq!(rows[0].dependent_count, 2);
    }

    #[test]
    fn report_contains_all_sections() {
        let (_dir, analyses, graph) = fixture();
        let out = core_modules_report(&analyses, &graph, &[history("core.py", 3, &["Ada"])], 15);
        assert!(out.contains("**Core Modules Analysis**"));
        assert!(out.contains("Modified 3 times"));
        assert!(out.contains("**Entry Points**"));
        assert!(out.contains("Total modules analyzed: 3"));
    }
}
