//! Progressive learning paths through one area of a codebase.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use scout_complexity::ComplexityAnalyzer;
use scout_core::RiskLevel;
use scout_extract::symbols::FileAnalysis;
use scout_graph::DependencyGraph;

use crate::keywords::extract_keywords;

/// One step of a learning path, ordered simplest first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LearningStep {
    pub path: PathBuf,
    pub complexity: f64,
    pub dependencies: usize,
    pub depth: usize,
    /// Learning-order score; lower means study earlier.
    pub score: f64,
    pub risk_level: Option<RiskLevel>,
}

/// Files relevant to `area`, sorted ascending by learning-order score.
///
/// Relevance is a substring match of any area keyword against the file path.
/// The score is `avg_complexity * 2 + dependency_count * 3 + depth * 5`.
pub fn learning_steps(
    area: &str,
    analyses: &BTreeMap<PathBuf, FileAnalysis>,
    graph: &DependencyGraph,
    complexity: &ComplexityAnalyzer,
) -> Vec<LearningStep> {
    let keywords = extract_keywords(area);

    let mut steps: Vec<LearningStep> = analyses
        .keys()
        .filter(|path| {
            let path_lower = path.to_string_lossy().to_lowercase();
            keywords.iter().any(|kw| path_lower.contains(kw.as_str()))
        })
        .map(|path| {
            let scored = complexity.by_path().get(path);
            let avg_complexity = scored.map(|f| f.average_complexity).unwrap_or(0.0);
            let dependencies = graph.node(path).map(|n| n.dependency_count).unwrap_or(0);
            let depth = graph.dependency_depth(path);

            LearningStep {
                path: path.clone(),
                complexity: avg_complexity,
                dependencies,
                depth,
                score: avg_complexity * 2.0 + dependencies as f64 * 3.0 + depth as f64 * 5.0,
                risk_level: scored.map(|f| f.risk_level),
            }
        })
        .collect();

    steps.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal));
    steps
}

/// Render the learning path for `area` as markdown.
pub fn learning_path(
    area: &str,
    analyses: &BTreeMap<PathBuf, FileAnalysis>,
    graph: &DependencyGraph,
    complexity: &ComplexityAnalyzer,
) -> String {
    let steps = learning_steps(area, analyses, graph, complexity);

    if steps.is_empty() {
        return format!("No files found related to '{area}'. Try a broader search term.\n");
    }

    let mut out = String::new();
    let _ = writeln!(out, "**Learning Path for: '{area}'**\n");
    out.push_str("Study these files in order (simple -> complex):\n\n");

    for (i, step) in steps.iter().enumerate() {
        let rank = i + 1;
        let _ = writeln!(out, "{rank}. **{}**", step.path.display());
        let _ = writeln!(out, "   - Difficulty: {}", difficulty_label(step.complexity));
        let _ = writeln!(out, "   - Complexity: {:.1}", step.complexity);
        let _ = writeln!(out, "   - Dependencies: {}", step.dependencies);
        let _ = writeln!(out, "   - Dependency Depth: {}", step.depth);

        if rank == 1 {
            out.push_str("   - 💡 **Start here!** This is the simplest file in this area.\n");
        } else if step.complexity > 15.0 {
            out.push_str(
                "   - ⚠️ This file is complex. Make sure you understand the simpler files first.\n",
            );
        }
        out.push('\n');
    }

    out.push_str("\n**Learning Tips:**\n");
    out.push_str("- Start with the files at the top of the list\n");
    out.push_str("- Understand each file's purpose before moving to the next\n");
    out.push_str("- Pay attention to how files depend on each other\n");
    let _ = writeln!(out, "- Total files to review: {}", steps.len());

    out
}

fn difficulty_label(complexity: f64) -> &'static str {
    if complexity <= 5.0 {
        "Beginner 🟢"
    } else if complexity <= 10.0 {
        "Intermediate 🟡"
    } else if complexity <= 20.0 {
        "Advanced 🟠"
    } else {
        "Expert 🔴"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, BTreeMap<PathBuf, FileAnalysis>, DependencyGraph, ComplexityAnalyzer)
    {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("auth_simple.py"),
            "def check():\n    return True\n",
        )
        .unwrap();
        let mut branchy = String::from("import auth_simple\n\ndef login(user):\n");
        for i in 0..8 {
            branchy.push_str(&format!("    if user == {i}:\n        return {i}\n"));
        }
        fs::write(dir.path().join("auth_flow.py"), branchy).unwrap();
        fs::write(dir.path().join("billing.py"), "def bill():\n    return 0\n").unwrap();

        let analyses = scout_extract::analyze_repository(dir.path()).unwrap();
        let graph = DependencyGraph::build(&analyses);
        let complexity = ComplexityAnalyzer::analyze(dir.path()).unwrap();
        (dir, analyses, graph, complexity)
    }

    #[test]
    fn steps_match_only_relevant_files() {
        let (_dir, analyses, graph, complexity) = fixture();
        let steps = learning_steps("auth", &analyses, &graph, &complexity);
        assert_eq!(steps.len(), 2);
        assert!(steps.iter().all(|s| s.path.to_string_lossy().contains("auth")));
    }

    #[test]
    fn simplest_file_comes_first() {
        let (_dir, analyses, graph, complexity) = fixture();
        let steps = learning_steps("auth", &analyses, &graph, &complexity);
        assert_eq!(steps[0].path, PathBuf::from("auth_simple.py"));
        assert!(steps[0].score < steps[1].score);
    }

    #[test]
    fn rendered_path_marks_the_starting_file() {
        let (_dir, analyses, graph, complexity) = fixture();
        let path = learning_path("auth", &analyses, &graph, &complexity);
        assert!(path.contains("Learning Path for: 'auth'"));
        assert!(path.contains("Start here!"));
        assert!(path.contains("Total files to review: 2"));
    }

    #[test]
    fn unmatched_area_suggests_broadening() {
        let (_dir, analyses, graph, complexity) = fixture();
        let path = learning_path("networking", &analyses, &graph, &complexity);
        assert!(path.contains("No files found related to 'networking'"));
    }
}
