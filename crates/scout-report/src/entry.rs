//! Entry-point suggestions for a described development task.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use scout_extract::symbols::FileAnalysis;
use scout_graph::DependencyGraph;

use crate::keywords::extract_keywords;

/// A suggested file to start a task from, with the reasons it matched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntrySuggestion {
    pub file: PathBuf,
    pub score: f64,
    pub reasons: Vec<String>,
}

/// Score every file against the task keywords, best match first.
///
/// A keyword in the file path scores 10, in a symbol name 5; files that match
/// at all also pick up a tenth of their graph importance.
pub fn entry_suggestions(
    task: &str,
    analyses: &BTreeMap<PathBuf, FileAnalysis>,
    graph: &DependencyGraph,
) -> Vec<EntrySuggestion> {
    let keywords = extract_keywords(task);
    let mut suggestions = Vec::new();

    for (path, analysis) in analyses {
        let mut score = 0.0;
        let mut reasons = Vec::new();
        let path_lower = path.to_string_lossy().to_lowercase();

        for keyword in &keywords {
            if path_lower.contains(keyword.as_str()) {
                score += 10.0;
                reasons.push(format!("File name contains '{keyword}'"));
            }
        }

        for symbol in &analysis.symbols {
            let name_lower = symbol.name.to_lowercase();
            for keyword in &keywords {
                if name_lower.contains(keyword.as_str()) {
                    score += 5.0;
                    reasons.push(format!("Contains symbol '{}'", symbol.name));
                }
            }
        }

        if score > 0.0 {
            if let Some(node) = graph.node(path) {
                let importance = graph.importance_score(path);
                score += importance * 0.1;
                reasons.push(format!(
                    "Importance score: {importance:.1}, Dependencies: {}, Dependents: {}",
                    node.dependency_count, node.dependent_count
                ));
            }
            suggestions.push(EntrySuggestion {
                file: path.clone(),
                score,
                reasons,
            });
        }
    }

    suggestions.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    suggestions
}

/// Render the top suggestions for `task` as markdown.
///
/// When nothing matches, falls back to the graph's entry points and core
/// modules so the caller always gets somewhere to start.
pub fn suggest_entry_points(
    task: &str,
    analyses: &BTreeMap<PathBuf, FileAnalysis>,
    graph: &DependencyGraph,
) -> String {
    let suggestions = entry_suggestions(task, analyses, graph);

    if suggestions.is_empty() {
        let mut out =
            String::from("No direct matches found. Here are some general suggestions:\n\n");
        out.push_str("**Entry Points:**\n");
        for node in graph.entry_points().into_iter().take(5) {
            let _ = writeln!(out, "  - {}", node.path.display());
        }
        out.push_str("\n**Core Modules:**\n");
        for node in graph.core_modules(5) {
            let _ = writeln!(
                out,
                "  - {} (used by {} modules)",
                node.path.display(),
                node.dependent_count
            );
        }
        return out;
    }

    let mut out = String::new();
    let _ = writeln!(out, "**Entry points for: '{task}'**\n");
    for (i, suggestion) in suggestions.iter().take(5).enumerate() {
        let _ = writeln!(out, "{}. **{}**", i + 1, suggestion.file.display());
        for reason in suggestion.reasons.iter().take(3) {
            let _ = writeln!(out, "   - {reason}");
        }
        out.push('\n');
    }

    out
}
