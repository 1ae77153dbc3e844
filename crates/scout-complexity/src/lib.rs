//! Complexity measurement for Python sources.
//!
//! Walks a repository, scores every Python function's cyclomatic complexity,
//! attaches file-scoped maintainability and Halstead figures, and rolls the
//! results up into a [`ComplexityReport`]. Other languages are skipped
//! silently; the scoring heuristics are tuned for Python syntax.

pub mod halstead;
pub mod python;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use scout_core::{Classification, Result, RiskLevel};
use scout_extract::walker::{walk_repo, Language};

use halstead::{maintainability_index, tally};
use python::scan_functions;

/// Complexity figures for a single function.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityMetrics {
    pub name: String,
    pub file_path: PathBuf,
    pub line_start: usize,
    pub cyclomatic_complexity: u32,
    /// File-scoped maintainability index, shared by the file's functions.
    pub maintainability_index: f64,
    /// File-scoped Halstead difficulty, shared by the file's functions.
    pub halstead_difficulty: f64,
    pub classification: Classification,
}

/// Per-file rollup of function complexity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileComplexity {
    pub path: PathBuf,
    /// Mean cyclomatic complexity, 0.0 for files with no functions.
    pub average_complexity: f64,
    pub max_complexity: u32,
    pub maintainability_index: f64,
    pub functions: Vec<ComplexityMetrics>,
    pub risk_level: RiskLevel,
}

/// Repository-wide complexity summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityReport {
    pub total_files: usize,
    pub average_complexity: f64,
    pub high_risk_files: Vec<PathBuf>,
    pub simple_files: Vec<PathBuf>,
    pub complex_files: Vec<PathBuf>,
}

/// Scores every Python file under a repository root.
#[derive(Debug, Default)]
pub struct ComplexityAnalyzer {
    files: BTreeMap<PathBuf, FileComplexity>,
}

impl ComplexityAnalyzer {
    /// Walk `root` and score every Python file found.
    ///
    /// Files under `test`/`tests` directories are excluded so fixture-heavy
    /// suites do not drown out production hotspots.
    pub fn analyze(root: &Path) -> Result<Self> {
        let mut files = BTreeMap::new();

        for source in walk_repo(root)? {
            if source.language != Language::Python {
                continue;
            }
            if in_test_dir(&source.path) {
                continue;
            }
            let scored = score_file(&source.path, &source.content);
            files.insert(source.path, scored);
        }

        Ok(Self { files })
    }

    /// All scored files in path order.
    pub fn files(&self) -> impl Iterator<Item = &FileComplexity> {
        self.files.values()
    }

    /// Per-file results keyed by relative path.
    pub fn by_path(&self) -> &BTreeMap<PathBuf, FileComplexity> {
        &self.files
    }

    /// Files whose average complexity is at or below `threshold`, simplest
    /// first.
    pub fn simple_files(&self, threshold: f64) -> Vec<&FileComplexity> {
        let mut out: Vec<&FileComplexity> = self
            .files
            .values()
            .filter(|f| f.average_complexity <= threshold)
            .collect();
        out.sort_by(|a, b| {
            a.average_complexity
                .partial_cmp(&b.average_complexity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        out
    }

    /// Files whose average complexity is at or above `threshold`, most
    /// complex first.
    pub fn complex_files(&self, threshold: f64) -> Vec<&FileComplexity> {
        let mut out: Vec<&FileComplexity> = self
            .files
            .values()
            .filter(|f| f.average_complexity >= threshold)
            .collect();
        out.sort_by(|a, b| {
            b.average_complexity
                .partial_cmp(&a.average_complexity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        out
    }

    /// Roll the per-file figures up into a repository summary.
    pub fn report(&self) -> ComplexityReport {
        let total_files = self.files.len();

        // Mean of per-file averages, so a function-heavy file counts once
        let average_complexity = if total_files == 0 {
            0.0
        } else {
            self.files
                .values()
                .map(|f| f.average_complexity)
                .sum::<f64>()
                / total_files as f64
        };

        let high_risk_files = self
            .files
            .values()
            .filter(|f| f.risk_level == RiskLevel::High)
            .map(|f| f.path.clone())
            .collect();

        let simple_files = self
            .simple_files(f64::from(Classification::SIMPLE))
            .into_iter()
            .take(10)
            .map(|f| f.path.clone())
            .collect();

        let complex_files = self
            .complex_files(15.0)
            .into_iter()
            .take(10)
            .map(|f| f.path.clone())
            .collect();

        ComplexityReport {
            total_files,
            average_complexity,
            high_risk_files,
            simple_files,
            complex_files,
        }
    }
}

/// Score one Python file.
pub fn score_file(path: &Path, content: &str) -> FileComplexity {
    let scanned = scan_functions(content);
    let metrics = tally(content);
    let halstead_difficulty = metrics.difficulty();

    let total_complexity: u32 = scanned.iter().map(|f| f.complexity).sum();
    let sloc = content.lines().filter(|l| !l.trim().is_empty()).count();
    let mi = maintainability_index(metrics.volume(), total_complexity.max(1), sloc);

    let functions: Vec<ComplexityMetrics> = scanned
        .into_iter()
        .map(|f| ComplexityMetrics {
            name: f.name,
            file_path: path.to_path_buf(),
            line_start: f.line,
            cyclomatic_complexity: f.complexity,
            maintainability_index: mi,
            halstead_difficulty,
            classification: Classification::from_complexity(f.complexity),
        })
        .collect();

    let average_complexity = if functions.is_empty() {
        0.0
    } else {
        functions
            .iter()
            .map(|m| f64::from(m.cyclomatic_complexity))
            .sum::<f64>()
            / functions.len() as f64
    };
    let max_complexity = functions
        .iter()
        .map(|m| m.cyclomatic_complexity)
        .max()
        .unwrap_or(0);

    FileComplexity {
        path: path.to_path_buf(),
        average_complexity,
        max_complexity,
        maintainability_index: mi,
        risk_level: RiskLevel::determine(average_complexity, mi),
        functions,
    }
}

fn in_test_dir(path: &Path) -> bool {
    path.iter()
        .any(|part| part == "test" || part == "tests")
}
