//! File-level dependency graph and its derived queries.
//!
//! One node per analyzed file, one edge per resolved import. Degrees,
//! betweenness centrality, cycles, clusters, and depth queries all read the
//! completed graph; the graph is immutable after [`DependencyGraph::build`]
//! returns.

pub mod centrality;
pub mod clusters;
pub mod cycles;
pub mod resolve;

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::path::{Path, PathBuf};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use scout_core::Visibility;
use scout_extract::symbols::FileAnalysis;
use scout_extract::ENTRY_POINT_STEMS;

pub use clusters::DependencyCluster;

/// A file in the dependency graph.
///
/// Degree fields are populated by [`DependencyGraph::build`] and are only
/// meaningful on nodes obtained from a built graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModuleNode {
    pub path: PathBuf,
    /// Raw import strings, resolved or not.
    pub imports: Vec<String>,
    /// Names of the file's public symbols.
    pub exported_symbols: Vec<String>,
    /// Filename stem matches a conventional entry-point name.
    pub is_entry_point: bool,
    /// Distinct files this file imports (out-degree).
    pub dependency_count: usize,
    /// Distinct files importing this file (in-degree).
    pub dependent_count: usize,
}

/// Summary row for one cluster in the dependency report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSummary {
    pub name: String,
    pub module_count: usize,
}

/// Repository-wide dependency summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DependencyReport {
    pub total_modules: usize,
    pub core_modules: Vec<PathBuf>,
    pub entry_points: Vec<PathBuf>,
    pub leaf_modules_count: usize,
    pub circular_dependencies: usize,
    pub circular_dependency_chains: Vec<Vec<PathBuf>>,
    pub clusters: Vec<ClusterSummary>,
}

/// Directed graph of file dependencies built from import resolution.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use std::path::PathBuf;
/// use scout_extract::symbols::FileAnalysis;
/// use scout_graph::DependencyGraph;
///
/// let mut analyses = BTreeMap::new();
/// analyses.insert(
///     PathBuf::from("main.py"),
///     FileAnalysis {
///         path: PathBuf::from("main.py"),
///         language: "python".into(),
///         symbols: vec![],
///         imports: vec!["util".into()],
///         total_lines: 3,
///         code_lines: 2,
///     },
/// );
/// analyses.insert(
///     PathBuf::from("util.py"),
///     FileAnalysis {
///         path: PathBuf::from("util.py"),
///         language: "python".into(),
///         symbols: vec![],
///         imports: vec![],
///         total_lines: 5,
///         code_lines: 4,
///     },
/// );
///
/// let graph = DependencyGraph::build(&analyses);
/// let util = graph.node(&PathBuf::from("util.py")).unwrap();
/// assert_eq!(util.dependent_count, 1);
/// ```
pub struct DependencyGraph {
    graph: DiGraph<ModuleNode, ()>,
    path_to_index: HashMap<PathBuf, NodeIndex>,
    betweenness: HashMap<NodeIndex, f64>,
}

impl DependencyGraph {
    /// Build the graph from extraction output.
    ///
    /// First pass adds one node per file, second pass resolves imports into
    /// edges (deduplicated per source file), then degrees and centrality are
    /// computed. Unresolved imports are dropped without error.
    pub fn build(analyses: &BTreeMap<PathBuf, FileAnalysis>) -> Self {
        let mut graph = DiGraph::new();
        let mut path_to_index: HashMap<PathBuf, NodeIndex> = HashMap::new();
        let known: BTreeSet<PathBuf> = analyses.keys().cloned().collect();

        for (path, analysis) in analyses {
            let exported_symbols = analysis
                .symbols
                .iter()
                .filter(|s| s.visibility == Visibility::Public)
                .map(|s| s.name.clone())
                .collect();
            let idx = graph.add_node(ModuleNode {
                path: path.clone(),
                imports: analysis.imports.clone(),
                exported_symbols,
                is_entry_point: has_entry_stem(path),
                dependency_count: 0,
                dependent_count: 0,
            });
            path_to_index.insert(path.clone(), idx);
        }

        for (path, analysis) in analyses {
            let from = path_to_index[path];
            let mut targets: BTreeSet<PathBuf> = BTreeSet::new();
            for import in &analysis.imports {
                if let Some(resolved) = resolve::resolve_import(import, &known) {
                    targets.insert(resolved);
                }
            }
            for target in targets {
                graph.add_edge(from, path_to_index[&target], ());
            }
        }

        for idx in graph.node_indices() {
            let out = graph.neighbors_directed(idx, Direction::Outgoing).count();
            let inn = graph.neighbors_directed(idx, Direction::Incoming).count();
            let node = &mut graph[idx];
            node.dependency_count = out;
            node.dependent_count = inn;
        }

        let betweenness = centrality::betweenness(&graph);

        Self {
            graph,
            path_to_index,
            betweenness,
        }
    }

    pub fn node(&self, path: &Path) -> Option<&ModuleNode> {
        self.path_to_index.get(path).map(|&idx| &self.graph[idx])
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All nodes in insertion (path) order.
    pub fn modules(&self) -> impl Iterator<Item = &ModuleNode> {
        self.graph.node_weights()
    }

    /// Top `n` nodes by dependent count. Ties keep path order.
    pub fn core_modules(&self, n: usize) -> Vec<&ModuleNode> {
        let mut nodes: Vec<&ModuleNode> = self.graph.node_weights().collect();
        nodes.sort_by(|a, b| b.dependent_count.cmp(&a.dependent_count));
        nodes.truncate(n);
        nodes
    }

    /// Nodes no other file imports.
    pub fn leaf_modules(&self) -> Vec<&ModuleNode> {
        self.graph
            .node_weights()
            .filter(|node| node.dependent_count == 0)
            .collect()
    }

    /// Likely entry points: few dependencies, or a conventional entry stem.
    pub fn entry_points(&self) -> Vec<&ModuleNode> {
        let mut out: Vec<&ModuleNode> = self
            .graph
            .node_weights()
            .filter(|node| node.dependency_count <= 3)
            .collect();
        for node in self.graph.node_weights() {
            if node.is_entry_point && !out.iter().any(|n| n.path == node.path) {
                out.push(node);
            }
        }
        out
    }

    /// All simple cycles as path sequences, capped; empty when none exist.
    pub fn circular_dependencies(&self) -> Vec<Vec<PathBuf>> {
        cycles::simple_cycles(&self.graph)
            .into_iter()
            .map(|cycle| {
                cycle
                    .into_iter()
                    .map(|idx| self.graph[idx].path.clone())
                    .collect()
            })
            .collect()
    }

    /// Directory clusters with at least two member files.
    pub fn clusters(&self) -> Vec<DependencyCluster> {
        let files: Vec<PathBuf> = self
            .graph
            .node_weights()
            .map(|node| node.path.clone())
            .collect();
        let edges: Vec<(PathBuf, PathBuf)> = self
            .graph
            .edge_indices()
            .filter_map(|edge| self.graph.edge_endpoints(edge))
            .map(|(from, to)| (self.graph[from].path.clone(), self.graph[to].path.clone()))
            .collect();
        clusters::build_clusters(&files, &edges)
    }

    /// Longest shortest-path from `path` to any reachable node.
    ///
    /// 0 for unknown paths and for files with no outgoing edges.
    pub fn dependency_depth(&self, path: &Path) -> usize {
        let Some(&start) = self.path_to_index.get(path) else {
            return 0;
        };

        let mut distance: HashMap<NodeIndex, usize> = HashMap::new();
        distance.insert(start, 0);
        let mut queue = VecDeque::new();
        queue.push_back(start);
        let mut max_depth = 0;

        while let Some(current) = queue.pop_front() {
            let next_distance = distance[&current] + 1;
            for neighbor in self.graph.neighbors_directed(current, Direction::Outgoing) {
                if !distance.contains_key(&neighbor) {
                    distance.insert(neighbor, next_distance);
                    max_depth = max_depth.max(next_distance);
                    queue.push_back(neighbor);
                }
            }
        }

        max_depth
    }

    /// Importance on a 0-100 scale.
    ///
    /// `min(100, betweenness * 50 + min(dependent_count * 5, 50))`, falling
    /// back to `dependent_count * 10` when no centrality score is available.
    pub fn importance_score(&self, path: &Path) -> f64 {
        let Some(&idx) = self.path_to_index.get(path) else {
            return 0.0;
        };
        let dependents = self.graph[idx].dependent_count as f64;
        match self.betweenness.get(&idx) {
            Some(centrality) => {
                let score = centrality * 50.0 + (dependents * 5.0).min(50.0);
                score.min(100.0)
            }
            None => dependents * 10.0,
        }
    }

    /// Roll the graph up into a summary report.
    pub fn dependency_report(&self) -> DependencyReport {
        let chains = self.circular_dependencies();
        DependencyReport {
            total_modules: self.graph.node_count(),
            core_modules: self
                .core_modules(10)
                .into_iter()
                .map(|node| node.path.clone())
                .collect(),
            entry_points: self
                .entry_points()
                .into_iter()
                .map(|node| node.path.clone())
                .collect(),
            leaf_modules_count: self.leaf_modules().len(),
            circular_dependencies: chains.len(),
            circular_dependency_chains: chains.into_iter().take(5).collect(),
            clusters: self
                .clusters()
                .into_iter()
                .map(|cluster| ClusterSummary {
                    name: cluster.name,
                    module_count: cluster.modules.len(),
                })
                .collect(),
        }
    }
}

fn has_entry_stem(path: &Path) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| ENTRY_POINT_STEMS.contains(&stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(path: &str, imports: &[&str]) -> (PathBuf, FileAnalysis) {
        let path = PathBuf::from(path);
        let analysis = FileAnalysis {
            path: path.clone(),
            language: "python".to_string(),
            symbols: vec![],
            imports: imports.iter().map(|s| s.to_string()).collect(),
            total_lines: 10,
            code_lines: 8,
        };
        (path, analysis)
    }

    fn build(entries: &[(&str, &[&str])]) -> DependencyGraph {
        let analyses: BTreeMap<PathBuf, FileAnalysis> = entries
            .iter()
            .map(|(path, imports)| analysis(path, imports))
            .collect();
        DependencyGraph::build(&analyses)
    }

    #[test]
    fn resolved_import_becomes_one_edge() {
        let graph = build(&[("main.py", &["simple"]), ("simple.py", &[])]);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.node(Path::new("main.py")).unwrap().dependency_count, 1);
        assert_eq!(graph.node(Path::new("simple.py")).unwrap().dependent_count, 1);
    }

    #[test]
    fn duplicate_imports_are_one_edge() {
        let graph = build(&[("a.py", &["b", "b"]), ("b.py", &[])]);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.node(Path::new("a.py")).unwrap().dependency_count, 1);
    }

    #[test]
    fn unresolved_imports_add_nothing() {
        let graph = build(&[("a.py", &["os", "json"])]);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.node(Path::new("a.py")).unwrap().dependency_count, 0);
    }

    #[test]
    fn degree_sums_match_edge_count() {
        let graph = build(&[
            ("a.py", &["b", "c"]),
            ("b.py", &["c"]),
            ("c.py", &[]),
        ]);
        let out: usize = graph.modules().map(|n| n.dependency_count).sum();
        let inn: usize = graph.modules().map(|n| n.dependent_count).sum();
        assert_eq!(out, graph.edge_count());
        assert_eq!(inn, graph.edge_count());
    }

    #[test]
    fn core_modules_rank_by_dependents() {
        let graph = build(&[
            ("a.py", &["core"]),
            ("b.py", &["core"]),
            ("core.py", &[]),
        ]);
        let core = graph.core_modules(1);
        assert_eq!(core[0].path, PathBuf::from("core.py"));
    }

    #[test]
    fn edgeless_graph_keeps_path_order_for_core_modules() {
        let graph = build(&[("a.py", &[]), ("b.py", &[]), ("c.py", &[])]);
        let paths: Vec<_> = graph.core_modules(3).iter().map(|n| n.path.clone()).collect();
        assert_eq!(
            paths,
            vec![PathBuf::from("a.py"), PathBuf::from("b.py"), PathBuf::from("c.py")]
        );
    }

    #[test]
    fn entry_points_flag_conventional_stems() {
        let graph = build(&[("main.py", &[]), ("worker.py", &[])]);
        let entries = graph.entry_points();
        let main = entries.iter().find(|n| n.path.ends_with("main.py")).unwrap();
        assert!(main.is_entry_point);
    }

    #[test]
    fn cycle_is_reported_with_both_members() {
        let graph = build(&[("a.py", &["b"]), ("b.py", &["a"])]);
        let cycles = graph.circular_dependencies();
        assert_eq!(cycles.len(), 1);
        assert!(cycles[0].contains(&PathBuf::from("a.py")));
        assert!(cycles[0].contains(&PathBuf::from("b.py")));
    }

    #[test]
    fn depth_follows_the_longest_chain() {
        let graph = build(&[
            ("a.py", &["b"]),
            ("b.py", &["c"]),
            ("c.py", &[]),
        ]);
        assert_eq!(graph.dependency_depth(Path::new("a.py")), 2);
        assert_eq!(graph.dependency_depth(Path::new("c.py")), 0);
        assert_eq!(graph.dependency_depth(Path::new("missing.py")), 0);
    }

    #[test]
    fn importance_caps_at_100() {
        let mut entries: Vec<(String, Vec<&str>)> = Vec::new();
        for i in 0..30 {
            entries.push((format!("f{i:02}.py"), vec!["hub"]));
        }
        let mut analyses: BTreeMap<PathBuf, FileAnalysis> = entries
            .iter()
            .map(|(path, imports)| analysis(path, imports))
            .collect();
        let (hub_path, hub) = analysis("hub.py", &[]);
        analyses.insert(hub_path, hub);

        let graph = DependencyGraph::build(&analyses);
        let score = graph.importance_score(Path::new("hub.py"));
        assert!(score <= 100.0);
        assert!(score >= 50.0, "30 dependents saturate the dependent term");
    }

    #[test]
    fn report_counts_match_queries() {
        let graph = build(&[
            ("app/a.py", &["app.b"]),
            ("app/b.py", &["app.a"]),
            ("main.py", &["app.a"]),
        ]);
        let report = graph.dependency_report();
        assert_eq!(report.total_modules, 3);
        assert_eq!(report.circular_dependencies, 1);
        assert_eq!(report.circular_dependency_chains.len(), 1);
        assert_eq!(report.clusters.len(), 1);
        assert_eq!(report.clusters[0].name, "app");
        assert_eq!(report.clusters[0].module_count, 2);
    }
}
