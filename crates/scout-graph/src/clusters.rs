//! Directory-level clustering of the module graph.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Cluster key for files that sit directly at the repository root.
pub const ROOT_CLUSTER: &str = "root";

/// A group of modules sharing one parent directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DependencyCluster {
    /// Parent directory, or [`ROOT_CLUSTER`] for top-level files.
    pub name: String,
    pub modules: Vec<PathBuf>,
    /// Edges with both endpoints inside the cluster.
    pub internal_dependencies: usize,
    /// Distinct edge targets outside the cluster.
    pub external_dependencies: usize,
}

/// Name of the cluster a file belongs to.
pub fn cluster_key(path: &Path) -> String {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_string_lossy().into_owned(),
        _ => ROOT_CLUSTER.to_string(),
    }
}

/// Group files by parent directory and split their edges into internal and
/// external counts. Directories with fewer than two member files are dropped.
pub fn build_clusters(
    files: &[PathBuf],
    edges: &[(PathBuf, PathBuf)],
) -> Vec<DependencyCluster> {
    let mut groups: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for file in files {
        groups.entry(cluster_key(file)).or_default().push(file.clone());
    }
    groups.retain(|_, members| members.len() >= 2);

    groups
        .into_iter()
        .map(|(name, modules)| {
            let members: BTreeSet<&PathBuf> = modules.iter().collect();
            let mut internal = 0;
            let mut external_targets: BTreeSet<&PathBuf> = BTreeSet::new();
            for (from, to) in edges {
                if !members.contains(from) {
                    continue;
                }
                if members.contains(to) {
                    internal += 1;
                } else {
                    external_targets.insert(to);
                }
            }
            DependencyCluster {
                name,
                modules,
                internal_dependencies: internal,
                external_dependencies: external_targets.len(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(items: &[&str]) -> Vec<PathBuf> {
        items.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn top_level_files_form_the_root_cluster() {
        assert_eq!(cluster_key(Path::new("main.py")), "root");
        assert_eq!(cluster_key(Path::new("app/models.py")), "app");
        assert_eq!(cluster_key(Path::new("app/api/routes.py")), "app/api");
    }

    #[test]
    fn singleton_directories_are_dropped() {
        let files = paths(&["app/a.py", "app/b.py", "lib/only.py"]);
        let clusters = build_clusters(&files, &[]);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].name, "app");
        assert_eq!(clusters[0].modules.len(), 2);
    }

    #[test]
    fn edges_split_into_internal_and_external() {
        let files = paths(&["app/a.py", "app/b.py", "lib/x.py", "lib/y.py"]);
        let edges = vec![
            (PathBuf::from("app/a.py"), PathBuf::from("app/b.py")),
            (PathBuf::from("app/a.py"), PathBuf::from("lib/x.py")),
            (PathBuf::from("app/b.py"), PathBuf::from("lib/x.py")),
        ];
        let clusters = build_clusters(&files, &edges);
        let app = clusters.iter().find(|c| c.name == "app").unwrap();
        assert_eq!(app.internal_dependencies, 1);
        // Both edges out of "app" hit the same target
        assert_eq!(app.external_dependencies, 1);
    }
}
