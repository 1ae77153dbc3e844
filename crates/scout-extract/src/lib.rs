//! Heuristic symbol and import extraction over a repository tree.
//!
//! Walks all files in a fixed extension table, applies per-language
//! line-pattern extraction (intentionally approximate, not a grammar-aware
//! parse), and produces a map of file path to [`symbols::FileAnalysis`]. Uses
//! the `ignore` crate for walking.

pub mod symbols;
pub mod walker;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use scout_core::ScoutError;

use symbols::FileAnalysis;

/// File-name stems that conventionally mark entry points.
pub const ENTRY_POINT_STEMS: &[&str] = &["main", "app", "index", "server", "run", "cli"];

/// Extract symbols and imports for every recognized source file under `root`.
///
/// Files that cannot be decoded or whose extension is unrecognized are
/// silently omitted. The result is keyed by repo-relative path; `BTreeMap`
/// keeps enumeration order stable across runs.
///
/// # Errors
///
/// Returns [`ScoutError::Config`] if `root` does not exist.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use scout_extract::analyze_repository;
///
/// let analyses = analyze_repository(Path::new(".")).unwrap();
/// for (path, analysis) in &analyses {
///     println!("{}: {} symbols", path.display(), analysis.symbols.len());
/// }
/// ```
pub fn analyze_repository(root: &Path) -> Result<BTreeMap<PathBuf, FileAnalysis>, ScoutError> {
    let files = walker::walk_repo(root)?;

    let mut results = BTreeMap::new();
    for file in &files {
        let analysis = symbols::analyze_source(&file.path, file.language, &file.content);
        results.insert(file.path.clone(), analysis);
    }

    Ok(results)
}

/// Find files whose name conventionally marks an entry point (`main.py`,
/// `index.ts`, `server.js`, ...), skipping test directories.
///
/// # Errors
///
/// Returns [`ScoutError::Config`] if `root` does not exist.
pub fn entry_point_files(root: &Path) -> Result<Vec<PathBuf>, ScoutError> {
    let files = walker::walk_repo(root)?;

    let mut entry_points = Vec::new();
    for file in &files {
        let stem = match file.path.file_stem().and_then(|s| s.to_str()) {
            Some(s) => s,
            None => continue,
        };
        if !ENTRY_POINT_STEMS.contains(&stem) && stem != "__main__" {
            continue;
        }
        let in_test_dir = file.path.components().any(|c| {
            matches!(c.as_os_str().to_str(), Some("test") | Some("tests"))
        });
        if !in_test_dir {
            entry_points.push(file.path.clone());
        }
    }

    Ok(entry_points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn repository_analysis_maps_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("pkg")).unwrap();
        fs::write(root.join("pkg/util.py"), "def helper():\n    pass\n").unwrap();
        fs::write(root.join("main.py"), "import pkg.util\n").unwrap();

        let analyses = analyze_repository(root).unwrap();
        assert_eq!(analyses.len(), 2);

        let util = &analyses[&PathBuf::from("pkg/util.py")];
        assert_eq!(util.symbols.len(), 1);
        assert_eq!(util.symbols[0].name, "helper");

        let main = &analyses[&PathBuf::from("main.py")];
        assert_eq!(main.imports, vec!["pkg.util"]);
    }

    #[test]
    fn unreadable_files_are_omitted_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("good.py"), "def ok(): pass\n").unwrap();
        // Invalid UTF-8 in a recognized extension
        fs::write(root.join("bad.py"), [0xff, 0xfe, 0x00, 0x41]).unwrap();

        let analyses = analyze_repository(root).unwrap();
        assert_eq!(analyses.len(), 1);
        assert!(analyses.contains_key(&PathBuf::from("good.py")));
    }

    #[test]
    fn entry_points_found_by_stem() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("tests")).unwrap();
        fs::write(root.join("main.py"), "x = 1\n").unwrap();
        fs::write(root.join("helpers.py"), "y = 2\n").unwrap();
        fs::write(root.join("tests/main.py"), "z = 3\n").unwrap();

        let entries = entry_point_files(root).unwrap();
        assert_eq!(entries, vec![PathBuf::from("main.py")]);
    }
}
