//! Import-string to file-path resolution.

use std::collections::BTreeSet;
use std::path::PathBuf;

/// Resolve an import string against the set of known repository files.
///
/// Two strategies are tried in order: a dotted module path converted to a
/// slash path with `.py` appended, then the relative prefix stripped and a
/// script extension (`.js`, then `.ts`) appended. The first strategy that
/// names an existing file wins; imports that match nothing resolve to `None`
/// and produce no edge.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use std::path::PathBuf;
/// use scout_graph::resolve::resolve_import;
///
/// let known: BTreeSet<PathBuf> =
///     [PathBuf::from("pkg/util.py")].into_iter().collect();
/// assert_eq!(
///     resolve_import("pkg.util", &known),
///     Some(PathBuf::from("pkg/util.py"))
/// );
/// assert_eq!(resolve_import("os", &known), None);
/// ```
pub fn resolve_import(import: &str, known: &BTreeSet<PathBuf>) -> Option<PathBuf> {
    let dotted = PathBuf::from(format!("{}.py", import.replace('.', "/")));
    if known.contains(&dotted) {
        return Some(dotted);
    }

    let mut stripped = import;
    loop {
        if let Some(rest) = stripped.strip_prefix("./") {
            stripped = rest;
        } else if let Some(rest) = stripped.strip_prefix("../") {
            stripped = rest;
        } else {
            break;
        }
    }

    for ext in ["js", "ts"] {
        let candidate = PathBuf::from(format!("{stripped}.{ext}"));
        if known.contains(&candidate) {
            return Some(candidate);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(paths: &[&str]) -> BTreeSet<PathBuf> {
        paths.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn dotted_import_maps_to_python_file() {
        let files = known(&["app/models/user.py"]);
        assert_eq!(
            resolve_import("app.models.user", &files),
            Some(PathBuf::from("app/models/user.py"))
        );
    }

    #[test]
    fn relative_import_prefers_js_over_ts() {
        let files = known(&["utils.js", "utils.ts"]);
        assert_eq!(
            resolve_import("./utils", &files),
            Some(PathBuf::from("utils.js"))
        );
    }

    #[test]
    fn ts_is_tried_when_js_is_absent() {
        let files = known(&["lib/helpers.ts"]);
        assert_eq!(
            resolve_import("../lib/helpers", &files),
            Some(PathBuf::from("lib/helpers.ts"))
        );
    }

    #[test]
    fn python_strategy_wins_over_script_strategy() {
        let files = known(&["config.py", "config.js"]);
        assert_eq!(
            resolve_import("config", &files),
            Some(PathBuf::from("config.py"))
        );
    }

    #[test]
    fn external_imports_resolve_to_none() {
        let files = known(&["main.py"]);
        assert_eq!(resolve_import("os.path", &files), None);
        assert_eq!(resolve_import("react", &files), None);
    }
}
