use std::path::{Path, PathBuf};

use scout_core::ScoutError;

/// Maximum file size to process (1 MB).
const MAX_FILE_SIZE: u64 = 1_048_576;

/// Number of bytes to check for binary detection.
const BINARY_CHECK_SIZE: usize = 8192;

/// Directory components that are never descended into, regardless of
/// `.gitignore` state.
const SKIP_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "__pycache__",
    "venv",
    "env",
    ".venv",
    "dist",
    "build",
    "target",
];

/// A source file discovered during repository walking.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use scout_extract::walker::{Language, SourceFile};
///
/// let file = SourceFile {
///     path: PathBuf::from("src/app.py"),
///     language: Language::Python,
///     content: "def main(): pass".to_string(),
/// };
/// assert_eq!(file.language, Language::Python);
/// ```
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path relative to the repository root.
    pub path: PathBuf,
    /// Detected programming language.
    pub language: Language,
    /// Full file content.
    pub content: String,
}

/// Programming language detected from file extension.
///
/// # Examples
///
/// ```
/// use scout_extract::walker::Language;
///
/// assert_eq!(Language::from_extension("py"), Language::Python);
/// assert_eq!(Language::from_extension("tsx"), Language::TypeScript);
/// assert_eq!(Language::from_extension("jsx"), Language::JavaScript);
/// assert_eq!(Language::from_extension("go"), Language::Go);
/// assert_eq!(Language::from_extension("hpp"), Language::Cpp);
/// assert_eq!(Language::from_extension("txt"), Language::Unknown);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Java,
    Go,
    Rust,
    C,
    Cpp,
    Unknown,
}

impl Language {
    /// Detect language from a file extension string (without the dot).
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "py" => Language::Python,
            "js" | "jsx" => Language::JavaScript,
            "ts" | "tsx" => Language::TypeScript,
            "java" => Language::Java,
            "go" => Language::Go,
            "rs" => Language::Rust,
            "c" | "h" => Language::C,
            "cpp" | "hpp" => Language::Cpp,
            _ => Language::Unknown,
        }
    }

    /// Lowercase tag used in reports (`"python"`, `"typescript"`, ...).
    pub fn tag(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Java => "java",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Unknown => "unknown",
        }
    }

    /// Line-comment marker for this language, used when counting code lines.
    pub fn comment_marker(&self) -> &'static str {
        match self {
            Language::Python => "#",
            _ => "//",
        }
    }
}

/// Walk a repository, returning source files whose extension is in the fixed
/// language table.
///
/// Respects `.gitignore`, additionally skips conventional dependency/build
/// directories, binary files, and files larger than 1 MB. Returned paths are
/// relative to `root`.
///
/// # Errors
///
/// Returns [`ScoutError::Config`] if `root` does not exist.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use scout_extract::walker::walk_repo;
///
/// let files = walk_repo(Path::new(".")).unwrap();
/// for f in &files {
///     println!("{}: {:?}", f.path.display(), f.language);
/// }
/// ```
pub fn walk_repo(root: &Path) -> Result<Vec<SourceFile>, ScoutError> {
    if !root.exists() {
        return Err(ScoutError::Config(format!(
            "repository path does not exist: {}",
            root.display()
        )));
    }

    let walker = ignore::WalkBuilder::new(root)
        .filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            !SKIP_DIRS.contains(&name.as_ref())
        })
        .build();
    let mut files = Vec::new();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        let Some(file_type) = entry.file_type() else {
            continue;
        };
        if !file_type.is_file() {
            continue;
        }

        let path = entry.path();

        let metadata = match std::fs::metadata(path) {
            Ok(m) => m,
            Err(_) => continue,
        };
        if metadata.len() > MAX_FILE_SIZE {
            continue;
        }

        let ext = match path.extension().and_then(|e| e.to_str()) {
            Some(e) => e,
            None => continue,
        };
        let language = Language::from_extension(ext);
        if language == Language::Unknown {
            continue;
        }

        // Undecodable content is an omission, not an error
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => continue,
        };

        // Null bytes in the first 8 KB mean binary
        let check_len = content.len().min(BINARY_CHECK_SIZE);
        if content.as_bytes()[..check_len].contains(&0) {
            continue;
        }

        let relative = match path.strip_prefix(root) {
            Ok(r) => r.to_path_buf(),
            Err(_) => path.to_path_buf(),
        };

        files.push(SourceFile {
            path: relative,
            language,
            content,
        });
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn make_temp_repo() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("src/app.py"), "def hello(): pass").unwrap();
        fs::write(root.join("src/util.js"), "function run() {}").unwrap();
        fs::write(root.join("src/view.tsx"), "const App = () => null;").unwrap();
        fs::write(root.join("src/main.go"), "package main").unwrap();
        fs::write(root.join("src/lib.rs"), "fn lib() {}").unwrap();
        fs::write(root.join("src/core.c"), "int main() { return 0; }").unwrap();
        fs::write(root.join("src/core.hpp"), "class Core {};").unwrap();
        fs::write(
            root.join("src/Main.java"),
            "public class Main { public static void main(String[] args) {} }",
        )
        .unwrap();

        // Unknown extensions
        fs::write(root.join("README.md"), "# Hello").unwrap();
        fs::write(root.join("data.csv"), "a,b,c").unwrap();

        dir
    }

    #[test]
    fn walk_finds_known_language_files() {
        let dir = make_temp_repo();
        let files = walk_repo(dir.path()).unwrap();

        assert_eq!(files.len(), 8);

        let languages: Vec<Language> = files.iter().map(|f| f.language).collect();
        assert!(languages.contains(&Language::Python));
        assert!(languages.contains(&Language::JavaScript));
        assert!(languages.contains(&Language::TypeScript));
        assert!(languages.contains(&Language::Go));
        assert!(languages.contains(&Language::Rust));
        assert!(languages.contains(&Language::C));
        assert!(languages.contains(&Language::Cpp));
        assert!(languages.contains(&Language::Java));
    }

    #[test]
    fn walk_skips_dependency_dirs() {
        let dir = make_temp_repo();
        let root = dir.path();

        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::write(root.join("node_modules/pkg/index.js"), "module.exports = 1;").unwrap();
        fs::create_dir_all(root.join("__pycache__")).unwrap();
        fs::write(root.join("__pycache__/app.py"), "cached = True").unwrap();
        fs::create_dir_all(root.join("venv/lib")).unwrap();
        fs::write(root.join("venv/lib/site.py"), "x = 1").unwrap();

        let files = walk_repo(root).unwrap();
        for f in &files {
            let display = f.path.display().to_string();
            assert!(!display.contains("node_modules"), "leaked: {display}");
            assert!(!display.contains("__pycache__"), "leaked: {display}");
            assert!(!display.contains("venv"), "leaked: {display}");
        }
    }

    #[test]
    fn walk_skips_binary_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        let mut binary_content = b"def main(): ".to_vec();
        binary_content.push(0);
        binary_content.extend_from_slice(b" pass");
        fs::write(root.join("binary.py"), &binary_content).unwrap();
        fs::write(root.join("normal.py"), "def normal(): pass").unwrap();

        let files = walk_repo(root).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, PathBuf::from("normal.py"));
    }

    #[test]
    fn walk_skips_large_and_unknown_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        let large_content = "x".repeat(1_048_577);
        fs::write(root.join("huge.py"), &large_content).unwrap();
        fs::write(root.join("data.txt"), "hello").unwrap();
        fs::write(root.join("ok.py"), "def ok(): pass").unwrap();

        let files = walk_repo(root).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, PathBuf::from("ok.py"));
    }

    #[test]
    fn missing_root_is_a_config_error() {
        let err = walk_repo(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, ScoutError::Config(_)));
    }
}
