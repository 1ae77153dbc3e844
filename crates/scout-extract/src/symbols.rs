use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use scout_core::{SymbolKind, Visibility};

use crate::walker::Language;

/// A declared symbol found by line-pattern extraction.
///
/// Created once per extraction pass and immutable thereafter; owned by its
/// [`FileAnalysis`].
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use scout_core::{SymbolKind, Visibility};
/// use scout_extract::symbols::Symbol;
///
/// let sym = Symbol {
///     name: "process".into(),
///     kind: SymbolKind::Function,
///     file: PathBuf::from("src/worker.py"),
///     line_start: 4,
///     line_end: 4,
///     doc: None,
///     visibility: Visibility::Public,
///     complexity: 0,
/// };
/// assert_eq!(sym.kind, SymbolKind::Function);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    /// Symbol name.
    pub name: String,
    /// What kind of declaration this is.
    pub kind: SymbolKind,
    /// Owning file, relative to the repo root.
    pub file: PathBuf,
    /// 1-indexed line where the declaration appears.
    pub line_start: usize,
    /// End line; line heuristics cannot see block ends, so this equals `line_start`.
    pub line_end: usize,
    /// Single-line doc text immediately following the declaration, if any.
    pub doc: Option<String>,
    /// Derived from naming convention (leading underscore = private).
    pub visibility: Visibility,
    /// Cyclomatic complexity, 0 until a scorer fills it in.
    pub complexity: u32,
}

/// Extraction results for a single file.
///
/// Produced by the symbol extractor; read-only input to every downstream
/// component.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use scout_extract::symbols::analyze_source;
/// use scout_extract::walker::Language;
///
/// let analysis = analyze_source(
///     Path::new("m.py"),
///     Language::Python,
///     "import os\n\ndef run():\n    pass\n",
/// );
/// assert_eq!(analysis.symbols.len(), 1);
/// assert_eq!(analysis.imports, vec!["os".to_string()]);
/// assert!(analysis.code_lines <= analysis.total_lines);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAnalysis {
    /// Repo-relative path; the stable identity key.
    pub path: PathBuf,
    /// Detected language tag (`"python"`, `"typescript"`, ...).
    pub language: String,
    /// Declared symbols in source order.
    pub symbols: Vec<Symbol>,
    /// Raw import strings in source order.
    pub imports: Vec<String>,
    /// Total line count.
    pub total_lines: usize,
    /// Non-blank, non-comment line count.
    pub code_lines: usize,
}

/// Per-language extraction capability.
///
/// One implementation per supported language, selected by [`handler_for`];
/// this replaces per-language branching with a registered-handler lookup.
pub trait LanguageHandler {
    /// Extract declared symbols from file content.
    fn extract_symbols(&self, content: &str, file: &Path) -> Vec<Symbol>;
    /// Extract raw import strings from file content.
    fn extract_imports(&self, content: &str) -> Vec<String>;
}

/// Look up the extraction handler for a language.
///
/// Languages without symbol heuristics get a no-op handler: the file is still
/// tagged and line-counted, but yields no symbols or imports.
pub fn handler_for(language: Language) -> &'static dyn LanguageHandler {
    match language {
        Language::Python => &PythonHandler,
        Language::JavaScript | Language::TypeScript => &ScriptHandler,
        _ => &NoopHandler,
    }
}

/// Run line-pattern extraction over one file's content.
///
/// This is the single entry point the repository walk uses per file.
pub fn analyze_source(path: &Path, language: Language, content: &str) -> FileAnalysis {
    let handler = handler_for(language);
    let symbols = handler.extract_symbols(content, path);
    let imports = handler.extract_imports(content);

    let marker = language.comment_marker();
    let total_lines = content.lines().count();
    let code_lines = content
        .lines()
        .filter(|line| {
            let stripped = line.trim();
            !stripped.is_empty() && !stripped.starts_with(marker)
        })
        .count();

    FileAnalysis {
        path: path.to_path_buf(),
        language: language.tag().to_string(),
        symbols,
        imports,
        total_lines,
        code_lines,
    }
}

/// Python line heuristics: `class ` / `def ` declarations, `import` /
/// `from ... import` statements.
struct PythonHandler;

impl LanguageHandler for PythonHandler {
    fn extract_symbols(&self, content: &str, file: &Path) -> Vec<Symbol> {
        let lines: Vec<&str> = content.lines().collect();
        let mut symbols = Vec::new();

        for (i, line) in lines.iter().enumerate() {
            let stripped = line.trim();

            if let Some(rest) = stripped.strip_prefix("class ") {
                let name = rest
                    .split('(')
                    .next()
                    .unwrap_or("")
                    .trim_end_matches(':')
                    .trim()
                    .to_string();
                if name.is_empty() {
                    continue;
                }
                symbols.push(make_symbol(
                    name,
                    SymbolKind::Class,
                    file,
                    i + 1,
                    docstring_after(&lines, i),
                ));
            } else if let Some(rest) = stripped.strip_prefix("def ") {
                let name = rest.split('(').next().unwrap_or("").trim().to_string();
                if name.is_empty() {
                    continue;
                }
                // Indented defs are methods
                let kind = if line.starts_with(' ') || line.starts_with('\t') {
                    SymbolKind::Method
                } else {
                    SymbolKind::Function
                };
                symbols.push(make_symbol(name, kind, file, i + 1, docstring_after(&lines, i)));
            }
        }

        symbols
    }

    fn extract_imports(&self, content: &str) -> Vec<String> {
        let mut imports = Vec::new();

        for line in content.lines() {
            let stripped = line.trim();
            if let Some(rest) = stripped.strip_prefix("import ") {
                let module = rest
                    .split(" as ")
                    .next()
                    .unwrap_or("")
                    .split(',')
                    .next()
                    .unwrap_or("")
                    .trim();
                if !module.is_empty() {
                    imports.push(module.to_string());
                }
            } else if let Some(rest) = stripped.strip_prefix("from ") {
                let module = rest.split(" import").next().unwrap_or("").trim();
                if !module.is_empty() {
                    imports.push(module.to_string());
                }
            }
        }

        imports
    }
}

/// JS/TS line heuristics: `class` declarations, `function` statements, arrow
/// functions bound with `const`/`let`, and `import ... from "module"`.
struct ScriptHandler;

impl LanguageHandler for ScriptHandler {
    fn extract_symbols(&self, content: &str, file: &Path) -> Vec<Symbol> {
        let mut symbols = Vec::new();

        for (i, line) in content.lines().enumerate() {
            let stripped = line.trim();

            if let Some(rest) = stripped.strip_prefix("class ") {
                let mut name = rest.split('{').next().unwrap_or("").trim();
                if let Some(idx) = name.find(" extends ") {
                    name = name[..idx].trim();
                }
                if name.is_empty() {
                    continue;
                }
                symbols.push(make_symbol(name.to_string(), SymbolKind::Class, file, i + 1, None));
            } else if let Some(idx) = stripped.find("function ") {
                let after = &stripped[idx + "function ".len()..];
                let name = after.split('(').next().unwrap_or("").trim();
                if !name.is_empty() {
                    symbols.push(make_symbol(
                        name.to_string(),
                        SymbolKind::Function,
                        file,
                        i + 1,
                        None,
                    ));
                }
            } else if (stripped.contains("const ") || stripped.contains("let "))
                && stripped.contains("=>")
            {
                let keyword = if stripped.contains("const ") { "const " } else { "let " };
                if let Some(idx) = stripped.find(keyword) {
                    let after = &stripped[idx + keyword.len()..];
                    let name = after.split('=').next().unwrap_or("").trim();
                    if !name.is_empty() {
                        symbols.push(make_symbol(
                            name.to_string(),
                            SymbolKind::Function,
                            file,
                            i + 1,
                            None,
                        ));
                    }
                }
            }
        }

        symbols
    }

    fn extract_imports(&self, content: &str) -> Vec<String> {
        let mut imports = Vec::new();

        for line in content.lines() {
            let stripped = line.trim();
            if !stripped.starts_with("import ") {
                continue;
            }
            if let Some(idx) = stripped.find("from ") {
                let module = stripped[idx + "from ".len()..]
                    .trim()
                    .trim_matches(|c| c == ';' || c == '"' || c == '\'');
                if !module.is_empty() {
                    imports.push(module.to_string());
                }
            }
        }

        imports
    }
}

/// Handler for languages that are line-counted but not symbol-extracted.
struct NoopHandler;

impl LanguageHandler for NoopHandler {
    fn extract_symbols(&self, _content: &str, _file: &Path) -> Vec<Symbol> {
        Vec::new()
    }

    fn extract_imports(&self, _content: &str) -> Vec<String> {
        Vec::new()
    }
}

fn make_symbol(
    name: String,
    kind: SymbolKind,
    file: &Path,
    line: usize,
    doc: Option<String>,
) -> Symbol {
    let visibility = Visibility::from_name(&name);
    Symbol {
        name,
        kind,
        file: file.to_path_buf(),
        line_start: line,
        line_end: line,
        doc,
        visibility,
        complexity: 0,
    }
}

/// Capture a one-line Python docstring on the line after a declaration.
fn docstring_after(lines: &[&str], decl_idx: usize) -> Option<String> {
    let next = lines.get(decl_idx + 1)?.trim();
    for quote in ["\"\"\"", "'''"] {
        if let Some(rest) = next.strip_prefix(quote) {
            if let Some(text) = rest.strip_suffix(quote) {
                let text = text.trim();
                if !text.is_empty() {
                    return Some(text.to_string());
                }
            }
        }
    }
    None
}
