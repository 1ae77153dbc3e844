//! Halstead metrics and the maintainability index for a Python file.
//!
//! Operator/operand tallies come from a flat token scan, which is enough for
//! the file-scoped difficulty and MI figures this crate reports. Both are
//! computed once per file and shared by all of that file's functions.

use std::collections::HashSet;

/// Python keywords that count as operators in the Halstead model.
const KEYWORD_OPERATORS: &[&str] = &[
    "and", "or", "not", "in", "is", "if", "elif", "else", "for", "while", "return", "yield",
    "lambda", "assert", "del", "raise", "import", "from", "def", "class", "with", "try", "except",
    "finally", "pass", "break", "continue", "global", "nonlocal",
];

/// Multi-character operator lexemes, longest first so the scan is greedy.
const SYMBOL_OPERATORS: &[&str] = &[
    "**=", "//=", ">>=", "<<=", "==", "!=", "<=", ">=", "->", "+=", "-=", "*=", "/=", "%=", "&=",
    "|=", "^=", "**", "//", "<<", ">>", "+", "-", "*", "/", "%", "<", ">", "=", "&", "|", "^",
    "~", "@",
];

/// Halstead tallies for one file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalsteadMetrics {
    /// Distinct operators (η1).
    pub distinct_operators: usize,
    /// Distinct operands (η2).
    pub distinct_operands: usize,
    /// Total operator occurrences (N1).
    pub total_operators: usize,
    /// Total operand occurrences (N2).
    pub total_operands: usize,
}

impl HalsteadMetrics {
    /// Program volume `N · log2(η)`, 0 for an empty tally.
    pub fn volume(&self) -> f64 {
        let n = (self.total_operators + self.total_operands) as f64;
        let vocabulary = (self.distinct_operators + self.distinct_operands) as f64;
        if vocabulary <= 0.0 {
            return 0.0;
        }
        n * vocabulary.log2()
    }

    /// Implementation difficulty `(η1/2) · (N2/η2)`, 0 when no operands exist.
    pub fn difficulty(&self) -> f64 {
        if self.distinct_operands == 0 {
            return 0.0;
        }
        (self.distinct_operators as f64 / 2.0)
            * (self.total_operands as f64 / self.distinct_operands as f64)
    }
}

/// Tally Halstead operators and operands across a file.
///
/// # Examples
///
/// ```
/// use scout_complexity::halstead::tally;
///
/// let metrics = tally("x = a + b\n");
/// assert!(metrics.total_operators >= 2);
/// assert!(metrics.distinct_operands >= 3);
/// assert!(metrics.difficulty() > 0.0);
/// ```
pub fn tally(content: &str) -> HalsteadMetrics {
    let mut operators: Vec<String> = Vec::new();
    let mut operands: Vec<String> = Vec::new();

    for line in content.lines() {
        let code = line.split('#').next().unwrap_or("");
        scan_line(code, &mut operators, &mut operands);
    }

    let distinct_operators: HashSet<&String> = operators.iter().collect();
    let distinct_operands: HashSet<&String> = operands.iter().collect();

    HalsteadMetrics {
        distinct_operators: distinct_operators.len(),
        distinct_operands: distinct_operands.len(),
        total_operators: operators.len(),
        total_operands: operands.len(),
    }
}

fn scan_line(code: &str, operators: &mut Vec<String>, operands: &mut Vec<String>) {
    let mut chars = code.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c.is_whitespace() {
            continue;
        }

        // Identifier / keyword / number
        if c.is_alphanumeric() || c == '_' {
            let mut end = i + c.len_utf8();
            while let Some(&(j, ch)) = chars.peek() {
                if ch.is_alphanumeric() || ch == '_' || ch == '.' {
                    end = j + ch.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            let word = &code[i..end];
            if KEYWORD_OPERATORS.contains(&word) {
                operators.push(word.to_string());
            } else {
                operands.push(word.to_string());
            }
            continue;
        }

        // String literal: the whole literal is one operand
        if c == '"' || c == '\'' {
            let quote = c;
            let mut end = code.len();
            for (j, ch) in chars.by_ref() {
                if ch == quote {
                    end = j + ch.len_utf8();
                    break;
                }
            }
            operands.push(code[i..end].to_string());
            continue;
        }

        // Symbolic operator, longest match first
        if let Some(op) = SYMBOL_OPERATORS
            .iter()
            .find(|op| code[i..].starts_with(**op))
        {
            operators.push((*op).to_string());
            // Operators are ASCII, so byte length is char count
            for _ in 1..op.len() {
                chars.next();
            }
            continue;
        }

        // Brackets, commas, colons: structural, ignored
    }
}

/// Maintainability index on the 0–100 scale.
///
/// `max(0, (171 − 5.2·ln(V) − 0.23·CC − 16.2·ln(SLOC)) · 100/171)`, with the
/// logarithm arguments clamped to 1 so empty files score 100.
///
/// # Examples
///
/// ```
/// use scout_complexity::halstead::maintainability_index;
///
/// let mi = maintainability_index(100.0, 3, 20);
/// assert!(mi > 0.0 && mi <= 100.0);
/// assert_eq!(maintainability_index(0.0, 0, 0), 100.0);
/// ```
pub fn maintainability_index(volume: f64, total_complexity: u32, sloc: usize) -> f64 {
    let volume_term = 5.2 * volume.max(1.0).ln();
    let complexity_term = 0.23 * f64::from(total_complexity);
    let sloc_term = 16.2 * (sloc.max(1) as f64).ln();

    let raw = (171.0 - volume_term - complexity_term - sloc_term) * 100.0 / 171.0;
    raw.clamp(0.0, 100.0)
}
