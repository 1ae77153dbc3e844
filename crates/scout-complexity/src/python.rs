//! Cyclomatic complexity scanning for Python source.
//!
//! Line-heuristic, like the rest of the extraction pipeline: functions are
//! found by `def ` lines, their bodies by indentation, and decision points by
//! keyword tokens. Multi-line constructs outside these patterns are not seen.

/// Decision-point keywords, each adding one to McCabe complexity.
///
/// `elif` tokenizes separately from `if`, so chains count once per branch.
/// `with` is deliberately absent; it introduces no branch.
const DECISION_KEYWORDS: &[&str] = &[
    "if", "elif", "for", "while", "except", "and", "or", "assert",
];

/// A function-like construct found in Python source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PyFunction {
    /// Function or method name.
    pub name: String,
    /// 1-indexed line of the `def`.
    pub line: usize,
    /// McCabe cyclomatic complexity (decision points + 1).
    pub complexity: u32,
}

/// Scan Python source for function-like constructs and their complexity.
///
/// Every `def` at any indentation yields one entry; a nested def's decision
/// points also count toward its enclosing function (the body scan is purely
/// indentation-based).
///
/// # Examples
///
/// ```
/// use scout_complexity::python::scan_functions;
///
/// let fns = scan_functions("def f(x):\n    if x:\n        return 1\n    return 0\n");
/// assert_eq!(fns.len(), 1);
/// assert_eq!(fns[0].name, "f");
/// assert_eq!(fns[0].complexity, 2);
/// ```
pub fn scan_functions(content: &str) -> Vec<PyFunction> {
    let lines: Vec<&str> = content.lines().collect();
    let mut functions = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let stripped = line.trim_start();
        let Some(rest) = stripped.strip_prefix("def ") else {
            continue;
        };
        let name = rest.split('(').next().unwrap_or("").trim();
        if name.is_empty() {
            continue;
        }

        let indent = indent_width(line);
        let mut decision_points = 0u32;

        for body_line in lines.iter().skip(i + 1) {
            if body_line.trim().is_empty() {
                continue;
            }
            if indent_width(body_line) <= indent {
                break;
            }
            decision_points += count_decision_tokens(body_line);
        }

        functions.push(PyFunction {
            name: name.to_string(),
            line: i + 1,
            complexity: decision_points + 1,
        });
    }

    functions
}

fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

/// Count decision-point keyword tokens on one line, ignoring trailing comments.
fn count_decision_tokens(line: &str) -> u32 {
    let code = line.split('#').next().unwrap_or("");
    code.split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|token| DECISION_KEYWORDS.contains(token))
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_line_function_is_complexity_one() {
        let fns = scan_functions("def f():\n    return 1\n");
        assert_eq!(fns[0].complexity, 1);
    }

    #[test]
    fn branches_and_loops_add_one_each() {
        let src = "\
def process(items):
    total = 0
    for item in items:
        if item > 0:
            total += item
        elif item < -10:
            total -= 1
    while total > 100:
        total //= 2
    return total
";
        let fns = scan_functions(src);
        // for + if + elif + while = 4 decision points
        assert_eq!(fns[0].complexity, 5);
    }

    #[test]
    fn boolean_operators_count() {
        let src = "def check(a, b):\n    return a and b or not a\n";
        let fns = scan_functions(src);
        // and + or = 2 decision points
        assert_eq!(fns[0].complexity, 3);
    }

    #[test]
    fn methods_are_scanned_independently() {
        let src = "\
class C:
    def a(self):
        if self.x:
            return 1
        return 0

    def b(self):
        return 2
";
        let fns = scan_functions(src);
        assert_eq!(fns.len(), 2);
        assert_eq!(fns[0].name, "a");
        assert_eq!(fns[0].complexity, 2);
        assert_eq!(fns[1].complexity, 1);
    }

    #[test]
    fn comments_are_not_counted() {
        let src = "def f():\n    return 1  # if this or that\n";
        let fns = scan_functions(src);
        assert_eq!(fns[0].complexity, 1);
    }

    #[test]
    fn ternary_and_comprehension_count() {
        let src = "def f(xs):\n    ys = [x for x in xs if x]\n    return 1 if ys else 0\n";
        let fns = scan_functions(src);
        // comprehension for + comprehension if + ternary if = 3
        assert_eq!(fns[0].complexity, 4);
    }

    #[test]
    fn no_functions_no_entries() {
        assert!(scan_functions("x = 1\ny = 2\n").is_empty());
    }
}
