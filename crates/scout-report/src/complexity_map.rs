//! Repository-wide complexity map rendering.

use std::fmt::Write;

use scout_complexity::{ComplexityAnalyzer, FileComplexity};

/// Render the complexity map as markdown.
///
/// Sections: overview, simple files (good first reads), the moderate band
/// between the two thresholds, complex files, high-risk list,
/// recommendations and the fixed legend.
pub fn complexity_map(
    complexity: &ComplexityAnalyzer,
    simple_threshold: f64,
    complex_threshold: f64,
) -> String {
    let report = complexity.report();
    let simple = complexity.simple_files(simple_threshold);
    let complex = complexity.complex_files(complex_threshold);

    let mut out = String::from("**Codebase Complexity Map**\n\n");

    out.push_str("**Overview:**\n");
    let _ = writeln!(out, "- Total Python files analyzed: {}", report.total_files);
    let _ = writeln!(out, "- Average complexity: {:.2}", report.average_complexity);
    let _ = writeln!(out, "- High-risk files: {}\n", report.high_risk_files.len());

    out.push_str("**🟢 Simple Files** (Great for beginners):\n\n");
    if simple.is_empty() {
        out.push_str("No simple files found.\n\n");
    } else {
        for (i, file) in simple.iter().take(8).enumerate() {
            let _ = writeln!(out, "{}. **{}**", i + 1, file.path.display());
            let _ = writeln!(out, "   - Complexity: {:.1}", file.average_complexity);
            let _ = writeln!(out, "   - Maintainability: {:.1}/100", file.maintainability_index);
            let _ = writeln!(out, "   - Risk: {}", file.risk_level);
            out.push_str("   - 💡 Good for learning the codebase\n\n");
        }
    }

    out.push_str("\n**🟡 Moderate Complexity Files:**\n\n");
    let mut moderate: Vec<&FileComplexity> = complexity
        .files()
        .filter(|f| {
            f.average_complexity > simple_threshold && f.average_complexity <= complex_threshold
        })
        .collect();
    moderate.sort_by(|a, b| {
        a.average_complexity
            .partial_cmp(&b.average_complexity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    if moderate.is_empty() {
        out.push_str("No moderate complexity files found.\n");
    } else {
        for (i, file) in moderate.iter().take(5).enumerate() {
            let _ = writeln!(
                out,
                "{}. {} (complexity: {:.1})",
                i + 1,
                file.path.display(),
                file.average_complexity
            );
        }
    }

    out.push_str("\n\n**🔴 Complex Files** (Requires experience):\n\n");
    if complex.is_empty() {
        out.push_str("No highly complex files found.\n\n");
    } else {
        for (i, file) in complex.iter().take(8).enumerate() {
            let _ = writeln!(out, "{}. **{}**", i + 1, file.path.display());
            let _ = writeln!(out, "   - Complexity: {:.1}", file.average_complexity);
            let _ = writeln!(out, "   - Max complexity: {}", file.max_complexity);
            let _ = writeln!(out, "   - Maintainability: {:.1}/100", file.maintainability_index);
            let _ = writeln!(out, "   - Risk: {}", file.risk_level);
            out.push_str("   - ⚠️ Study simpler files first\n\n");
        }
    }

    if !report.high_risk_files.is_empty() {
        out.push_str("\n**⚠️ High-Risk Files** (Technical debt areas):\n\n");
        for (i, path) in report.high_risk_files.iter().take(5).enumerate() {
            let _ = writeln!(out, "{}. {}", i + 1, path.display());
        }
    }

    out.push_str("\n\n**Recommendations for New Developers:**\n\n");
    out.push_str("1. **Start with Simple Files**: Begin with the green (simple) files listed above\n");
    out.push_str("2. **Progress Gradually**: Move to moderate complexity files as you understand the patterns\n");
    out.push_str("3. **Avoid High-Risk Areas**: Stay away from red (complex) files until you're comfortable\n");
    out.push_str("4. **Ask for Help**: Complex files often require team knowledge, so don't hesitate to ask\n");

    out.push_str("\n\n**Complexity Scale:**\n");
    out.push_str("- 🟢 Simple (1-5): Easy to understand, good for beginners\n");
    out.push_str("- 🟡 Moderate (6-10): Requires some experience\n");
    out.push_str("- 🟠 Complex (11-20): Advanced understanding needed\n");
    out.push_str("- 🔴 Very Complex (20+): Expert-level, potential technical debt\n");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn map_sections_cover_simple_and_complex_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("easy.py"), "def f():\n    return 1\n").unwrap();
        let mut hard = String::from("def f(x):\n");
        for i in 0..15 {
            hard.push_str(&format!("    if x == {i}:\n        return {i}\n"));
        }
        fs::write(dir.path().join("hard.py"), hard).unwrap();

        let complexity = ComplexityAnalyzer::analyze(dir.path()).unwrap();
        let out = complexity_map(&complexity, 5.0, 10.0);

        assert!(out.contains("Total Python files analyzed: 2"));
        assert!(out.contains("easy.py"));
        assert!(out.contains("hard.py"));
        assert!(out.contains("**Complexity Scale:**"));
    }

    #[test]
    fn empty_repository_still_renders() {
        let dir = TempDir::new().unwrap();
        let complexity = ComplexityAnalyzer::analyze(dir.path()).unwrap();
        let out = complexity_map(&complexity, 5.0, 10.0);
        assert!(out.contains("No simple files found."));
        assert!(out.contains("No highly complex files found."));
        assert!(out.contains("Average complexity: 0.00"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.py"), "def f():\n    return 1\n").unwrap();
        fs::write(dir.path().join("b.py"), "def g():\n    return 2\n").unwrap();
        let complexity = ComplexityAnalyzer::analyze(dir.path()).unwrap();
        assert_eq!(
            complexity_map(&complexity, 5.0, 10.0),
            complexity_map(&complexity, 5.0, 10.0)
        );
    }
}
