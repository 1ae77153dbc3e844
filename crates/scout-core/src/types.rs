use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What kind of declaration a symbol is.
///
/// # Examples
///
/// ```
/// use scout_core::SymbolKind;
///
/// let kind: SymbolKind = serde_json::from_str("\"method\"").unwrap();
/// assert_eq!(kind, SymbolKind::Method);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    /// Top-level function.
    Function,
    /// Indented function (class member).
    Method,
    /// Class declaration.
    Class,
    /// Variable binding.
    Variable,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolKind::Function => write!(f, "function"),
            SymbolKind::Method => write!(f, "method"),
            SymbolKind::Class => write!(f, "class"),
            SymbolKind::Variable => write!(f, "variable"),
        }
    }
}

/// Symbol visibility, derived from naming convention (leading underscore
/// means private).
///
/// # Examples
///
/// ```
/// use scout_core::Visibility;
///
/// assert_eq!(Visibility::from_name("_helper"), Visibility::Private);
/// assert_eq!(Visibility::from_name("run"), Visibility::Public);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    /// Derive visibility from a symbol name.
    pub fn from_name(name: &str) -> Self {
        if name.starts_with('_') {
            Visibility::Private
        } else {
            Visibility::Public
        }
    }
}

/// Ordinal complexity band for a function, using the fixed thresholds
/// {5, 10, 20}.
///
/// # Examples
///
/// ```
/// use scout_core::Classification;
///
/// assert_eq!(Classification::from_complexity(3), Classification::Simple);
/// assert_eq!(Classification::from_complexity(25), Classification::VeryComplex);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Simple,
    Moderate,
    Complex,
    VeryComplex,
}

impl Classification {
    /// Cyclomatic complexity at or below this is "simple".
    pub const SIMPLE: u32 = 5;
    /// Cyclomatic complexity at or below this is "moderate".
    pub const MODERATE: u32 = 10;
    /// Cyclomatic complexity at or below this is "complex"; above is "very complex".
    pub const COMPLEX: u32 = 20;

    /// Classify a cyclomatic complexity score into a band.
    pub fn from_complexity(complexity: u32) -> Self {
        if complexity <= Self::SIMPLE {
            Classification::Simple
        } else if complexity <= Self::MODERATE {
            Classification::Moderate
        } else if complexity <= Self::COMPLEX {
            Classification::Complex
        } else {
            Classification::VeryComplex
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Simple => write!(f, "simple"),
            Classification::Moderate => write!(f, "moderate"),
            Classification::Complex => write!(f, "complex"),
            Classification::VeryComplex => write!(f, "very_complex"),
        }
    }
}

/// File-level risk band derived from average complexity and maintainability.
///
/// The bands are evaluated as an ordered chain, first match wins, with the two
/// conditions OR-ed inside each band:
/// `high` if avg > 20 or MI < 10; `medium` if avg > 10 or MI < 20; else `low`.
///
/// # Examples
///
/// ```
/// use scout_core::RiskLevel;
///
/// assert_eq!(RiskLevel::determine(25.0, 80.0), RiskLevel::High);
/// assert_eq!(RiskLevel::determine(8.0, 8.0), RiskLevel::High);
/// assert_eq!(RiskLevel::determine(12.0, 50.0), RiskLevel::Medium);
/// assert_eq!(RiskLevel::determine(3.0, 60.0), RiskLevel::Low);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Determine the risk band for a file.
    ///
    /// Pure function of its inputs; calling it twice with identical values
    /// yields identical output.
    pub fn determine(avg_complexity: f64, maintainability_index: f64) -> Self {
        if avg_complexity > Classification::COMPLEX as f64 || maintainability_index < 10.0 {
            RiskLevel::High
        } else if avg_complexity > Classification::MODERATE as f64 || maintainability_index < 20.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// Output format for CLI subcommands.
///
/// Implements [`FromStr`] so it can be used directly with `clap` argument parsing.
///
/// # Examples
///
/// ```
/// use scout_core::OutputFormat;
///
/// let fmt: OutputFormat = "json".parse().unwrap();
/// assert_eq!(fmt, OutputFormat::Json);
///
/// let fmt: OutputFormat = "md".parse().unwrap();
/// assert_eq!(fmt, OutputFormat::Markdown);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable tables and summaries.
    #[default]
    Text,
    /// Machine-readable JSON with camelCase keys.
    Json,
    /// Markdown-formatted output.
    Markdown,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
