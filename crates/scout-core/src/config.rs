use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ScoutError;

/// Top-level configuration loaded from `.scout.toml`.
///
/// Resolution is layered: CLI flags > config file > defaults. The analysis
/// crates receive values from this struct as explicit parameters and never
/// read the environment themselves.
///
/// # Examples
///
/// ```
/// use scout_core::ScoutConfig;
///
/// let config = ScoutConfig::default();
/// assert_eq!(config.analysis.core_modules, 15);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoutConfig {
    /// LLM settings consumed by the chat agent layer.
    #[serde(default)]
    pub llm: LlmConfig,
    /// Analysis behavior settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl ScoutConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Io`] if the file cannot be read, or
    /// [`ScoutError::Toml`] if the content is not valid TOML.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use scout_core::ScoutConfig;
    /// use std::path::Path;
    ///
    /// let config = ScoutConfig::from_file(Path::new(".scout.toml")).unwrap();
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, ScoutError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Toml`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use scout_core::ScoutConfig;
    ///
    /// let toml = r#"
    /// [analysis]
    /// core_modules = 20
    /// "#;
    /// let config = ScoutConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.analysis.core_modules, 20);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, ScoutError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }
}

/// LLM provider configuration for the conversational agent layer.
///
/// The analysis core never touches these values; they are loaded here so the
/// whole configuration lives in one file.
///
/// # Examples
///
/// ```
/// use scout_core::LlmConfig;
///
/// let config = LlmConfig::default();
/// assert_eq!(config.provider, "groq");
/// assert_eq!(config.temperature, 0.2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider name (e.g. `"groq"`, `"openai"`, `"anthropic"`).
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Maximum response tokens per request.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
    /// Maximum agent tool-call iterations per query.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// API key for the provider.
    pub api_key: Option<String>,
}

fn default_provider() -> String {
    "groq".into()
}

fn default_model() -> String {
    "llama-3.3-70b-versatile".into()
}

fn default_temperature() -> f64 {
    0.2
}

fn default_max_tokens() -> usize {
    4000
}

fn default_max_iterations() -> usize {
    5
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            max_iterations: default_max_iterations(),
            api_key: None,
        }
    }
}

/// Analysis behavior configuration.
///
/// # Examples
///
/// ```
/// use scout_core::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.core_modules, 15);
/// assert_eq!(config.hotspot_limit, 20);
/// assert_eq!(config.recent_days, 30);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Default repository path when none is given on the command line.
    #[serde(default = "default_repo_path")]
    pub repo_path: PathBuf,
    /// Number of core-module candidates to rank (default: 15).
    #[serde(default = "default_core_modules")]
    pub core_modules: usize,
    /// Maximum hotspots to mine from git history (default: 20).
    #[serde(default = "default_hotspot_limit")]
    pub hotspot_limit: usize,
    /// Window for the recent-activity query, in days (default: 30).
    #[serde(default = "default_recent_days")]
    pub recent_days: u64,
    /// Average-complexity ceiling for "simple file" listings (default: 5).
    #[serde(default = "default_simple_threshold")]
    pub simple_threshold: f64,
    /// Average-complexity floor for "complex file" listings (default: 10).
    #[serde(default = "default_complex_threshold")]
    pub complex_threshold: f64,
}

fn default_repo_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_core_modules() -> usize {
    15
}

fn default_hotspot_limit() -> usize {
    20
}

fn default_recent_days() -> u64 {
    30
}

fn default_simple_threshold() -> f64 {
    5.0
}

fn default_complex_threshold() -> f64 {
    10.0
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            repo_path: default_repo_path(),
            core_modules: default_core_modules(),
            hotspot_limit: default_hotspot_limit(),
            recent_days: default_recent_days(),
            simple_threshold: default_simple_threshold(),
            complex_threshold: default_complex_threshold(),
        }
    }
}
