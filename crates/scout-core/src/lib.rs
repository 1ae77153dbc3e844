//! Core types, configuration, and error handling for the codescout toolkit.
//!
//! This crate provides the shared foundation used by all other scout crates:
//! - [`ScoutError`]: unified error type using `thiserror`
//! - [`ScoutConfig`]: configuration loaded from `.scout.toml`
//! - Shared types: [`OutputFormat`], [`SymbolKind`], [`Visibility`],
//!   [`Classification`], [`RiskLevel`]

mod config;
mod error;
mod types;

pub use config::{AnalysisConfig, LlmConfig, ScoutConfig};
pub use error::ScoutError;
pub use types::{Classification, OutputFormat, RiskLevel, SymbolKind, Visibility};

/// A convenience `Result` type for scout operations.
pub type Result<T> = std::result::Result<T, ScoutError>;
