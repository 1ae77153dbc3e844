//! Ranking and report fusion over the analysis crates.
//!
//! Pure functions of extraction, graph, complexity, and history outputs;
//! nothing here walks the filesystem or runs git. Renderers are deterministic
//! for fixed inputs, so the same repository state always produces the same
//! report text.

pub mod complexity_map;
pub mod core_modules;
pub mod entry;
pub mod keywords;
pub mod learning;

pub use complexity_map::complexity_map;
pub use core_modules::{core_module_rows, core_modules_report, CoreModuleRow};
pub use entry::{entry_suggestions, suggest_entry_points, EntrySuggestion};
pub use learning::{learning_path, learning_steps, LearningStep};
