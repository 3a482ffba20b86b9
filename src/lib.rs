pub mod commands;
pub mod config;
pub mod consts;
pub mod context;
pub mod diffing;
pub mod exceptions;
pub mod fs;
pub mod models;
pub mod prompt;
pub mod tokens;

pub use context::{build_file_context, create_budget, trim_history};
pub use diffing::{apply_diff_patch, merge_response, parse_ai_response, similarity};
pub use tokens::estimate_tokens;
