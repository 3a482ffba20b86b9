pub mod apply;
pub mod budget;
pub mod context;
pub mod parse;
pub mod prompt;
pub mod tokens;
pub mod trim;
