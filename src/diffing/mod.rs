pub mod diff_utils;
pub mod merge;
pub mod parser;
pub mod patching;
pub mod similarity;

pub use merge::merge_response;
pub use parser::parse_ai_response;
pub use patching::apply_diff_patch;
pub use similarity::similarity;
