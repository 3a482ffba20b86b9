pub mod budget;
pub mod files;
pub mod history;

pub use budget::create_budget;
pub use files::build_file_context;
pub use history::trim_history;
