use crate::config::EngineConfig;
use crate::context::files::build_file_context;
use crate::exceptions::CodepatchError;
use crate::fs::load_files;
use std::path::PathBuf;

pub fn run(
    config: &EngineConfig,
    active: Option<String>,
    max_tokens: Option<u32>,
    file_paths: Vec<PathBuf>,
) -> Result<(), CodepatchError> {
    let files = load_files(&file_paths)?;
    if let Some(name) = &active
        && !files.contains(name)
    {
        return Err(CodepatchError::InvalidInput(format!(
            "Active file '{}' is not among the listed files",
            name
        )));
    }

    let budget = max_tokens.unwrap_or(config.file_context_tokens);
    print!("{}", build_file_context(&files, active.as_deref(), budget));
    Ok(())
}
