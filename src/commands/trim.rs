use crate::config::EngineConfig;
use crate::context::history::trim_history;
use crate::exceptions::CodepatchError;
use crate::fs::read_input;
use crate::models::ChatMessage;
use std::path::Path;

pub fn run(
    config: &EngineConfig,
    history_path: Option<&Path>,
    system_prompt_tokens: u32,
) -> Result<(), CodepatchError> {
    let raw = read_input(history_path)?;
    let messages: Vec<ChatMessage> = serde_json::from_str(&raw)?;

    let budget = config.budget(system_prompt_tokens);
    let trimmed = trim_history(&messages, &budget);
    tracing::info!(
        before = messages.len(),
        after = trimmed.len(),
        available = budget.available_for_history,
        "history trimmed"
    );

    println!("{}", serde_json::to_string_pretty(&trimmed)?);
    Ok(())
}
