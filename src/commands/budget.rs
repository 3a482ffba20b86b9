use crate::config::EngineConfig;
use crate::exceptions::CodepatchError;

pub fn run(config: &EngineConfig, system_prompt_tokens: u32) -> Result<(), CodepatchError> {
    let budget = config.budget(system_prompt_tokens);
    println!("{}", serde_json::to_string_pretty(&budget)?);
    Ok(())
}
