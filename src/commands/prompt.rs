use crate::exceptions::CodepatchError;
use crate::prompt::{Autonomy, BuildMode, PromptOptions, build_system_prompt};
use crate::tokens::estimate_tokens;

pub fn run(
    autonomy: &str,
    build_mode: &str,
    custom: Option<String>,
    existing_files: bool,
) -> Result<(), CodepatchError> {
    let options = PromptOptions {
        autonomy: Autonomy::from_name(autonomy),
        build_mode: BuildMode::from_name(build_mode),
        custom_system_prompt: custom.unwrap_or_default(),
        has_existing_files: existing_files,
    };

    let prompt = build_system_prompt(&options);
    tracing::debug!(tokens = estimate_tokens(&prompt), "system prompt built");
    println!("{}", prompt);
    Ok(())
}
