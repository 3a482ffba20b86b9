use crate::models::ContextBudget;

/// Splits a model's context window into what is left for conversation history.
///
/// Never fails: when the system prompt and output reservation exceed the
/// window, the history allowance clamps to zero.
pub fn create_budget(
    max_tokens: u32,
    system_prompt_tokens: u32,
    reserved_output_tokens: u32,
) -> ContextBudget {
    let available_for_history = max_tokens
        .saturating_sub(system_prompt_tokens)
        .saturating_sub(reserved_output_tokens);

    ContextBudget {
        max_tokens,
        system_prompt_tokens,
        reserved_output_tokens,
        available_for_history,
    }
}
