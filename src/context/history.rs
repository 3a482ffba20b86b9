use crate::models::{ChatMessage, ContextBudget};
use crate::tokens::{count_tokens_for_messages, estimate_tokens};

/// The newest conversation messages that survive any budget.
///
/// Two covers the latest user prompt and the reply it answers.
pub const MIN_KEPT_MESSAGES: usize = 2;

/// Returns the newest slice of `messages` that fits `budget`.
///
/// System messages are always kept and placed first, in their original
/// order. Conversation messages are taken newest-first until the next one
/// would overflow what the system messages leave over; at least
/// [`MIN_KEPT_MESSAGES`] of them are kept even when they do not fit.
pub fn trim_history(messages: &[ChatMessage], budget: &ContextBudget) -> Vec<ChatMessage> {
    let (system, conversation): (Vec<&ChatMessage>, Vec<&ChatMessage>) =
        messages.iter().partition(|m| m.is_system());

    if conversation.is_empty() {
        return system.into_iter().cloned().collect();
    }

    let system_texts: Vec<&str> = system.iter().map(|m| m.content.as_str()).collect();
    let system_tokens = count_tokens_for_messages(&system_texts);
    let available = budget.available_for_history.saturating_sub(system_tokens);

    let mut used = 0u32;
    let mut fitting = 0usize;
    for message in conversation.iter().rev() {
        let tokens = estimate_tokens(&message.content);
        if used.saturating_add(tokens) > available {
            break;
        }
        used += tokens;
        fitting += 1;
    }

    let kept = fitting.max(MIN_KEPT_MESSAGES.min(conversation.len()));
    let dropped = conversation.len() - kept;
    if dropped > 0 {
        tracing::debug!(
            dropped,
            kept,
            available,
            used,
            "trimmed conversation history to fit budget"
        );
    }

    system
        .into_iter()
        .chain(conversation[dropped..].iter().copied())
        .cloned()
        .collect()
}
