use codepatch::context::budget::create_budget;
use codepatch::context::history::trim_history;
use codepatch::models::{ChatMessage, Role};
use proptest::prelude::*;

fn msg(role: Role, tokens: usize) -> ChatMessage {
    // Four ASCII characters per estimated token
    ChatMessage::new(role, "x".repeat(tokens * 4))
}

#[test]
fn test_trim_history_drops_oldest_messages_that_overflow() {
    // GIVEN a 700-token history budget
    let budget = create_budget(1000, 100, 200);

    // AND five alternating messages whose two oldest are large
    let messages = vec![
        ChatMessage::user("x".repeat(3000)),
        ChatMessage::assistant("x".repeat(3000)),
        ChatMessage::user("recent question"),
        ChatMessage::assistant("recent answer"),
        ChatMessage::user("latest question"),
    ];

    // WHEN trimming
    let trimmed = trim_history(&messages, &budget);

    // THEN only the three newest survive, in original order
    assert_eq!(trimmed, messages[2..].to_vec());
}

#[test]
fn test_trim_history_keeps_newest_pair_under_zero_budget() {
    let budget = create_budget(0, 0, 0);
    let messages = vec![
        ChatMessage::system("rules"),
        msg(Role::User, 50),
        msg(Role::Assistant, 50),
        ChatMessage::user("newest prompt"),
        ChatMessage::assistant("newest reply"),
    ];

    let trimmed = trim_history(&messages, &budget);

    assert_eq!(
        trimmed,
        vec![
            ChatMessage::system("rules"),
            ChatMessage::user("newest prompt"),
            ChatMessage::assistant("newest reply"),
        ]
    );
}

#[test]
fn test_trim_history_system_tokens_reduce_available_budget() {
    // GIVEN 100 tokens for history, 60 of them used by a system message
    let budget = create_budget(100, 0, 0);
    let messages = vec![
        msg(Role::System, 60),
        msg(Role::User, 30),
        msg(Role::Assistant, 20),
        msg(Role::User, 15),
    ];

    // WHEN trimming
    let trimmed = trim_history(&messages, &budget);

    // THEN only the newest two conversation messages fit in the remaining 40
    assert_eq!(trimmed.len(), 3);
    assert_eq!(trimmed[0].role, Role::System);
    assert_eq!(trimmed[1], messages[2]);
    assert_eq!(trimmed[2], messages[3]);
}

#[test]
fn test_trim_history_rounds_each_system_message_separately() {
    // GIVEN two 5-char system messages (2 tokens each, 3 if concatenated)
    let budget = create_budget(6, 0, 0);
    let messages = vec![
        ChatMessage::system("abcde"),
        ChatMessage::system("fghij"),
        msg(Role::User, 1),
        msg(Role::Assistant, 1),
        msg(Role::User, 1),
    ];

    // WHEN trimming
    let trimmed = trim_history(&messages, &budget);

    // THEN 2 tokens remain, so only the newest two conversation messages fit
    assert_eq!(trimmed.len(), 4);
    assert_eq!(&trimmed[2..], &messages[3..]);
}

#[test]
fn test_trim_history_stops_at_first_overflow() {
    // GIVEN an old small message behind a large one
    let budget = create_budget(100, 0, 0);
    let messages = vec![
        msg(Role::User, 5),
        msg(Role::Assistant, 90),
        msg(Role::User, 10),
        msg(Role::Assistant, 10),
        msg(Role::User, 10),
    ];

    // THEN the small old message is not picked up past the overflow
    let trimmed = trim_history(&messages, &budget);
    assert_eq!(trimmed, messages[2..].to_vec());
}

#[test]
fn test_trim_history_everything_fits() {
    let budget = create_budget(10_000, 0, 0);
    let messages = vec![
        ChatMessage::user("a"),
        ChatMessage::assistant("b"),
        ChatMessage::user("c"),
    ];
    assert_eq!(trim_history(&messages, &budget), messages);
}

#[test]
fn test_trim_history_accepts_tool_roles_as_conversation() {
    // GIVEN a serialized history with roles beyond user/assistant/system
    let json = r#"[
        {"role": "system", "content": "rules"},
        {"role": "user", "content": "run it"},
        {"role": "tool", "content": "exit 0"},
        {"role": "function", "content": "done"}
    ]"#;
    let messages: Vec<ChatMessage> = serde_json::from_str(json).unwrap();
    assert_eq!(messages[2].role, Role::Other("tool".into()));

    // WHEN trimming under a zero budget
    let trimmed = trim_history(&messages, &create_budget(0, 0, 0));

    // THEN the unknown roles count as conversation and survive as the floor
    assert_eq!(trimmed, vec![messages[0].clone(), messages[2].clone(), messages[3].clone()]);
    assert_eq!(
        serde_json::to_value(&trimmed[1]).unwrap(),
        serde_json::json!({"role": "tool", "content": "exit 0"})
    );
}

fn arb_message() -> impl Strategy<Value = ChatMessage> {
    (0u8..4, 0usize..400).prop_map(|(role, len)| {
        let role = match role {
            0 => Role::System,
            1 => Role::User,
            2 => Role::Other("tool".into()),
            _ => Role::Assistant,
        };
        ChatMessage::new(role, "y".repeat(len))
    })
}

proptest! {
    #[test]
    fn prop_trim_keeps_all_system_messages_and_the_floor(
        messages in prop::collection::vec(arb_message(), 0..20),
        available in 0u32..300,
    ) {
        let budget = create_budget(available, 0, 0);
        let trimmed = trim_history(&messages, &budget);

        let system: Vec<_> = messages.iter().filter(|m| m.is_system()).cloned().collect();
        let conversation: Vec<_> = messages.iter().filter(|m| !m.is_system()).cloned().collect();

        prop_assert_eq!(&trimmed[..system.len()], &system[..]);

        let kept = &trimmed[system.len()..];
        prop_assert!(kept.len() >= conversation.len().min(2));
        prop_assert_eq!(kept, &conversation[conversation.len() - kept.len()..]);
    }

    #[test]
    fn prop_trim_is_idempotent(
        messages in prop::collection::vec(arb_message(), 0..20),
        available in 0u32..300,
    ) {
        let budget = create_budget(available, 0, 0);
        let once = trim_history(&messages, &budget);
        let twice = trim_history(&once, &budget);
        prop_assert_eq!(once, twice);
    }
}
