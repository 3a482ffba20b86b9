use crate::diffing::parser::{find_unterminated_blocks, parse_ai_response};
use crate::exceptions::CodepatchError;
use crate::fs::read_input;
use std::path::Path;

pub fn run(reply_path: Option<&Path>) -> Result<(), CodepatchError> {
    let reply = read_input(reply_path)?;
    for block in find_unterminated_blocks(&reply) {
        tracing::warn!(block = %block, "unterminated block treated as commentary");
    }

    let parsed = parse_ai_response(&reply);
    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(())
}
