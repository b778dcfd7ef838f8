//! Flattening of role-tagged chat history into the single prompt string the
//! upstream models were tuned on.
//!
//! Each message becomes `"<Role>: <content>"` (`System`, `User`, `Assistant`);
//! messages with any other role contribute their content alone. Lines are
//! joined with `\n` and the prompt always ends with the assistant turn marker.

use crate::schemas::message::ChatMessage;

/// Marker that opens the turn the model is asked to complete.
pub const ASSISTANT_MARKER: &str = "Assistant:";

pub fn format_prompt(messages: &[ChatMessage]) -> String {
    let mut prompt = messages
        .iter()
        .map(|m| match role_prefix(&m.role) {
            Some(prefix) => format!("{prefix}: {}", m.content),
            None => m.content.clone(),
        })
        .collect::<Vec<_>>()
        .join("\n");

    if !prompt.ends_with(ASSISTANT_MARKER) {
        prompt.push('\n');
        prompt.push_str(ASSISTANT_MARKER);
    }
    prompt
}

fn role_prefix(role: &str) -> Option<&'static str> {
    match role {
        "system" => Some("System"),
        "user" => Some("User"),
        "assistant" => Some("Assistant"),
        _ => None,
    }
}
