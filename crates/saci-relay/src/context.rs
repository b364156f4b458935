// SPDX-FileCopyrightText: 2026 Saci Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt context assembly.
//!
//! Every completion request is built the same way: the system prompt first,
//! then the last `window` remembered turns in chronological order, then the
//! new user message. The new message is never drawn from the window, so a
//! request always ends with exactly one fresh user entry.

use tracing::warn;

use saci_core::{ChatMessage, ConversationTurn, Role};

/// Builds the ordered message list for one completion call.
pub fn assemble(
    system_prompt: &str,
    history: &[ConversationTurn],
    window: usize,
    user_text: &str,
) -> Vec<ChatMessage> {
    let tail_start = history.len().saturating_sub(window);
    let mut messages = Vec::with_capacity(history.len() - tail_start + 2);

    messages.push(ChatMessage {
        role: Role::System,
        content: system_prompt.to_owned(),
    });
    for turn in &history[tail_start..] {
        messages.push(ChatMessage {
            role: turn.role,
            content: turn.content.clone(),
        });
    }
    messages.push(ChatMessage {
        role: Role::User,
        content: user_text.to_owned(),
    });
    messages
}

/// Resolves the system prompt: the file wins when configured and readable,
/// otherwise the inline prompt is used.
pub fn load_system_prompt(inline: &str, file: Option<&str>) -> String {
    if let Some(path) = file {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let contents = contents.trim();
                if !contents.is_empty() {
                    return contents.to_owned();
                }
                warn!(path, "system prompt file is empty, using inline prompt");
            }
            Err(e) => {
                warn!(path, error = %e, "failed to read system prompt file, using inline prompt");
            }
        }
    }
    inline.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn turn(role: Role, content: &str) -> ConversationTurn {
        ConversationTurn::now(role, content.to_owned())
    }

    #[test]
    fn assemble_orders_system_history_then_user() {
        let history = vec![turn(Role::User, "oi"), turn(Role::Assistant, "olá!")];
        let messages = assemble("prompt", &history, 4, "tudo bem?");

        let pairs: Vec<(Role, &str)> = messages
            .iter()
            .map(|m| (m.role, m.content.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (Role::System, "prompt"),
                (Role::User, "oi"),
                (Role::Assistant, "olá!"),
                (Role::User, "tudo bem?"),
            ]
        );
    }

    #[test]
    fn assemble_with_empty_history_is_system_plus_user() {
        let messages = assemble("prompt", &[], 4, "oi");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "oi");
    }

    #[test]
    fn assemble_keeps_only_the_newest_window() {
        let history: Vec<ConversationTurn> = (0..6)
            .map(|i| turn(Role::User, &format!("m{i}")))
            .collect();
        let messages = assemble("prompt", &history, 2, "new");

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[1].content, "m4");
        assert_eq!(messages[2].content, "m5");
        assert_eq!(messages[3].content, "new");
    }

    #[test]
    fn prompt_file_overrides_inline() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "from file").unwrap();

        let prompt = load_system_prompt("inline", Some(file.path().to_str().unwrap()));
        assert_eq!(prompt, "from file");
    }

    #[test]
    fn missing_prompt_file_falls_back_to_inline() {
        let prompt = load_system_prompt("inline", Some("/nonexistent/prompt.txt"));
        assert_eq!(prompt, "inline");
    }

    #[test]
    fn empty_prompt_file_falls_back_to_inline() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let prompt = load_system_prompt("inline", Some(file.path().to_str().unwrap()));
        assert_eq!(prompt, "inline");
    }

    #[test]
    fn no_file_uses_inline() {
        assert_eq!(load_system_prompt("inline", None), "inline");
    }
}
