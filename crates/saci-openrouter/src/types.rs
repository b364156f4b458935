// SPDX-FileCopyrightText: 2026 Saci Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the OpenRouter chat-completions API.

use saci_core::ChatMessage;
use serde::{Deserialize, Serialize};

/// Request body for `POST /chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

/// Response body for a successful completion.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// One completion choice; only the first is used.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

/// The message inside a choice. `content` may be absent or null.
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Detail of an API error.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(default)]
    pub code: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use saci_core::Role;

    #[test]
    fn chat_request_serializes_wire_shape() {
        let req = ChatRequest {
            model: "google/gemini-flash-1.5".into(),
            messages: vec![ChatMessage {
                role: Role::User,
                content: "Oi".into(),
            }],
            max_tokens: 500,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "google/gemini-flash-1.5");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Oi");
        assert_eq!(json["max_tokens"], 500);
    }

    #[test]
    fn chat_response_parses_content() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Olá!"}}]}"#;
        let resp: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            resp.choices[0].message.content.as_deref(),
            Some("Olá!")
        );
    }

    #[test]
    fn chat_response_tolerates_missing_fields() {
        let resp: ChatResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.choices.is_empty());

        let body = r#"{"choices":[{"message":{"role":"assistant"}}]}"#;
        let resp: ChatResponse = serde_json::from_str(body).unwrap();
        assert!(resp.choices[0].message.content.is_none());
    }

    #[test]
    fn api_error_parses() {
        let body = r#"{"error":{"message":"Rate limited","code":429}}"#;
        let err: ApiErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(err.error.message, "Rate limited");
        assert_eq!(err.error.code, Some(429));
    }
}
