// SPDX-FileCopyrightText: 2026 Saci Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Saci relay crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Role of a conversation turn, matching the chat-completions wire format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single turn in a conversation thread. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    /// Creates a turn timestamped at the current instant.
    pub fn now(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A normalized inbound webhook event. Transient: created per webhook call
/// and discarded after handling.
#[derive(Debug, Clone)]
pub struct InboundEvent {
    /// Sender identifier (phone number).
    pub sender: String,
    /// Message text.
    pub text: String,
    /// True when the message originated from the bot's own account.
    pub from_me: bool,
}

/// One message in the list submitted to the completion provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// A request to the completion provider: ordered message list plus model
/// identifier and output cap.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

/// Reply from the completion provider.
///
/// `text` is `None` when the provider answered 2xx but the response carried
/// no usable content; the pipeline substitutes the empty-reply sentinel in
/// that case. Call failures are reported as [`SaciError::Completion`]
/// instead.
///
/// [`SaciError::Completion`]: crate::SaciError::Completion
#[derive(Debug, Clone)]
pub struct CompletionReply {
    pub text: Option<String>,
}

/// A row of the durable chat log. Append-only, never mutated or deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRecord {
    pub phone: String,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
