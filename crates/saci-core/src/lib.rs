// SPDX-FileCopyrightText: 2026 Saci Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Saci relay.
//!
//! Defines the error type, the conversation domain types, and the provider
//! traits implemented by the OpenRouter and Z-API clients (and by the test
//! mocks).

pub mod error;
pub mod traits;
pub mod types;

pub use error::SaciError;
pub use traits::{CompletionProvider, DeliveryProvider};
pub use types::{
    ChatMessage, ChatRecord, CompletionReply, CompletionRequest, ConversationTurn, InboundEvent,
    Role,
};
