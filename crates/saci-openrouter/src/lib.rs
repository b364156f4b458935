// SPDX-FileCopyrightText: 2026 Saci Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenRouter completion provider for the Saci relay.
//!
//! Implements [`CompletionProvider`] over the OpenRouter chat-completions
//! API: bearer authentication, optional attribution headers, and uniform
//! error mapping.

pub mod client;
pub mod types;

use async_trait::async_trait;

use saci_core::{CompletionProvider, CompletionReply, CompletionRequest, SaciError};

pub use client::OpenRouterClient;

#[async_trait]
impl CompletionProvider for OpenRouterClient {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionReply, SaciError> {
        self.chat(&request).await
    }
}
