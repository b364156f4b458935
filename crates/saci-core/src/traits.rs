// SPDX-FileCopyrightText: 2026 Saci Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider traits at the relay's two outbound seams.
//!
//! The pipeline talks to the completion and delivery providers exclusively
//! through these traits, which keeps the orchestration testable with mock
//! implementations.

use async_trait::async_trait;

use crate::error::SaciError;
use crate::types::{CompletionReply, CompletionRequest};

/// An LLM completion endpoint.
///
/// A single synchronous call with no automatic retry: any transport error,
/// non-2xx status, or unparseable body is mapped to
/// [`SaciError::Completion`].
#[async_trait]
pub trait CompletionProvider: Send + Sync + 'static {
    /// Human-readable name of this provider, for logging.
    fn name(&self) -> &str;

    /// Submits the assembled message list and returns the reply.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionReply, SaciError>;
}

/// A messaging-relay send endpoint.
///
/// Fire-and-forget from the pipeline's perspective: the provider's message
/// id is not surfaced, and failures map to [`SaciError::Delivery`].
#[async_trait]
pub trait DeliveryProvider: Send + Sync + 'static {
    /// Human-readable name of this provider, for logging.
    fn name(&self) -> &str;

    /// Sends `message` to the chat thread identified by `phone`.
    async fn send_text(&self, phone: &str, message: &str) -> Result<(), SaciError>;
}
