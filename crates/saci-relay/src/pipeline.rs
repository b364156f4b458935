// SPDX-FileCopyrightText: 2026 Saci Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The relay pipeline: one code path from inbound event to delivered reply.
//!
//! For every accepted event the pipeline, holding the sender's thread lock:
//! snapshots the window, assembles the prompt, calls the completion
//! provider, substitutes a sentinel reply on failure, appends both turns to
//! the window, and writes the durable log best-effort. Delivery happens
//! after the lock is released, so a slow send never blocks the sender's next
//! message from being remembered in order.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use saci_core::{
    ChatRecord, CompletionProvider, CompletionRequest, ConversationTurn, DeliveryProvider,
    InboundEvent, Role,
};
use saci_storage::ChatLog;

use crate::context;
use crate::store::ThreadCache;

/// Tuning for the relay pipeline, resolved from configuration at startup.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Resolved system prompt text.
    pub system_prompt: String,
    /// Model identifier passed through to the completion provider.
    pub model: String,
    /// Output token cap per completion.
    pub max_tokens: u32,
    /// Remembered turns included in each prompt.
    pub context_turns: usize,
    /// Maximum concurrently remembered senders.
    pub max_threads: usize,
    /// Reply text when the provider returns no usable content.
    pub sentinel_empty: String,
    /// Reply text when the completion call fails.
    pub sentinel_error: String,
}

/// What the pipeline did with an inbound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// The event was filtered out before any provider call.
    Ignored,
    /// A reply was produced and a delivery attempt was made.
    Replied,
}

/// Orchestrates completion, memory, persistence, and delivery.
pub struct Pipeline {
    completion: Arc<dyn CompletionProvider>,
    delivery: Arc<dyn DeliveryProvider>,
    log: Option<Arc<ChatLog>>,
    cache: ThreadCache,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(
        completion: Arc<dyn CompletionProvider>,
        delivery: Arc<dyn DeliveryProvider>,
        log: Option<Arc<ChatLog>>,
        config: PipelineConfig,
    ) -> Self {
        let cache = ThreadCache::new(config.max_threads, config.context_turns);
        Self {
            completion,
            delivery,
            log,
            cache,
            config,
        }
    }

    /// Handles one inbound event end to end.
    ///
    /// Never fails: completion errors become sentinel replies and delivery
    /// or persistence failures are logged. The webhook caller always acks.
    pub async fn handle(&self, event: InboundEvent) -> RelayOutcome {
        if event.from_me {
            debug!(sender = %event.sender, "ignoring echo of own message");
            return RelayOutcome::Ignored;
        }
        let sender = event.sender.trim();
        let text = event.text.trim();
        if sender.is_empty() || text.is_empty() {
            debug!("ignoring event without sender or text");
            return RelayOutcome::Ignored;
        }

        let entry = self.cache.entry(sender);
        let reply = {
            let mut thread = entry.lock().await;

            let history = thread.snapshot();
            let messages = context::assemble(
                &self.config.system_prompt,
                &history,
                self.config.context_turns,
                text,
            );
            let request = CompletionRequest {
                model: self.config.model.clone(),
                messages,
                max_tokens: self.config.max_tokens,
            };

            let reply = match self.completion.complete(request).await {
                Ok(reply) => match reply.text {
                    Some(text) => text,
                    None => {
                        warn!(sender, provider = self.completion.name(),
                            "completion returned no content, substituting sentinel");
                        self.config.sentinel_empty.clone()
                    }
                },
                Err(e) => {
                    error!(sender, provider = self.completion.name(), error = %e,
                        "completion call failed, substituting sentinel");
                    self.config.sentinel_error.clone()
                }
            };

            let user_turn = ConversationTurn::now(Role::User, text);
            let assistant_turn = ConversationTurn::now(Role::Assistant, reply.clone());
            thread.append(user_turn.clone());
            thread.append(assistant_turn.clone());

            self.persist(sender, &user_turn).await;
            self.persist(sender, &assistant_turn).await;

            reply
        };

        match self.delivery.send_text(sender, &reply).await {
            Ok(()) => info!(sender, provider = self.delivery.name(), "reply delivered"),
            Err(e) => {
                error!(sender, provider = self.delivery.name(), error = %e,
                    "reply delivery failed");
            }
        }
        RelayOutcome::Replied
    }

    /// Best-effort write to the durable log; failures are logged only.
    async fn persist(&self, sender: &str, turn: &ConversationTurn) {
        let Some(log) = &self.log else {
            return;
        };
        let record = ChatRecord {
            phone: sender.to_owned(),
            role: turn.role,
            content: turn.content.clone(),
            created_at: turn.timestamp,
        };
        if let Err(e) = log.append(&record).await {
            warn!(sender, error = %e, "failed to persist chat turn");
        }
    }

    /// The in-memory conversation store.
    pub fn thread_cache(&self) -> &ThreadCache {
        &self.cache
    }
}
