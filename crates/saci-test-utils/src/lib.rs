// SPDX-FileCopyrightText: 2026 Saci Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scriptable in-process providers for exercising the relay pipeline
//! without HTTP. Each mock records the calls it receives and replays a
//! scripted queue of outcomes; when the queue runs dry it falls back to a
//! fixed default so tests only script the interesting calls.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use saci_core::{
    CompletionProvider, CompletionReply, CompletionRequest, DeliveryProvider, SaciError,
};

/// One scripted outcome for [`MockCompletion`].
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Reply with the given text.
    Text(String),
    /// A 2xx response that carried no usable content.
    Empty,
    /// The provider call fails outright.
    Fail(String),
}

#[derive(Default)]
struct CompletionState {
    script: VecDeque<MockReply>,
    requests: Vec<CompletionRequest>,
}

/// Completion provider that replays scripted replies and records requests.
#[derive(Default)]
pub struct MockCompletion {
    state: Mutex<CompletionState>,
}

impl MockCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply; outcomes are consumed in FIFO order.
    pub fn push(&self, reply: MockReply) {
        self.state.lock().unwrap().script.push_back(reply);
    }

    /// Requests seen so far, in call order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletion {
    fn name(&self) -> &str {
        "mock-completion"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionReply, SaciError> {
        let reply = {
            let mut state = self.state.lock().unwrap();
            state.requests.push(request);
            state.script.pop_front()
        };
        match reply {
            None => Ok(CompletionReply {
                text: Some("mock reply".to_owned()),
            }),
            Some(MockReply::Text(text)) => Ok(CompletionReply { text: Some(text) }),
            Some(MockReply::Empty) => Ok(CompletionReply { text: None }),
            Some(MockReply::Fail(message)) => Err(SaciError::Completion {
                message,
                source: None,
            }),
        }
    }
}

#[derive(Default)]
struct DeliveryState {
    fail_next: VecDeque<String>,
    sent: Vec<(String, String)>,
}

/// Delivery provider that records sends and can be scripted to fail.
#[derive(Default)]
pub struct MockDelivery {
    state: Mutex<DeliveryState>,
}

impl MockDelivery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `send_text` call fail with the given message.
    pub fn fail_next(&self, message: &str) {
        self.state
            .lock()
            .unwrap()
            .fail_next
            .push_back(message.to_owned());
    }

    /// `(phone, message)` pairs delivered so far, in call order.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().sent.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().sent.len()
    }
}

#[async_trait]
impl DeliveryProvider for MockDelivery {
    fn name(&self) -> &str {
        "mock-delivery"
    }

    async fn send_text(&self, phone: &str, message: &str) -> Result<(), SaciError> {
        let mut state = self.state.lock().unwrap();
        state.sent.push((phone.to_owned(), message.to_owned()));
        if let Some(message) = state.fail_next.pop_front() {
            return Err(SaciError::Delivery {
                message,
                source: None,
            });
        }
        Ok(())
    }
}
