// SPDX-FileCopyrightText: 2026 Saci Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation memory and the relay pipeline.
//!
//! This crate owns everything between a normalized inbound event and the
//! outbound reply: the per-sender sliding window ([`store`]), prompt
//! assembly ([`context`]), and the single orchestration path ([`pipeline`]).

pub mod context;
pub mod pipeline;
pub mod store;

pub use context::{assemble, load_system_prompt};
pub use pipeline::{Pipeline, PipelineConfig, RelayOutcome};
pub use store::ThreadCache;
