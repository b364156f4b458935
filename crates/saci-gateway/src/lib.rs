// SPDX-FileCopyrightText: 2026 Saci Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook HTTP gateway for the Saci relay.
//!
//! Receives Z-API webhook events on POST /webhook, normalizes them, and
//! hands them to the relay pipeline. GET /health reports liveness.

pub mod handlers;
pub mod server;

pub use server::{router, start_server, GatewayState, ServerConfig};
