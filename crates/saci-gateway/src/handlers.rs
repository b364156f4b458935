// SPDX-FileCopyrightText: 2026 Saci Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the webhook gateway.
//!
//! Handles POST /webhook and GET /health. Business failures inside the
//! pipeline never surface as HTTP errors: the webhook is always acked with
//! 200 so the messaging provider does not redeliver the event.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use saci_core::InboundEvent;
use saci_relay::RelayOutcome;

use crate::server::GatewayState;

/// Inbound Z-API webhook body.
///
/// Z-API deployments drift between English and Portuguese field names for
/// the text envelope, so both spellings are accepted. Unknown fields are
/// ignored: real payloads carry many more fields than the relay reads.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    /// Sender phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// True when the event echoes a message sent by this account.
    #[serde(default)]
    pub from_me: bool,
    /// Text envelope, absent for media and status events.
    #[serde(default, alias = "texto")]
    pub text: Option<TextPayload>,
}

/// Text envelope inside a webhook payload.
#[derive(Debug, Deserialize)]
pub struct TextPayload {
    #[serde(default, alias = "mensagem")]
    pub message: Option<String>,
}

/// Response body for POST /webhook.
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    /// "ok" when a reply was relayed, "ignored" otherwise.
    pub status: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_secs: u64,
}

/// POST /webhook
///
/// Normalizes the payload into an [`InboundEvent`] and hands it to the
/// pipeline. Missing fields become empty strings and are filtered there, so
/// media and status events fall out as ignored rather than 4xx.
pub async fn post_webhook(
    State(state): State<GatewayState>,
    Json(payload): Json<WebhookPayload>,
) -> Json<WebhookAck> {
    let event = InboundEvent {
        sender: payload.phone.unwrap_or_default(),
        text: payload
            .text
            .and_then(|t| t.message)
            .unwrap_or_default(),
        from_me: payload.from_me,
    };

    let outcome = state.pipeline.handle(event).await;
    let status = match outcome {
        RelayOutcome::Replied => "ok",
        RelayOutcome::Ignored => "ignored",
    };
    Json(WebhookAck {
        status: status.to_owned(),
    })
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}
