// SPDX-FileCopyrightText: 2026 Saci Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Z-API send-text endpoint.
//!
//! One attempt per message, no retry. The provider's message id is not
//! surfaced: delivery is fire-and-forget from the pipeline's perspective.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use serde::Serialize;
use tracing::debug;

use saci_config::model::ZapiConfig;
use saci_core::SaciError;

/// Request body for `POST .../send-text`.
#[derive(Debug, Clone, Serialize)]
struct SendTextBody<'a> {
    phone: &'a str,
    message: &'a str,
}

/// HTTP client for Z-API communication.
#[derive(Debug, Clone)]
pub struct ZapiClient {
    client: reqwest::Client,
    send_text_url: String,
}

impl ZapiClient {
    /// Creates a new Z-API client from configuration.
    ///
    /// Requires `zapi.instance_id`, `zapi.instance_token`, and
    /// `zapi.client_token` to be set.
    pub fn new(config: &ZapiConfig) -> Result<Self, SaciError> {
        let instance_id = require(&config.instance_id, "zapi.instance_id")?;
        let instance_token = require(&config.instance_token, "zapi.instance_token")?;
        let client_token = require(&config.client_token, "zapi.client_token")?;

        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        headers.insert(
            "Client-Token",
            HeaderValue::from_str(client_token).map_err(|e| {
                SaciError::Config(format!("invalid client_token header value: {e}"))
            })?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SaciError::Delivery {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        let send_text_url = format!(
            "{}/instances/{}/token/{}/send-text",
            config.base_url.trim_end_matches('/'),
            instance_id,
            instance_token
        );

        Ok(Self {
            client,
            send_text_url,
        })
    }

    /// Sends one text message to `phone`.
    pub async fn send_text(&self, phone: &str, message: &str) -> Result<(), SaciError> {
        let body = SendTextBody { phone, message };

        let response = self
            .client
            .post(&self.send_text_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| SaciError::Delivery {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, phone, "delivery response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SaciError::Delivery {
                message: format!("Z-API returned {status}: {body}"),
                source: None,
            });
        }

        Ok(())
    }
}

fn require<'a>(value: &'a Option<String>, key: &str) -> Result<&'a str, SaciError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(SaciError::Config(format!("{key} is required"))),
    }
}
