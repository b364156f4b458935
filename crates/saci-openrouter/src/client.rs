// SPDX-FileCopyrightText: 2026 Saci Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenRouter chat-completions API.
//!
//! One synchronous call per request, no automatic retry: repeated provider
//! failures degrade every request equally until the provider recovers. The
//! request timeout is the only bound on a slow endpoint.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use tracing::debug;

use saci_config::model::OpenRouterConfig;
use saci_core::{CompletionReply, CompletionRequest, SaciError};

use crate::types::{ApiErrorResponse, ChatRequest, ChatResponse};

/// HTTP client for OpenRouter API communication.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenRouterClient {
    /// Creates a new OpenRouter client from configuration.
    ///
    /// Requires `openrouter.api_key` to be set.
    pub fn new(config: &OpenRouterConfig) -> Result<Self, SaciError> {
        let api_key = config
            .api_key
            .as_deref()
            .ok_or_else(|| SaciError::Config("openrouter.api_key is required".into()))?;
        if api_key.is_empty() {
            return Err(SaciError::Config(
                "openrouter.api_key cannot be empty".into(),
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                SaciError::Config(format!("invalid API key header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        if let Some(ref referer) = config.site_referer {
            headers.insert(
                "HTTP-Referer",
                HeaderValue::from_str(referer).map_err(|e| {
                    SaciError::Config(format!("invalid site_referer header value: {e}"))
                })?,
            );
        }
        if let Some(ref title) = config.app_title {
            headers.insert(
                "X-Title",
                HeaderValue::from_str(title).map_err(|e| {
                    SaciError::Config(format!("invalid app_title header value: {e}"))
                })?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SaciError::Completion {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Sends one completion request and extracts the reply text.
    ///
    /// `Ok(CompletionReply { text: None })` means the provider answered 2xx
    /// but the first choice carried no content.
    pub async fn chat(&self, request: &CompletionRequest) -> Result<CompletionReply, SaciError> {
        let body = ChatRequest {
            model: request.model.clone(),
            messages: request.messages.clone(),
            max_tokens: request.max_tokens,
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| SaciError::Completion {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model = %request.model, "completion response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!(
                    "OpenRouter API error ({}): {}",
                    api_err.error.code.unwrap_or(i64::from(status.as_u16())),
                    api_err.error.message
                ),
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(SaciError::Completion {
                message,
                source: None,
            });
        }

        let body = response.text().await.map_err(|e| SaciError::Completion {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| SaciError::Completion {
                message: format!("failed to parse API response: {e}"),
                source: Some(Box::new(e)),
            })?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(CompletionReply { text })
    }
}
