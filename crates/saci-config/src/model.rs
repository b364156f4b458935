// SPDX-FileCopyrightText: 2026 Saci Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Saci relay.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};

/// Top-level Saci configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values; credentials have no defaults and are checked at serve time.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SaciConfig {
    /// Agent identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Conversation memory and prompt settings.
    #[serde(default)]
    pub relay: RelayConfig,

    /// OpenRouter completion API settings.
    #[serde(default)]
    pub openrouter: OpenRouterConfig,

    /// Z-API delivery settings.
    #[serde(default)]
    pub zapi: ZapiConfig,

    /// Durable chat log settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Webhook HTTP server settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Agent identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the agent.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "saci".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Conversation memory and prompt configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RelayConfig {
    /// Inline system instruction. Overridden by `system_prompt_file` when
    /// that file is readable.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Path to a text file containing the system instruction. Takes
    /// precedence over `system_prompt`; read errors fall back to the
    /// inline prompt.
    #[serde(default)]
    pub system_prompt_file: Option<String>,

    /// Number of prior turns included in the context window.
    #[serde(default = "default_context_turns")]
    pub context_turns: usize,

    /// Maximum number of per-sender threads kept in memory before
    /// least-recently-used eviction.
    #[serde(default = "default_max_threads")]
    pub max_threads: usize,

    /// Reply used when the completion provider answers with no content.
    #[serde(default = "default_sentinel_empty")]
    pub sentinel_empty: String,

    /// Reply used when the completion call fails outright.
    #[serde(default = "default_sentinel_error")]
    pub sentinel_error: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            system_prompt_file: None,
            context_turns: default_context_turns(),
            max_threads: default_max_threads(),
            sentinel_empty: default_sentinel_empty(),
            sentinel_error: default_sentinel_error(),
        }
    }
}

fn default_system_prompt() -> String {
    "You are a helpful assistant answering WhatsApp messages. \
     Keep replies short, warm, and conversational."
        .to_string()
}

fn default_context_turns() -> usize {
    4
}

fn default_max_threads() -> usize {
    1024
}

fn default_sentinel_empty() -> String {
    "[Sem resposta da IA]".to_string()
}

fn default_sentinel_error() -> String {
    "[Erro ao consultar a IA]".to_string()
}

/// OpenRouter completion API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenRouterConfig {
    /// API key for bearer authentication. Required for `serve`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier submitted with every request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the completions API.
    #[serde(default = "default_openrouter_base_url")]
    pub base_url: String,

    /// Output token cap per completion.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds.
    #[serde(default = "default_completion_timeout_secs")]
    pub timeout_secs: u64,

    /// Optional `HTTP-Referer` header value (OpenRouter attribution).
    #[serde(default)]
    pub site_referer: Option<String>,

    /// Optional `X-Title` header value (OpenRouter attribution).
    #[serde(default)]
    pub app_title: Option<String>,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_openrouter_base_url(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_completion_timeout_secs(),
            site_referer: None,
            app_title: None,
        }
    }
}

fn default_model() -> String {
    "google/gemini-flash-1.5".to_string()
}

fn default_openrouter_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_completion_timeout_secs() -> u64 {
    30
}

/// Z-API delivery configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ZapiConfig {
    /// Z-API instance identifier. Required for `serve`.
    #[serde(default)]
    pub instance_id: Option<String>,

    /// Z-API instance token. Required for `serve`.
    #[serde(default)]
    pub instance_token: Option<String>,

    /// Account-level client token sent as the `Client-Token` header.
    /// Required for `serve`.
    #[serde(default)]
    pub client_token: Option<String>,

    /// Base URL of the Z-API.
    #[serde(default = "default_zapi_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_delivery_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ZapiConfig {
    fn default() -> Self {
        Self {
            instance_id: None,
            instance_token: None,
            client_token: None,
            base_url: default_zapi_base_url(),
            timeout_secs: default_delivery_timeout_secs(),
        }
    }
}

fn default_zapi_base_url() -> String {
    "https://api.z-api.io".to_string()
}

fn default_delivery_timeout_secs() -> u64 {
    30
}

/// Durable chat log configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file. Empty disables persistence.
    #[serde(default)]
    pub database_path: String,
}

/// Webhook HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Address to bind the webhook server to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}
