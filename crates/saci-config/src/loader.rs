// SPDX-FileCopyrightText: 2026 Saci Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./saci.toml` > `~/.config/saci/saci.toml` >
//! `/etc/saci/saci.toml`, with environment variable overrides via the
//! `SACI_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::SaciConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/saci/saci.toml` (system-wide)
/// 3. `~/.config/saci/saci.toml` (user XDG config)
/// 4. `./saci.toml` (local directory)
/// 5. `SACI_*` environment variables
pub fn load_config() -> Result<SaciConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SaciConfig::default()))
        .merge(Toml::file("/etc/saci/saci.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("saci/saci.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("saci.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<SaciConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SaciConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SaciConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SaciConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `SACI_ZAPI_CLIENT_TOKEN` must map to
/// `zapi.client_token`, not `zapi.client.token`.
fn env_provider() -> Env {
    Env::prefixed("SACI_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped,
        // e.g. SACI_OPENROUTER_API_KEY -> "openrouter_api_key".
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("relay_", "relay.", 1)
            .replacen("openrouter_", "openrouter.", 1)
            .replacen("zapi_", "zapi.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("gateway_", "gateway.", 1);
        mapped.into()
    })
}
