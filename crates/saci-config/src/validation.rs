// SPDX-FileCopyrightText: 2026 Saci Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes. Collects all errors instead of failing fast.

use thiserror::Error;

use crate::model::SaciConfig;

/// A configuration error, either from parsing or from semantic validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment parse/merge error (invalid TOML, type mismatch, unknown key).
    #[error("{0}")]
    Parse(#[from] figment::Error),

    /// Semantic validation failure.
    #[error("{message}")]
    Validation { message: String },
}

/// Render a list of [`ConfigError`]s to stderr.
pub fn render_errors(errors: &[ConfigError]) {
    for error in errors {
        eprintln!("error: {error}");
    }
}

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)`
/// with every collected validation error.
pub fn validate_config(config: &SaciConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let addr = config.gateway.bind_address.trim();
    if addr.is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.bind_address must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = addr.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = addr
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!(
                    "gateway.bind_address `{addr}` is not a valid IP address or hostname"
                ),
            });
        }
    }

    if config.relay.context_turns == 0 {
        errors.push(ConfigError::Validation {
            message: "relay.context_turns must be at least 1".to_string(),
        });
    }

    if config.relay.max_threads == 0 {
        errors.push(ConfigError::Validation {
            message: "relay.max_threads must be at least 1".to_string(),
        });
    }

    if config.openrouter.max_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "openrouter.max_tokens must be at least 1".to_string(),
        });
    }

    if config.openrouter.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "openrouter.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.zapi.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "zapi.timeout_secs must be at least 1".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
