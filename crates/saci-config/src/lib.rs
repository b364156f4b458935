// SPDX-FileCopyrightText: 2026 Saci Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Saci relay.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, and environment
//! variable overrides via the `SACI_` prefix.
//!
//! # Usage
//!
//! ```no_run
//! let config = saci_config::load_and_validate().expect("config errors");
//! println!("agent name: {}", config.agent.name);
//! ```

pub mod loader;
pub mod model;
pub mod validation;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::SaciConfig;
pub use validation::{render_errors, ConfigError};

/// Load configuration from the XDG hierarchy and validate it.
///
/// Returns either a valid [`SaciConfig`] or the list of all parse and
/// validation errors encountered.
pub fn load_and_validate() -> Result<SaciConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![ConfigError::Parse(err)]),
    }
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<SaciConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![ConfigError::Parse(err)]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_and_validate_str_accepts_defaults() {
        let config = load_and_validate_str("").unwrap();
        assert_eq!(config.agent.name, "saci");
    }

    #[test]
    fn load_and_validate_str_reports_validation_errors() {
        let errors = load_and_validate_str(
            r#"
            [relay]
            context_turns = 0
            "#,
        )
        .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("context_turns"));
    }
}
