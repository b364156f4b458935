// SPDX-FileCopyrightText: 2026 Saci Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Saci relay.

use thiserror::Error;

/// The primary error type used across all Saci crates.
///
/// Each variant corresponds to one failure boundary of the relay: the
/// configuration surface, the completion provider call, the delivery
/// provider call, and the durable log. All failures are local to a single
/// request; none are fatal to the process.
#[derive(Debug, Error)]
pub enum SaciError {
    /// Configuration errors (invalid TOML, missing required credentials).
    #[error("configuration error: {0}")]
    Config(String),

    /// Completion provider errors (transport failure, non-2xx status,
    /// malformed response body).
    #[error("completion error: {message}")]
    Completion {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Delivery provider errors (transport failure, non-2xx status).
    #[error("delivery error: {message}")]
    Delivery {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Durable log errors (connection, migration, query failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_has_all_variants() {
        let _config = SaciError::Config("test".into());
        let _completion = SaciError::Completion {
            message: "test".into(),
            source: None,
        };
        let _delivery = SaciError::Delivery {
            message: "test".into(),
            source: Some(Box::new(std::io::Error::other("test"))),
        };
        let _storage = SaciError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _internal = SaciError::Internal("test".into());
    }

    #[test]
    fn error_display_includes_detail() {
        let err = SaciError::Completion {
            message: "API returned 503".into(),
            source: None,
        };
        assert_eq!(err.to_string(), "completion error: API returned 503");

        let err = SaciError::Delivery {
            message: "send-text failed".into(),
            source: None,
        };
        assert_eq!(err.to_string(), "delivery error: send-text failed");
    }
}
