// SPDX-FileCopyrightText: 2026 Saci Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Z-API delivery provider for the Saci relay.
//!
//! Implements [`DeliveryProvider`] over the Z-API send-text endpoint, using
//! the per-instance templated URL and the account `Client-Token` header.

pub mod client;

use async_trait::async_trait;

use saci_core::{DeliveryProvider, SaciError};

pub use client::ZapiClient;

#[async_trait]
impl DeliveryProvider for ZapiClient {
    fn name(&self) -> &str {
        "zapi"
    }

    async fn send_text(&self, phone: &str, message: &str) -> Result<(), SaciError> {
        ZapiClient::send_text(self, phone, message).await
    }
}
