// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Backend Proxy
//!
//! Executes named operations against the identity-provider platform.
//!
//! Every call is attempted exactly once. A `null` or empty body comes back as
//! `Ok(None)`; callers decide whether that is a failure.

pub mod auth;
pub mod client;

use std::fmt;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::error::GatewayError;

pub use auth::ClientCredentials;
pub use client::HttpBackendClient;

/// Backend operations the gateway knows how to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiName {
    BindingOtp,
    WalletBinding,
}

impl ApiName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiName::BindingOtp => "BINDING_OTP",
            ApiName::WalletBinding => "WALLET_BINDING",
        }
    }
}

impl fmt::Display for ApiName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait BackendProxy: Send + Sync {
    /// POST `body` to the operation and return the decoded JSON body.
    ///
    /// `use_auth` requests a bearer token for this call.
    async fn call(
        &self,
        api: ApiName,
        body: Value,
        use_auth: bool,
    ) -> Result<Option<Value>, GatewayError>;
}

/// Error entry inside a backend envelope.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BackendErrorEntry {
    #[serde(default)]
    pub error_code: String,
    #[serde(default, alias = "message")]
    pub error_message: String,
}

/// The backend's own response wrapper.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BackendEnvelope<T> {
    pub response: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<BackendErrorEntry>>,
}

impl<T> BackendEnvelope<T> {
    /// The payload, or a `BindingBackend` error describing why there is none.
    pub fn into_response(self) -> Result<T, GatewayError> {
        let errors = self.errors.unwrap_or_default();
        if let Some(first) = errors.first() {
            return Err(GatewayError::BindingBackend(format!(
                "backend rejected the request: {} ({})",
                first.error_message, first.error_code
            )));
        }
        self.response.ok_or_else(|| {
            GatewayError::BindingBackend("backend returned an empty response".to_string())
        })
    }
}

/// Decode a backend body into its envelope; a missing body is an error.
pub fn decode_envelope<T: DeserializeOwned>(
    api: ApiName,
    body: Option<Value>,
) -> Result<BackendEnvelope<T>, GatewayError> {
    let body = body.ok_or_else(|| {
        GatewayError::BindingBackend(format!("no response from backend operation {api}"))
    })?;
    serde_json::from_value(body).map_err(|e| {
        GatewayError::BindingBackend(format!("unexpected response from {api}: {e}"))
    })
}
