// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HTTP implementation of [`BackendProxy`].

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use super::{auth::ClientCredentials, ApiName, BackendProxy};
use crate::{config::BackendConfig, error::GatewayError};

/// Long-lived client for the identity-provider platform.
///
/// Built once at startup and shared by every request.
#[derive(Debug, Clone)]
pub struct HttpBackendClient {
    config: BackendConfig,
    credentials: Option<ClientCredentials>,
    http: Client,
}

impl HttpBackendClient {
    pub fn new(config: BackendConfig) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                GatewayError::BackendTransport(format!("failed to build HTTP client: {e}"))
            })?;
        let credentials = config
            .auth
            .clone()
            .map(|auth| ClientCredentials::new(auth, http.clone()));

        Ok(Self {
            config,
            credentials,
            http,
        })
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }
}

#[async_trait]
impl BackendProxy for HttpBackendClient {
    async fn call(
        &self,
        api: ApiName,
        body: Value,
        use_auth: bool,
    ) -> Result<Option<Value>, GatewayError> {
        let url = self.config.endpoint(api).map_err(|e| {
            GatewayError::BackendTransport(format!("invalid URL for {api}: {e}"))
        })?;

        let mut request = self.http.post(url).json(&body);
        if use_auth {
            match &self.credentials {
                Some(credentials) => {
                    let token = credentials.access_token().await?;
                    request = request.bearer_auth(token);
                }
                None => warn!(api = %api, "bearer token requested but no backend credentials configured"),
            }
        }

        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::BackendTransport(format!("{api} request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::BackendTransport(format!(
                "{api} returned HTTP {status}"
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GatewayError::BackendTransport(format!("{api} body read failed: {e}")))?;
        debug!(api = %api, status = %status, bytes = bytes.len(), "backend call completed");

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| GatewayError::BindingBackend(format!("{api} returned invalid JSON: {e}")))?;
        Ok(match value {
            Value::Null => None,
            other => Some(other),
        })
    }
}
