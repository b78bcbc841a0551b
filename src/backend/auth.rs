// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer tokens for backend calls via the OAuth client-credentials grant.
//!
//! A token is requested for every authenticated call; nothing is cached.

use reqwest::Client;
use serde::Deserialize;

use crate::{config::BackendAuthConfig, error::GatewayError};

#[derive(Debug, Deserialize)]
struct OAuthTokenResponse {
    access_token: String,
}

#[derive(Debug, Clone)]
pub struct ClientCredentials {
    config: BackendAuthConfig,
    http: Client,
}

impl ClientCredentials {
    pub fn new(config: BackendAuthConfig, http: Client) -> Self {
        Self { config, http }
    }

    pub async fn access_token(&self) -> Result<String, GatewayError> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];

        let response = self
            .http
            .post(self.config.token_url.clone())
            .form(&form)
            .send()
            .await
            .map_err(|e| GatewayError::BackendTransport(format!("token request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(GatewayError::BackendTransport(format!(
                "token endpoint returned HTTP {}",
                response.status()
            )));
        }

        let token: OAuthTokenResponse = response.json().await.map_err(|e| {
            GatewayError::BackendTransport(format!("invalid token response: {e}"))
        })?;
        Ok(token.access_token)
    }
}
