// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! OAuth authorization-code exchange.
//!
//! Unlike the other operations this one is not enveloped: the upstream token
//! response body is returned to the caller as-is. Only one issuer endpoint is
//! supported.

use std::collections::HashMap;

use reqwest::{header, Client};
use tracing::{info, warn};

use crate::{config::TokenExchangeConfig, error::GatewayError, models::TokenRequest};

const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Raw upstream token response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenExchangeReply {
    pub content_type: String,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct TokenExchangeService {
    config: TokenExchangeConfig,
    http: Client,
}

impl TokenExchangeService {
    pub fn new(config: TokenExchangeConfig) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::TokenExchange(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub async fn exchange_code(
        &self,
        params: &HashMap<String, String>,
    ) -> Result<TokenExchangeReply, GatewayError> {
        let request = TokenRequest::from_params(params);
        info!(
            client_id = request.client_id.as_deref().unwrap_or_default(),
            grant_type = request.grant_type.as_deref().unwrap_or_default(),
            redirect_uri = request.redirect_uri.as_deref().unwrap_or_default(),
            has_code = request.code.is_some(),
            "started token exchange"
        );

        let response = self
            .http
            .post(self.config.endpoint.clone())
            .header(header::ACCEPT, DEFAULT_CONTENT_TYPE)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "token endpoint not reachable");
                GatewayError::TokenExchange(format!("token endpoint not reachable: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "token endpoint rejected the exchange");
            return Err(GatewayError::TokenExchange(format!(
                "token endpoint returned HTTP {status}"
            )));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let body = response
            .bytes()
            .await
            .map_err(|e| GatewayError::TokenExchange(format!("token response read failed: {e}")))?;

        info!(bytes = body.len(), "completed token exchange");
        Ok(TokenExchangeReply {
            content_type,
            body: body.to_vec(),
        })
    }
}
