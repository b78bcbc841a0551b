// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet-binding handshake.
//!
//! 1. Convert the caller's public key to a JWK.
//! 2. Project the request onto the backend shape with the JWK in place of the
//!    raw key.
//! 3. Call `WALLET_BINDING` once; a missing response is a failure.
//! 4. Add `thumbprint` and `kid`, both derived from the JWK of step 1.
//!
//! Failures after validation are returned as an error envelope.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info};

use super::{into_envelope, validation::validate_wallet_binding_request};
use crate::{
    backend::{decode_envelope, ApiName, BackendProxy},
    config::ServiceConfig,
    envelope::ResponseEnvelope,
    error::{ApiError, GatewayError, WALLET_BINDING_ERROR_CODE},
    jose::{enrich_with_thumbprint_and_key_id, public_key_to_jwk},
    models::{InternalBindingRequest, WalletBindingRequest, WalletBindingResponse},
};

#[derive(Clone)]
pub struct WalletBindingService {
    config: Arc<ServiceConfig>,
    backend: Arc<dyn BackendProxy>,
}

impl WalletBindingService {
    pub fn new(config: Arc<ServiceConfig>, backend: Arc<dyn BackendProxy>) -> Self {
        Self { config, backend }
    }

    /// Run the handshake.
    ///
    /// `Err` only for structurally invalid requests; everything else is
    /// reported inside the envelope.
    pub async fn bind(
        &self,
        request: &WalletBindingRequest,
    ) -> Result<ResponseEnvelope<WalletBindingResponse>, ApiError> {
        let individual_id = request.request.individual_id.as_str();
        debug!(
            individual_id = %individual_id,
            auth_factor_type = %request.request.auth_factor_type,
            challenges = request.request.challenge_list.len(),
            "received wallet-binding request"
        );

        let outcome = match validate_wallet_binding_request(request) {
            Ok(()) => self.handshake(request).await,
            Err(err) => Err(err),
        };

        match &outcome {
            Ok(response) => info!(
                individual_id = %individual_id,
                thumbprint = %response.thumbprint,
                "wallet binding completed"
            ),
            Err(err) => error!(
                individual_id = %individual_id,
                kind = err.kind(),
                error = %err,
                "wallet binding failed"
            ),
        }

        into_envelope(&self.config.api_id, WALLET_BINDING_ERROR_CODE, outcome)
    }

    async fn handshake(
        &self,
        request: &WalletBindingRequest,
    ) -> Result<WalletBindingResponse, GatewayError> {
        let jwk = public_key_to_jwk(&request.request.public_key)?;
        debug!(key_type = jwk.key_type(), "public key converted to JWK");

        let internal = InternalBindingRequest::from_external(request, jwk.clone());
        let body = serde_json::to_value(&internal).map_err(|e| {
            GatewayError::BindingBackend(format!("failed to encode binding request: {e}"))
        })?;

        let reply = self
            .backend
            .call(ApiName::WalletBinding, body, self.config.use_bearer_token)
            .await?;
        let bound = decode_envelope::<Value>(ApiName::WalletBinding, reply)?.into_response()?;

        enrich_with_thumbprint_and_key_id(bound, &jwk)
    }
}
