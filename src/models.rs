// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies for the three gateway operations, plus the
//! backend-shaped projections the services send to the IdP platform.
//!
//! ## Model Categories
//!
//! - **Binding OTP**: `/binding-otp` request, forwarded to the backend as-is
//! - **Wallet Binding**: external request, internal (JWK) request, enriched response
//! - **Token Exchange**: form parameters of `/getToken`

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::jose::Jwk;

// =============================================================================
// Binding OTP Models
// =============================================================================

/// Request to send a binding OTP to the user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BindingOtpRequest {
    #[serde(default)]
    pub request_time: String,
    pub request: BindingOtpInnerRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BindingOtpInnerRequest {
    #[serde(default)]
    pub individual_id: String,
    /// Notification channels, e.g. `EMAIL`, `PHONE`.
    #[serde(default)]
    pub otp_channels: Vec<String>,
}

/// Backend OTP result (masked contact details), passed through unmodified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BindingOtpResponse {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

// =============================================================================
// Wallet Binding Models
// =============================================================================

/// External wallet-binding request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WalletBindingRequest {
    #[serde(default)]
    pub request_time: String,
    pub request: WalletBindingInnerRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WalletBindingInnerRequest {
    #[serde(default)]
    pub individual_id: String,
    /// Challenge/response pairs, forwarded without inspection.
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub challenge_list: Vec<Value>,
    /// PEM or base64 DER public key.
    #[serde(default)]
    pub public_key: String,
    #[serde(default)]
    pub auth_factor_type: String,
    #[serde(default)]
    pub format: String,
}

/// Backend-shaped wallet-binding request: the public key travels as a JWK.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InternalBindingRequest {
    pub request_time: String,
    pub request: InternalBindingInnerRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InternalBindingInnerRequest {
    pub individual_id: String,
    pub challenge_list: Vec<Value>,
    pub public_key: Jwk,
    pub auth_factor_type: String,
    pub format: String,
}

impl InternalBindingRequest {
    /// Project an external request onto the backend shape.
    pub fn from_external(request: &WalletBindingRequest, jwk: Jwk) -> Self {
        let inner = &request.request;
        Self {
            request_time: request.request_time.clone(),
            request: InternalBindingInnerRequest {
                individual_id: inner.individual_id.clone(),
                challenge_list: inner.challenge_list.clone(),
                public_key: jwk,
                auth_factor_type: inner.auth_factor_type.clone(),
                format: inner.format.clone(),
            },
        }
    }
}

/// Backend binding result with the derived key identifiers appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WalletBindingResponse {
    /// Fields exactly as the backend returned them.
    #[serde(flatten)]
    pub backend: Map<String, Value>,
    /// RFC 7638 SHA-256 thumbprint of the bound key.
    pub thumbprint: String,
    /// Key id derived from the thumbprint.
    pub kid: String,
}

impl WalletBindingResponse {
    pub const THUMBPRINT_FIELD: &'static str = "thumbprint";
    pub const KID_FIELD: &'static str = "kid";
}

// =============================================================================
// Token Exchange Models
// =============================================================================

/// Body sent to the OAuth token endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Default)]
pub struct TokenRequest {
    pub code: Option<String>,
    pub client_id: Option<String>,
    pub grant_type: Option<String>,
    pub redirect_uri: Option<String>,
}

impl TokenRequest {
    /// Pick the four recognised parameters out of the submitted form.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        Self {
            code: params.get("code").cloned(),
            client_id: params.get("client_id").cloned(),
            grant_type: params.get("grant_type").cloned(),
            redirect_uri: params.get("redirect_uri").cloned(),
        }
    }
}
