// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Error taxonomy and the HTTP error body for unwrapped failures.
//!
//! [`GatewayError`] is what every fallible step returns. Only validation kinds
//! and token-exchange failures become an [`ApiError`]; everything else is
//! reported in an error envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Error code for OTP binding failures.
pub const OTP_BINDING_ERROR_CODE: &str = "RESIDENT-APP-034";
/// Error code for wallet-binding failures.
pub const WALLET_BINDING_ERROR_CODE: &str = "RESIDENT-APP-035";
/// Error code for structurally invalid requests.
pub const INVALID_INPUT_ERROR_CODE: &str = "RESIDENT-APP-036";
/// Error code for unknown OTP notification channels.
pub const UNSUPPORTED_CHANNEL_ERROR_CODE: &str = "RESIDENT-APP-037";
/// Error code for token-exchange failures.
pub const TOKEN_EXCHANGE_ERROR_CODE: &str = "RESIDENT-APP-038";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("unsupported notification channel: {0}")]
    UnsupportedChannel(String),

    #[error("public key could not be converted to a JWK: {0}")]
    KeyConversion(String),

    #[error("{0}")]
    BindingBackend(String),

    #[error("backend not reachable: {0}")]
    BackendTransport(String),

    #[error("binding response could not be enriched: {0}")]
    Enrichment(String),

    #[error("token exchange failed: {0}")]
    TokenExchange(String),
}

impl GatewayError {
    /// True for the kinds raised before any outbound call is made.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GatewayError::Validation(_) | GatewayError::UnsupportedChannel(_)
        )
    }

    /// Stable kind name, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Validation(_) => "validation",
            GatewayError::UnsupportedChannel(_) => "unsupported_channel",
            GatewayError::KeyConversion(_) => "key_conversion",
            GatewayError::BindingBackend(_) => "binding_backend",
            GatewayError::BackendTransport(_) => "backend_transport",
            GatewayError::Enrichment(_) => "enrichment",
            GatewayError::TokenExchange(_) => "token_exchange",
        }
    }
}

/// Error returned with a non-200 status.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    error_code: &'static str,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, INVALID_INPUT_ERROR_CODE, message)
    }

    pub fn bad_gateway(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, code, message)
    }

    /// The 400 response for a request rejected before any outbound call.
    ///
    /// `None` for every kind raised after the request was accepted; those
    /// are reported in an envelope instead.
    pub fn rejection(err: &GatewayError) -> Option<Self> {
        match err {
            GatewayError::Validation(_) => Some(Self::bad_request(err.to_string())),
            GatewayError::UnsupportedChannel(_) => Some(Self::new(
                StatusCode::BAD_REQUEST,
                UNSUPPORTED_CHANNEL_ERROR_CODE,
                err.to_string(),
            )),
            GatewayError::KeyConversion(_)
            | GatewayError::BindingBackend(_)
            | GatewayError::BackendTransport(_)
            | GatewayError::Enrichment(_)
            | GatewayError::TokenExchange(_) => None,
        }
    }

    /// 502 for a failed authorization-code exchange.
    pub fn token_exchange(err: GatewayError) -> Self {
        Self::bad_gateway(TOKEN_EXCHANGE_ERROR_CODE, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
            error_code: self.code,
        });
        (self.status, body).into_response()
    }
}
