// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Gateway Services
//!
//! One service per operation:
//!
//! - `wallet_binding` - public key to JWK, backend binding, thumbprint/kid enrichment
//! - `otp` - binding OTP request, passed through to the backend
//! - `token` - OAuth authorization-code exchange (not enveloped)

pub mod otp;
pub mod token;
pub mod validation;
pub mod wallet_binding;

pub use otp::OtpService;
pub use token::TokenExchangeService;
pub use wallet_binding::WalletBindingService;

use crate::{
    envelope::ResponseEnvelope,
    error::{ApiError, GatewayError},
};

/// Map an operation outcome onto what the caller receives.
///
/// Validation kinds become a 400 [`ApiError`]; every failure after the
/// request was accepted becomes an error envelope with the operation's fixed
/// code.
pub fn into_envelope<T>(
    api_id: &str,
    error_code: &str,
    outcome: Result<T, GatewayError>,
) -> Result<ResponseEnvelope<T>, ApiError> {
    match outcome {
        Ok(payload) => Ok(ResponseEnvelope::success(api_id, payload)),
        Err(err) => match ApiError::rejection(&err) {
            Some(rejected) => Err(rejected),
            None => Ok(ResponseEnvelope::failure(api_id, error_code, err.to_string())),
        },
    }
}
