// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Structural request checks, run before any outbound call.

use crate::{
    error::GatewayError,
    models::{BindingOtpRequest, WalletBindingRequest},
};

fn require(field: &str, value: &str) -> Result<(), GatewayError> {
    if value.trim().is_empty() {
        return Err(GatewayError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Check the OTP request shape and that every channel is allowed.
///
/// `allowed` holds upper-case channel names; comparison ignores case.
pub fn validate_otp_request(
    request: &BindingOtpRequest,
    allowed: &[String],
) -> Result<(), GatewayError> {
    require("request.individualId", &request.request.individual_id)?;
    validate_notification_channels(&request.request.otp_channels, allowed)
}

pub fn validate_notification_channels(
    channels: &[String],
    allowed: &[String],
) -> Result<(), GatewayError> {
    if channels.is_empty() {
        return Err(GatewayError::Validation(
            "request.otpChannels must not be empty".to_string(),
        ));
    }
    for channel in channels {
        let normalized = channel.trim().to_ascii_uppercase();
        if !allowed.iter().any(|a| *a == normalized) {
            return Err(GatewayError::UnsupportedChannel(channel.clone()));
        }
    }
    Ok(())
}

/// Check the wallet-binding request shape.
///
/// The public key and `challengeList` are not checked here; they are
/// forwarded as given and any failure is reported in the envelope.
pub fn validate_wallet_binding_request(request: &WalletBindingRequest) -> Result<(), GatewayError> {
    let inner = &request.request;
    require("request.individualId", &inner.individual_id)?;
    require("request.authFactorType", &inner.auth_factor_type)?;
    require("request.format", &inner.format)?;
    Ok(())
}
