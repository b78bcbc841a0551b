// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Enveloped binding endpoints. Both always answer 200 once the request is
//! accepted; failures are in the envelope's `errors`.

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::{
    envelope::ResponseEnvelope,
    error::ApiError,
    models::{BindingOtpRequest, BindingOtpResponse, WalletBindingRequest, WalletBindingResponse},
    state::AppState,
};

use super::EnvelopeSchema;

#[utoipa::path(
    post,
    path = "/binding-otp",
    request_body = BindingOtpRequest,
    tag = "Binding",
    responses(
        (status = 200, description = "Envelope with masked contact details or errors", body = EnvelopeSchema),
        (status = 400, description = "Malformed request or unsupported OTP channel")
    )
)]
pub async fn binding_otp(
    State(state): State<AppState>,
    payload: Result<Json<BindingOtpRequest>, JsonRejection>,
) -> Result<Json<ResponseEnvelope<BindingOtpResponse>>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let envelope = state.otp.request_otp(&request).await?;
    Ok(Json(envelope))
}

#[utoipa::path(
    post,
    path = "/wallet-binding",
    request_body = WalletBindingRequest,
    tag = "Binding",
    responses(
        (status = 200, description = "Envelope with the bound key (plus thumbprint and kid) or errors", body = EnvelopeSchema),
        (status = 400, description = "Malformed request")
    )
)]
pub async fn wallet_binding(
    State(state): State<AppState>,
    payload: Result<Json<WalletBindingRequest>, JsonRejection>,
) -> Result<Json<ResponseEnvelope<WalletBindingResponse>>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let envelope = state.wallet_binding.bind(&request).await?;
    Ok(Json(envelope))
}
