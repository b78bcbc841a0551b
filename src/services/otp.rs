// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Binding OTP request, forwarded to the backend under `BINDING_OTP`.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, error};

use super::{into_envelope, validation::validate_otp_request};
use crate::{
    backend::{decode_envelope, ApiName, BackendProxy},
    config::ServiceConfig,
    envelope::ResponseEnvelope,
    error::{ApiError, GatewayError, OTP_BINDING_ERROR_CODE},
    models::{BindingOtpRequest, BindingOtpResponse},
};

#[derive(Clone)]
pub struct OtpService {
    config: Arc<ServiceConfig>,
    backend: Arc<dyn BackendProxy>,
}

impl OtpService {
    pub fn new(config: Arc<ServiceConfig>, backend: Arc<dyn BackendProxy>) -> Self {
        Self { config, backend }
    }

    pub async fn request_otp(
        &self,
        request: &BindingOtpRequest,
    ) -> Result<ResponseEnvelope<BindingOtpResponse>, ApiError> {
        debug!(
            individual_id = %request.request.individual_id,
            channels = ?request.request.otp_channels,
            "received binding-otp request"
        );

        let outcome = match validate_otp_request(request, &self.config.allowed_otp_channels) {
            Ok(()) => self.forward(request).await,
            Err(err) => Err(err),
        };

        if let Err(err) = &outcome {
            error!(
                individual_id = %request.request.individual_id,
                kind = err.kind(),
                error = %err,
                "binding otp request failed"
            );
        }

        into_envelope(&self.config.api_id, OTP_BINDING_ERROR_CODE, outcome)
    }

    async fn forward(&self, request: &BindingOtpRequest) -> Result<BindingOtpResponse, GatewayError> {
        let body = serde_json::to_value(request).map_err(|e| {
            GatewayError::BindingBackend(format!("failed to encode OTP request: {e}"))
        })?;

        let reply = self
            .backend
            .call(ApiName::BindingOtp, body, self.config.use_bearer_token)
            .await?;
        let fields = decode_envelope::<Map<String, Value>>(ApiName::BindingOtp, reply)?
            .into_response()?;

        Ok(BindingOtpResponse { fields })
    }
}
