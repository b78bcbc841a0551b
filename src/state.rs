// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tracing::warn;

use crate::{
    backend::{BackendProxy, HttpBackendClient},
    config::{GatewayConfig, ServiceConfig},
    error::GatewayError,
    services::{OtpService, TokenExchangeService, WalletBindingService},
};

/// Services shared by all handlers. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub wallet_binding: WalletBindingService,
    pub otp: OtpService,
    pub token_exchange: TokenExchangeService,
}

impl AppState {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let backend = HttpBackendClient::new(config.backend.clone())?;
        if config.service.use_bearer_token && !backend.has_credentials() {
            warn!("bearer tokens enabled but no backend credentials configured; calls will be unauthenticated");
        }
        let token_exchange = TokenExchangeService::new(config.token_exchange.clone())?;

        Ok(Self::from_parts(
            config.service.clone(),
            Arc::new(backend),
            token_exchange,
        ))
    }

    pub fn from_parts(
        service: ServiceConfig,
        backend: Arc<dyn BackendProxy>,
        token_exchange: TokenExchangeService,
    ) -> Self {
        let service = Arc::new(service);
        Self {
            wallet_binding: WalletBindingService::new(service.clone(), backend.clone()),
            otp: OtpService::new(service, backend),
            token_exchange,
        }
    }
}
