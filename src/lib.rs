// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet Binding Gateway
//!
//! HTTP gateway that sits between wallet clients and an identity-provider
//! platform. It relays OTP binding challenges, performs the wallet-binding
//! handshake (client public key to JWK, then thumbprint and key id on the
//! way back) and exchanges OAuth authorization codes.
//!
//! ## Modules
//!
//! - `api` - HTTP handlers, router and OpenAPI document (Axum)
//! - `backend` - Identity-provider client behind the `BackendProxy` trait
//! - `jose` - Public key to JWK conversion and RFC 7638 thumbprints
//! - `services` - Binding, OTP and token-exchange flows
//! - `envelope` - Response envelope wire shape

pub mod api;
pub mod backend;
pub mod config;
pub mod envelope;
pub mod error;
pub mod jose;
pub mod models;
pub mod services;
pub mod state;
pub mod telemetry;

#[cfg(test)]
mod test_support;
