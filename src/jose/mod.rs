// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Key Material
//!
//! Converts wallet public keys into JWKs and derives the identifiers returned
//! alongside a successful binding:
//!
//! - `thumbprint` - RFC 7638 SHA-256 thumbprint, base64url
//! - `kid` - RFC 9278 thumbprint URI built from the thumbprint

pub mod jwk;
pub mod thumbprint;

pub use jwk::{public_key_to_jwk, EcCurve, Jwk};
pub use thumbprint::{enrich_with_thumbprint_and_key_id, key_id_from_thumbprint};
