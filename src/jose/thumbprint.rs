// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWK Thumbprint (RFC 7638), key id derivation and response enrichment.

use base64ct::{Base64UrlUnpadded, Encoding};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use super::jwk::Jwk;
use crate::{error::GatewayError, models::WalletBindingResponse};

/// RFC 9278 prefix for SHA-256 JWK thumbprint URIs.
pub const THUMBPRINT_URI_PREFIX: &str = "urn:ietf:params:oauth:jwk-thumbprint:sha-256:";

impl Jwk {
    /// Compute the SHA-256 JWK thumbprint per RFC 7638.
    ///
    /// The hash input holds only the required members, in lexicographic
    /// order, without whitespace. Returns 43 base64url characters.
    pub fn thumbprint(&self) -> Result<String, GatewayError> {
        let input = match self {
            Jwk::Rsa { n, e } => {
                if n.is_empty() || e.is_empty() {
                    return Err(GatewayError::Enrichment(
                        "RSA JWK is missing `n` or `e`".to_string(),
                    ));
                }
                format!(r#"{{"e":"{e}","kty":"RSA","n":"{n}"}}"#)
            }
            Jwk::Ec { crv, x, y } => {
                if x.is_empty() || y.is_empty() {
                    return Err(GatewayError::Enrichment(
                        "EC JWK is missing `x` or `y`".to_string(),
                    ));
                }
                format!(
                    r#"{{"crv":"{}","kty":"EC","x":"{x}","y":"{y}"}}"#,
                    crv.as_str()
                )
            }
        };

        let hash = Sha256::digest(input.as_bytes());
        Ok(Base64UrlUnpadded::encode_string(&hash))
    }

    /// Key id derived from the thumbprint (RFC 9278 thumbprint URI).
    pub fn key_id(&self) -> Result<String, GatewayError> {
        Ok(key_id_from_thumbprint(&self.thumbprint()?))
    }
}

pub fn key_id_from_thumbprint(thumbprint: &str) -> String {
    format!("{THUMBPRINT_URI_PREFIX}{thumbprint}")
}

/// Attach `thumbprint` and `kid` to the backend's binding response.
///
/// Fields set by the backend are carried over untouched. A backend response
/// that already uses either name is rejected instead of being overwritten.
pub fn enrich_with_thumbprint_and_key_id(
    backend_response: Value,
    jwk: &Jwk,
) -> Result<WalletBindingResponse, GatewayError> {
    let fields: Map<String, Value> = match backend_response {
        Value::Object(fields) => fields,
        other => {
            return Err(GatewayError::Enrichment(format!(
                "expected a JSON object from the backend, got {}",
                json_type_name(&other)
            )))
        }
    };

    for reserved in [WalletBindingResponse::THUMBPRINT_FIELD, WalletBindingResponse::KID_FIELD] {
        if fields.contains_key(reserved) {
            return Err(GatewayError::Enrichment(format!(
                "backend response already contains `{reserved}`"
            )));
        }
    }

    let thumbprint = jwk.thumbprint()?;
    let kid = key_id_from_thumbprint(&thumbprint);

    Ok(WalletBindingResponse {
        backend: fields,
        thumbprint,
        kid,
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
