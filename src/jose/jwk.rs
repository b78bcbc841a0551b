// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Public key to JWK conversion.
//!
//! Accepted encodings:
//! - PEM `PUBLIC KEY` (SubjectPublicKeyInfo)
//! - PEM `RSA PUBLIC KEY` (PKCS#1)
//! - bare base64 or base64url DER SubjectPublicKeyInfo
//!
//! Accepted key types are RSA, P-256 and secp256k1.

use base64ct::{Base64, Base64Unpadded, Base64UrlUnpadded, Encoding};
use rsa::{pkcs1::DecodeRsaPublicKey, traits::PublicKeyParts, RsaPublicKey};
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

const SPKI_PEM_TAG: &str = "PUBLIC KEY";
const PKCS1_PEM_TAG: &str = "RSA PUBLIC KEY";

/// Elliptic curves a wallet may bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EcCurve {
    #[serde(rename = "P-256")]
    P256,
    #[serde(rename = "secp256k1")]
    Secp256k1,
}

impl EcCurve {
    pub fn as_str(&self) -> &'static str {
        match self {
            EcCurve::P256 => "P-256",
            EcCurve::Secp256k1 => "secp256k1",
        }
    }
}

/// Public JWK. Only the members that identify the key are carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kty")]
pub enum Jwk {
    #[serde(rename = "RSA")]
    Rsa { n: String, e: String },
    #[serde(rename = "EC")]
    Ec { crv: EcCurve, x: String, y: String },
}

impl Jwk {
    pub fn key_type(&self) -> &'static str {
        match self {
            Jwk::Rsa { .. } => "RSA",
            Jwk::Ec { .. } => "EC",
        }
    }
}

enum KeyDer {
    Spki(Vec<u8>),
    Pkcs1(Vec<u8>),
}

/// Convert caller-supplied key material into a JWK.
pub fn public_key_to_jwk(raw: &str) -> Result<Jwk, GatewayError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(GatewayError::KeyConversion("public key is empty".to_string()));
    }

    match decode_key_material(raw)? {
        KeyDer::Spki(der) => jwk_from_spki(&der),
        KeyDer::Pkcs1(der) => RsaPublicKey::from_pkcs1_der(&der)
            .map(|key| rsa_jwk(&key))
            .map_err(|e| GatewayError::KeyConversion(format!("invalid PKCS#1 RSA key: {e}"))),
    }
}

fn decode_key_material(raw: &str) -> Result<KeyDer, GatewayError> {
    if raw.starts_with("-----BEGIN") {
        let pem = pem::parse(raw)
            .map_err(|e| GatewayError::KeyConversion(format!("invalid PEM: {e}")))?;
        return match pem.tag() {
            SPKI_PEM_TAG => Ok(KeyDer::Spki(pem.contents().to_vec())),
            PKCS1_PEM_TAG => Ok(KeyDer::Pkcs1(pem.contents().to_vec())),
            other => Err(GatewayError::KeyConversion(format!(
                "unsupported PEM label `{other}`"
            ))),
        };
    }

    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let decoded = if compact.contains('-') || compact.contains('_') {
        Base64UrlUnpadded::decode_vec(compact.trim_end_matches('='))
    } else {
        Base64::decode_vec(&compact)
            .or_else(|_| Base64Unpadded::decode_vec(compact.trim_end_matches('=')))
    };
    decoded
        .map(KeyDer::Spki)
        .map_err(|e| GatewayError::KeyConversion(format!("public key is neither PEM nor base64 DER: {e}")))
}

fn jwk_from_spki(der: &[u8]) -> Result<Jwk, GatewayError> {
    use rsa::pkcs8::DecodePublicKey as _;

    if let Ok(key) = RsaPublicKey::from_public_key_der(der) {
        return Ok(rsa_jwk(&key));
    }
    if let Ok(key) = <p256::PublicKey as p256::pkcs8::DecodePublicKey>::from_public_key_der(der) {
        use p256::elliptic_curve::sec1::ToEncodedPoint;
        let point = key.to_encoded_point(false);
        return ec_jwk(EcCurve::P256, point.x(), point.y());
    }
    if let Ok(key) = <k256::PublicKey as k256::pkcs8::DecodePublicKey>::from_public_key_der(der) {
        use k256::elliptic_curve::sec1::ToEncodedPoint;
        let point = key.to_encoded_point(false);
        return ec_jwk(EcCurve::Secp256k1, point.x(), point.y());
    }

    Err(GatewayError::KeyConversion(
        "unsupported or malformed SubjectPublicKeyInfo (expected RSA, P-256 or secp256k1)"
            .to_string(),
    ))
}

fn rsa_jwk(key: &RsaPublicKey) -> Jwk {
    Jwk::Rsa {
        n: Base64UrlUnpadded::encode_string(&key.n().to_bytes_be()),
        e: Base64UrlUnpadded::encode_string(&key.e().to_bytes_be()),
    }
}

fn ec_jwk<B: AsRef<[u8]>>(crv: EcCurve, x: Option<&B>, y: Option<&B>) -> Result<Jwk, GatewayError> {
    match (x, y) {
        (Some(x), Some(y)) => Ok(Jwk::Ec {
            crv,
            x: Base64UrlUnpadded::encode_string(x.as_ref()),
            y: Base64UrlUnpadded::encode_string(y.as_ref()),
        }),
        _ => Err(GatewayError::KeyConversion(format!(
            "{} key has no affine coordinates",
            crv.as_str()
        ))),
    }
}
