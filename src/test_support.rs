// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared fixtures for unit tests.
//!
//! Keys were generated with OpenSSL; the expected thumbprints were computed
//! independently over the RFC 7638 canonical member set.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    backend::{ApiName, BackendProxy},
    error::GatewayError,
};

pub const RSA_SPKI_PEM: &str = r#"-----BEGIN PUBLIC KEY-----
MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEA/r3J98jSfutdK9bhOp9y
UuVrNhV3HCpQVCKuMXRG3iUNyOsjFVB1MKuCTMeFoMIkr2iDizVGuHPytDPXniCw
NDVd5EsY0J8P813ZkHzczdpa0kesc/aRvEk+w5yYfeO5rAIbl/Q5s/ulN0fz2Eu4
N9uOPG+fGZ8tykEQTiOKo2p0ZekX6G5qR1iLvy4jaB57qY2OhDuo9mi0z4B1/XoW
Q1Bd5YUMQ1epKrDjv6oPL2KV8CocOLS+TywwYACAMeeE+vfLyr/asviM1KwdcNnU
dxV3RFDXJHoU/zdbKl+8SsjmOVb2Rm79edoUWmnk47dEkV0kdwAzsD/g0Poi7CXV
qQIDAQAB
-----END PUBLIC KEY-----"#;

pub const RSA_PKCS1_PEM: &str = r#"-----BEGIN RSA PUBLIC KEY-----
MIIBCgKCAQEA/r3J98jSfutdK9bhOp9yUuVrNhV3HCpQVCKuMXRG3iUNyOsjFVB1
MKuCTMeFoMIkr2iDizVGuHPytDPXniCwNDVd5EsY0J8P813ZkHzczdpa0kesc/aR
vEk+w5yYfeO5rAIbl/Q5s/ulN0fz2Eu4N9uOPG+fGZ8tykEQTiOKo2p0ZekX6G5q
R1iLvy4jaB57qY2OhDuo9mi0z4B1/XoWQ1Bd5YUMQ1epKrDjv6oPL2KV8CocOLS+
TywwYACAMeeE+vfLyr/asviM1KwdcNnUdxV3RFDXJHoU/zdbKl+8SsjmOVb2Rm79
edoUWmnk47dEkV0kdwAzsD/g0Poi7CXVqQIDAQAB
-----END RSA PUBLIC KEY-----"#;

pub const RSA_THUMBPRINT: &str = "G8tO48ef0rBqc3OZ-BBzB_aq23OPMLqdjGT9pw9H9s0";

pub const RSA_MODULUS: &str = "_r3J98jSfutdK9bhOp9yUuVrNhV3HCpQVCKuMXRG3iUNyOsjFVB1MKuCTMeFoMIkr2iDizVGuHPytDPXniCwNDVd5EsY0J8P813ZkHzczdpa0kesc_aRvEk-w5yYfeO5rAIbl_Q5s_ulN0fz2Eu4N9uOPG-fGZ8tykEQTiOKo2p0ZekX6G5qR1iLvy4jaB57qY2OhDuo9mi0z4B1_XoWQ1Bd5YUMQ1epKrDjv6oPL2KV8CocOLS-TywwYACAMeeE-vfLyr_asviM1KwdcNnUdxV3RFDXJHoU_zdbKl-8SsjmOVb2Rm79edoUWmnk47dEkV0kdwAzsD_g0Poi7CXVqQ";

pub const P256_SPKI_PEM: &str = r#"-----BEGIN PUBLIC KEY-----
MFkwEwYHKoZIzj0CAQYIKoZIzj0DAQcDQgAETZ0UFKsPoXAZvJg1Oag2paB0mIsG
JdPexy8VNIeq1QjiasnwdXLr0RN+D9/BXkmKV4zWHsThofwqN0BgR2zSqw==
-----END PUBLIC KEY-----"#;

/// The P-256 key above as bare base64 DER.
pub const P256_SPKI_BASE64: &str = "MFkwEwYHKoZIzj0CAQYIKoZIzj0DAQcDQgAETZ0UFKsPoXAZvJg1Oag2paB0mIsGJdPexy8VNIeq1QjiasnwdXLr0RN+D9/BXkmKV4zWHsThofwqN0BgR2zSqw==";

/// The P-256 key above as unpadded base64url DER.
pub const P256_SPKI_BASE64URL: &str = "MFkwEwYHKoZIzj0CAQYIKoZIzj0DAQcDQgAETZ0UFKsPoXAZvJg1Oag2paB0mIsGJdPexy8VNIeq1QjiasnwdXLr0RN-D9_BXkmKV4zWHsThofwqN0BgR2zSqw";

pub const P256_X: &str = "TZ0UFKsPoXAZvJg1Oag2paB0mIsGJdPexy8VNIeq1Qg";
pub const P256_Y: &str = "4mrJ8HVy69ETfg_fwV5JileM1h7E4aH8KjdAYEds0qs";
pub const P256_THUMBPRINT: &str = "wYqKTd6nCGV8wkOUwetwfyq9BJ9CyvbJxjInOZO9O40";

pub const SECP256K1_SPKI_PEM: &str = r#"-----BEGIN PUBLIC KEY-----
MFYwEAYHKoZIzj0CAQYFK4EEAAoDQgAEM3oJw/nMyM8IDR0BhPCe0HsG/+l6nL7e
hpPybHOa+w7Rkw+Dp+qfjXbiwRPmcgCfHl3CHMzkJ4h8uRj5Wm1GeQ==
-----END PUBLIC KEY-----"#;

pub const SECP256K1_X: &str = "M3oJw_nMyM8IDR0BhPCe0HsG_-l6nL7ehpPybHOa-w4";
pub const SECP256K1_Y: &str = "0ZMPg6fqn4124sET5nIAnx5dwhzM5CeIfLkY-VptRnk";
pub const SECP256K1_THUMBPRINT: &str = "_GKfbDT1NjoIhOr8-MxJzLaLvOVLHTY3GJmCTZkc5oo";

/// P-384 is a well-formed SPKI the gateway does not support.
pub const P384_SPKI_PEM: &str = r#"-----BEGIN PUBLIC KEY-----
MHYwEAYHKoZIzj0CAQYFK4EEACIDYgAESAoA1PMUmWBnoWjWlvVa41EdLfIXL2Lk
wfx/AIWK48osomOaWYr71hcE+r50qxHNtXZE59EHtPuCvRPsXMWuR1N0ot42H56H
ImEl9Xq4PI7mPByUX9vKAGc2XsX+I6F4
-----END PUBLIC KEY-----"#;

/// Backend stand-in that records every call and replays a canned outcome.
pub struct RecordingBackend {
    outcome: Result<Option<Value>, GatewayError>,
    pub calls: Mutex<Vec<(ApiName, Value, bool)>>,
}

impl RecordingBackend {
    pub fn replying(body: Value) -> Self {
        Self::with_outcome(Ok(Some(body)))
    }

    pub fn with_outcome(outcome: Result<Option<Value>, GatewayError>) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded(&self) -> Vec<(ApiName, Value, bool)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BackendProxy for RecordingBackend {
    async fn call(
        &self,
        api: ApiName,
        body: Value,
        use_auth: bool,
    ) -> Result<Option<Value>, GatewayError> {
        self.calls.lock().unwrap().push((api, body, use_auth));
        self.outcome.clone()
    }
}
