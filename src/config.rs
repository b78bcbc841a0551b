// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup into explicit
//! structs. Services receive the parts they need at construction time.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind IP address (IPv4 or IPv6) | `0.0.0.0` |
//! | `PORT` | Server bind port | `8088` |
//! | `TLS_CERT_PATH` / `TLS_KEY_PATH` | PEM certificate chain and key for HTTPS | Plain HTTP |
//! | `GATEWAY_API_ID` | `id` stamped on every response envelope | `mosip.mimoto.idp` |
//! | `GATEWAY_USE_BEARER_TOKEN` | Send a bearer token on backend calls | `true` |
//! | `GATEWAY_OTP_CHANNELS` | Comma-separated allowed OTP channels | `EMAIL,PHONE` |
//! | `IDP_BASE_URL` | Identity-provider platform base URL | Required |
//! | `IDP_BINDING_OTP_PATH` | Path of the binding OTP operation | `/v1/esignet/binding/binding-otp` |
//! | `IDP_WALLET_BINDING_PATH` | Path of the wallet-binding operation | `/v1/esignet/binding/wallet-binding` |
//! | `IDP_TIMEOUT_SECS` | Backend request timeout | `30` |
//! | `IDP_AUTH_TOKEN_URL` | Client-credentials token endpoint | Optional |
//! | `IDP_AUTH_CLIENT_ID` / `IDP_AUTH_CLIENT_SECRET` | Client credentials | Optional |
//! | `TOKEN_EXCHANGE_URL` | OAuth token endpoint for `/getToken` | `https://github.com/login/oauth/access_token` |
//! | `TOKEN_EXCHANGE_TIMEOUT_SECS` | Token endpoint timeout | `30` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{
    net::{IpAddr, SocketAddr},
    path::PathBuf,
    time::Duration,
};

use url::Url;

use crate::backend::ApiName;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const TLS_CERT_PATH_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_PATH_ENV: &str = "TLS_KEY_PATH";

pub const API_ID_ENV: &str = "GATEWAY_API_ID";
pub const USE_BEARER_TOKEN_ENV: &str = "GATEWAY_USE_BEARER_TOKEN";
pub const OTP_CHANNELS_ENV: &str = "GATEWAY_OTP_CHANNELS";

pub const IDP_BASE_URL_ENV: &str = "IDP_BASE_URL";
pub const IDP_BINDING_OTP_PATH_ENV: &str = "IDP_BINDING_OTP_PATH";
pub const IDP_WALLET_BINDING_PATH_ENV: &str = "IDP_WALLET_BINDING_PATH";
pub const IDP_TIMEOUT_SECS_ENV: &str = "IDP_TIMEOUT_SECS";
pub const IDP_AUTH_TOKEN_URL_ENV: &str = "IDP_AUTH_TOKEN_URL";
pub const IDP_AUTH_CLIENT_ID_ENV: &str = "IDP_AUTH_CLIENT_ID";
pub const IDP_AUTH_CLIENT_SECRET_ENV: &str = "IDP_AUTH_CLIENT_SECRET";

pub const TOKEN_EXCHANGE_URL_ENV: &str = "TOKEN_EXCHANGE_URL";
pub const TOKEN_EXCHANGE_TIMEOUT_SECS_ENV: &str = "TOKEN_EXCHANGE_TIMEOUT_SECS";

/// Logging format selector, read by [`crate::telemetry`].
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_API_ID: &str = "mosip.mimoto.idp";
pub const DEFAULT_OTP_CHANNELS: [&str; 2] = ["EMAIL", "PHONE"];
pub const DEFAULT_BINDING_OTP_PATH: &str = "/v1/esignet/binding/binding-otp";
pub const DEFAULT_WALLET_BINDING_PATH: &str = "/v1/esignet/binding/wallet-binding";
pub const DEFAULT_TOKEN_EXCHANGE_URL: &str = "https://github.com/login/oauth/access_token";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8088;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required configuration: {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Settings shared by the wrapped operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Identifier stamped on every envelope.
    pub api_id: String,
    /// Whether backend calls carry a bearer token.
    pub use_bearer_token: bool,
    /// Upper-cased OTP notification channels accepted by `/binding-otp`.
    pub allowed_otp_channels: Vec<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_id: DEFAULT_API_ID.to_string(),
            use_bearer_token: true,
            allowed_otp_channels: DEFAULT_OTP_CHANNELS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Client credentials used to obtain backend bearer tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendAuthConfig {
    pub token_url: Url,
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub base_url: Url,
    pub binding_otp_path: String,
    pub wallet_binding_path: String,
    pub timeout: Duration,
    pub auth: Option<BackendAuthConfig>,
}

impl BackendConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            binding_otp_path: DEFAULT_BINDING_OTP_PATH.to_string(),
            wallet_binding_path: DEFAULT_WALLET_BINDING_PATH.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            auth: None,
        }
    }

    /// Full URL of a backend operation.
    pub fn endpoint(&self, api: ApiName) -> Result<Url, url::ParseError> {
        let path = match api {
            ApiName::BindingOtp => &self.binding_otp_path,
            ApiName::WalletBinding => &self.wallet_binding_path,
        };
        // Joining an absolute path would drop any prefix on the base URL.
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        base.join(path.trim_start_matches('/'))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenExchangeConfig {
    pub endpoint: Url,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub tls: Option<TlsConfig>,
}

/// Everything the process needs, loaded once in `main`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub server: ServerConfig,
    pub service: ServiceConfig,
    pub backend: BackendConfig,
    pub token_exchange: TokenExchangeConfig,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get(PORT_ENV) {
            Some(raw) => parse_number::<u16>(PORT_ENV, &raw)?,
            None => DEFAULT_PORT,
        };
        let ip: IpAddr = host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse()
            .map_err(|e| invalid(HOST_ENV, e))?;
        let addr = SocketAddr::new(ip, port);

        let tls = match (get(TLS_CERT_PATH_ENV), get(TLS_KEY_PATH_ENV)) {
            (Some(cert), Some(key)) => Some(TlsConfig {
                cert_path: cert.into(),
                key_path: key.into(),
            }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing(TLS_KEY_PATH_ENV)),
            (None, Some(_)) => return Err(ConfigError::Missing(TLS_CERT_PATH_ENV)),
        };

        let use_bearer_token = match get(USE_BEARER_TOKEN_ENV) {
            Some(raw) => parse_bool(USE_BEARER_TOKEN_ENV, &raw)?,
            None => true,
        };
        let allowed_otp_channels = match get(OTP_CHANNELS_ENV) {
            Some(raw) => {
                let channels: Vec<String> = raw
                    .split(',')
                    .map(|c| c.trim().to_ascii_uppercase())
                    .filter(|c| !c.is_empty())
                    .collect();
                if channels.is_empty() {
                    return Err(invalid(OTP_CHANNELS_ENV, "no channels listed"));
                }
                channels
            }
            None => ServiceConfig::default().allowed_otp_channels,
        };
        let service = ServiceConfig {
            api_id: get(API_ID_ENV).unwrap_or_else(|| DEFAULT_API_ID.to_string()),
            use_bearer_token,
            allowed_otp_channels,
        };

        let base_url = get(IDP_BASE_URL_ENV).ok_or(ConfigError::Missing(IDP_BASE_URL_ENV))?;
        let mut backend = BackendConfig::new(parse_url(IDP_BASE_URL_ENV, &base_url)?);
        if let Some(path) = get(IDP_BINDING_OTP_PATH_ENV) {
            backend.binding_otp_path = path;
        }
        if let Some(path) = get(IDP_WALLET_BINDING_PATH_ENV) {
            backend.wallet_binding_path = path;
        }
        if let Some(raw) = get(IDP_TIMEOUT_SECS_ENV) {
            backend.timeout = Duration::from_secs(parse_number(IDP_TIMEOUT_SECS_ENV, &raw)?);
        }
        backend.auth = match (
            get(IDP_AUTH_TOKEN_URL_ENV),
            get(IDP_AUTH_CLIENT_ID_ENV),
            get(IDP_AUTH_CLIENT_SECRET_ENV),
        ) {
            (None, None, None) => None,
            (Some(token_url), Some(client_id), Some(client_secret)) => Some(BackendAuthConfig {
                token_url: parse_url(IDP_AUTH_TOKEN_URL_ENV, &token_url)?,
                client_id,
                client_secret,
            }),
            (None, _, _) => return Err(ConfigError::Missing(IDP_AUTH_TOKEN_URL_ENV)),
            (_, None, _) => return Err(ConfigError::Missing(IDP_AUTH_CLIENT_ID_ENV)),
            (_, _, None) => return Err(ConfigError::Missing(IDP_AUTH_CLIENT_SECRET_ENV)),
        };

        let token_exchange = TokenExchangeConfig {
            endpoint: parse_url(
                TOKEN_EXCHANGE_URL_ENV,
                &get(TOKEN_EXCHANGE_URL_ENV).unwrap_or_else(|| DEFAULT_TOKEN_EXCHANGE_URL.to_string()),
            )?,
            timeout: match get(TOKEN_EXCHANGE_TIMEOUT_SECS_ENV) {
                Some(raw) => Duration::from_secs(parse_number(TOKEN_EXCHANGE_TIMEOUT_SECS_ENV, &raw)?),
                None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            },
        };

        Ok(Self {
            server: ServerConfig { addr, tls },
            service,
            backend,
            token_exchange,
        })
    }
}

fn invalid(name: &'static str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        name,
        reason: reason.to_string(),
    }
}

fn parse_url(name: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| invalid(name, e))
}

fn parse_number<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| invalid(name, e))
}

fn parse_bool(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(invalid(name, format!("expected a boolean, got `{other}`"))),
    }
}
