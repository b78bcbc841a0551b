// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Uniform response wrapper for the wrapped endpoints.
//!
//! Exactly one of `response` and `errors` carries data. Envelopes are always
//! returned with HTTP 200; callers inspect `errors` to detect failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

pub const ENVELOPE_VERSION: &str = "v1";

/// Timestamp layout used for `responsetime`.
pub const RESPONSE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// A single failure entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEntry {
    pub error_code: String,
    pub error_message: String,
}

impl ErrorEntry {
    pub fn new(error_code: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            error_message: error_message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseEnvelope<T> {
    pub id: String,
    pub version: String,
    pub responsetime: String,
    pub metadata: Option<Value>,
    pub response: Option<T>,
    pub errors: Vec<ErrorEntry>,
}

impl<T> ResponseEnvelope<T> {
    pub fn success(id: impl Into<String>, response: T) -> Self {
        Self::build(id.into(), Some(response), Vec::new())
    }

    pub fn failure(
        id: impl Into<String>,
        error_code: impl Into<String>,
        error_message: impl Into<String>,
    ) -> Self {
        Self::build(
            id.into(),
            None,
            vec![ErrorEntry::new(error_code, error_message)],
        )
    }

    fn build(id: String, response: Option<T>, errors: Vec<ErrorEntry>) -> Self {
        Self {
            id,
            version: ENVELOPE_VERSION.to_string(),
            responsetime: format_response_time(Utc::now()),
            metadata: None,
            response,
            errors,
        }
    }

    pub fn is_success(&self) -> bool {
        self.response.is_some() && self.errors.is_empty()
    }
}

pub fn format_response_time(at: DateTime<Utc>) -> String {
    at.format(RESPONSE_TIME_FORMAT).to_string()
}
