// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::collections::HashMap;

use axum::{
    extract::{rejection::FormRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form,
};

use crate::{error::ApiError, models::TokenRequest, state::AppState};

/// Exchange an authorization code at the configured OAuth token endpoint.
///
/// The upstream body is returned unwrapped. Upstream failures are reported
/// as 502 rather than an envelope.
#[utoipa::path(
    post,
    path = "/getToken",
    request_body(content = TokenRequest, content_type = "application/x-www-form-urlencoded"),
    tag = "Token",
    responses(
        (status = 200, description = "Raw token endpoint response"),
        (status = 400, description = "Body is not form-urlencoded"),
        (status = 502, description = "Token endpoint unreachable or rejected the exchange")
    )
)]
pub async fn get_token(
    State(state): State<AppState>,
    payload: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Result<Response, ApiError> {
    let Form(params) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let reply = state
        .token_exchange
        .exchange_code(&params)
        .await
        .map_err(ApiError::token_exchange)?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, reply.content_type)],
        reply.body,
    )
        .into_response())
}
