// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::Value;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    envelope::ErrorEntry,
    models::{
        BindingOtpInnerRequest, BindingOtpRequest, TokenRequest, WalletBindingInnerRequest,
        WalletBindingRequest,
    },
    state::AppState,
};

pub mod binding;
pub mod health;
pub mod token;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/binding-otp", post(binding::binding_otp))
        .route("/wallet-binding", post(binding::wallet_binding))
        .route("/getToken", post(token::get_token))
        .route("/health", get(health::liveness))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

/// Documentation shape of the response envelope.
#[derive(Serialize, ToSchema)]
pub struct EnvelopeSchema {
    pub id: String,
    pub version: String,
    /// UTC, `yyyy-MM-ddTHH:mm:ss.SSSZ`.
    pub responsetime: String,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<Value>,
    /// Operation payload; null when `errors` is non-empty.
    #[schema(value_type = Option<Object>)]
    pub response: Option<Value>,
    pub errors: Vec<ErrorEntry>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        binding::binding_otp,
        binding::wallet_binding,
        token::get_token,
        health::liveness
    ),
    components(
        schemas(
            BindingOtpRequest,
            BindingOtpInnerRequest,
            WalletBindingRequest,
            WalletBindingInnerRequest,
            TokenRequest,
            EnvelopeSchema,
            ErrorEntry,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Binding", description = "OTP binding challenge and wallet-binding handshake"),
        (name = "Token", description = "OAuth authorization-code exchange"),
        (name = "Health", description = "Liveness probe")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Arc, time::Duration};

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::json;
    use tower::ServiceExt;
    use url::Url;
    use wiremock::{matchers::method, Mock, MockServer, ResponseTemplate};

    use crate::{
        config::{ServiceConfig, TokenExchangeConfig},
        error::{
            INVALID_INPUT_ERROR_CODE, TOKEN_EXCHANGE_ERROR_CODE, UNSUPPORTED_CHANNEL_ERROR_CODE,
            WALLET_BINDING_ERROR_CODE,
        },
        jose::key_id_from_thumbprint,
        services::TokenExchangeService,
        test_support::*,
    };

    fn app_with(backend: Arc<RecordingBackend>, token_url: &str) -> Router {
        let token_exchange = TokenExchangeService::new(TokenExchangeConfig {
            endpoint: Url::parse(token_url).unwrap(),
            timeout: Duration::from_secs(5),
        })
        .unwrap();
        router(AppState::from_parts(
            ServiceConfig::default(),
            backend,
            token_exchange,
        ))
    }

    fn app(backend: Arc<RecordingBackend>) -> Router {
        app_with(backend, "http://127.0.0.1:1/login/oauth/access_token")
    }

    fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn binding_body(public_key: &str) -> serde_json::Value {
        json!({
            "requestTime": "2024-01-01T00:00:00Z",
            "request": {
                "individualId": "abc123",
                "publicKey": public_key,
                "challengeList": [{"challenge": "x", "format": "raw"}],
                "authFactorType": "WEBAUTHN",
                "format": "jwt"
            }
        })
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = app(Arc::new(RecordingBackend::replying(json!({}))));
        let _ = app.into_make_service();
    }

    #[tokio::test]
    async fn wallet_binding_success_is_enveloped() {
        let backend = Arc::new(RecordingBackend::replying(json!({"response": {"keyId": "kid-1"}})));
        let response = app(backend)
            .oneshot(json_post("/wallet-binding", binding_body(RSA_SPKI_PEM)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        let body = body_json(response).await;
        assert_eq!(body["id"], "mosip.mimoto.idp");
        assert_eq!(
            body["response"],
            json!({
                "keyId": "kid-1",
                "thumbprint": RSA_THUMBPRINT,
                "kid": key_id_from_thumbprint(RSA_THUMBPRINT)
            })
        );
        assert_eq!(body["errors"], json!([]));
    }

    #[tokio::test]
    async fn wallet_binding_failure_is_still_200() {
        let backend = Arc::new(RecordingBackend::replying(json!({"response": {}})));
        let response = app(backend)
            .oneshot(json_post("/wallet-binding", binding_body("garbage")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["response"], serde_json::Value::Null);
        assert_eq!(body["errors"].as_array().unwrap().len(), 1);
        assert_eq!(body["errors"][0]["errorCode"], WALLET_BINDING_ERROR_CODE);
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/wallet-binding")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app(Arc::new(RecordingBackend::replying(json!({}))))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error_code"], INVALID_INPUT_ERROR_CODE);
    }

    #[tokio::test]
    async fn unsupported_otp_channel_is_bad_request_without_backend_call() {
        let backend = Arc::new(RecordingBackend::replying(json!({"response": {}})));
        let response = app(backend.clone())
            .oneshot(json_post(
                "/binding-otp",
                json!({
                    "requestTime": "2024-01-01T00:00:00.000Z",
                    "request": {"individualId": "abc123", "otpChannels": ["TELEGRAM"]}
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error_code"], UNSUPPORTED_CHANNEL_ERROR_CODE);
        assert!(backend.recorded().is_empty());
    }

    #[tokio::test]
    async fn binding_otp_success_is_enveloped() {
        let backend = Arc::new(RecordingBackend::replying(
            json!({"response": {"maskedEmail": "a***@example.com"}}),
        ));
        let response = app(backend)
            .oneshot(json_post(
                "/binding-otp",
                json!({
                    "requestTime": "2024-01-01T00:00:00.000Z",
                    "request": {"individualId": "abc123", "otpChannels": ["EMAIL"]}
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["response"], json!({"maskedEmail": "a***@example.com"}));
    }

    #[tokio::test]
    async fn get_token_returns_raw_upstream_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(r#"{"access_token":"gho_x"}"#, "application/json"),
            )
            .mount(&server)
            .await;

        let request = Request::builder()
            .method("POST")
            .uri("/getToken")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(
                "code=c0de&client_id=wallet&grant_type=authorization_code&redirect_uri=io.wallet%3A%2F%2Fcb",
            ))
            .unwrap();
        let response = app_with(
            Arc::new(RecordingBackend::replying(json!({}))),
            &format!("{}/login/oauth/access_token", server.uri()),
        )
        .oneshot(request)
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(body_json(response).await, json!({"access_token": "gho_x"}));
    }

    #[tokio::test]
    async fn get_token_upstream_failure_is_bad_gateway() {
        let request = Request::builder()
            .method("POST")
            .uri("/getToken")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("code=c0de"))
            .unwrap();
        let response = app(Arc::new(RecordingBackend::replying(json!({}))))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error_code"], TOKEN_EXCHANGE_ERROR_CODE);
    }

    #[tokio::test]
    async fn empty_challenge_list_reaches_backend() {
        let backend = Arc::new(RecordingBackend::replying(json!({"response": {"keyId": "kid-1"}})));
        let mut body = binding_body(RSA_SPKI_PEM);
        body["request"]["challengeList"] = json!([]);
        let response = app(backend.clone())
            .oneshot(json_post("/wallet-binding", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["errors"], json!([]));
        assert_eq!(backend.recorded().len(), 1);
    }

    #[tokio::test]
    async fn health_is_ok() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app(Arc::new(RecordingBackend::replying(json!({}))))
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"status": "ok"}));
    }
}
