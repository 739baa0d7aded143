use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use car24_core::proto::client_service::{Client, OtpReceipt};
use car24_core::testutil::{MockBackends, MockIdentity};
use car24_core::{AppError, TokenIssuer, UpstreamKind};

use crate::common::{TEST_SECRET, body_json, empty_request, json_request, setup_with};

const PHONE: &str = "+15551234567";
const VERIFY_URI: &str = "/check?otp_code=482913&phone_number=%2B15551234567";

fn app_with(identity: MockIdentity) -> crate::common::TestApp {
    setup_with(
        MockBackends {
            identity,
            ..Default::default()
        },
        false,
    )
}

#[tokio::test]
async fn send_code_returns_201_with_receipt() {
    let identity = MockIdentity::new().with_create(Ok(OtpReceipt {
        id: "r-1".into(),
        phone_number: PHONE.into(),
        expires_at: "2026-01-01T00:02:00Z".into(),
    }));
    let app = app_with(identity);

    let response = app
        .router
        .oneshot(json_request("POST", "/check", json!({"phone_number": PHONE})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "CREATED");
    assert_eq!(json["data"]["id"], "r-1");
    assert_eq!(json["data"]["phone_number"], PHONE);
    assert_eq!(
        app.mocks.identity.calls(),
        vec![format!("create_user_otp:{PHONE}")]
    );
}

#[tokio::test]
async fn send_code_rejects_malformed_phone() {
    let app = app_with(MockIdentity::new());

    let response = app
        .router
        .oneshot(json_request("POST", "/check", json!({"phone_number": "12-34"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["status"], "INVALID_ARGUMENT");
    assert!(app.mocks.identity.calls().is_empty());
}

#[tokio::test]
async fn verify_returns_token_for_registered_user() {
    let identity = MockIdentity::new().with_check(Ok(Client {
        id: "u-001".into(),
        phone_number: PHONE.into(),
        ..Default::default()
    }));
    let app = app_with(identity);

    let response = app
        .router
        .oneshot(empty_request("GET", VERIFY_URI))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "OK");

    let token = json["data"].as_str().unwrap();
    let claims = TokenIssuer::new(TEST_SECRET).verify(token).unwrap();
    assert_eq!(claims.id, "u-001");
    assert_eq!(claims.exp - claims.iat, 600);
    assert_eq!(
        app.mocks.identity.calls(),
        vec![
            format!("verify_user_otp:{PHONE}:482913"),
            format!("check_user:{PHONE}"),
        ]
    );
}

#[tokio::test]
async fn verify_incorrect_code_returns_400() {
    let identity = MockIdentity::new().with_verify(Err(AppError::upstream(
        UpstreamKind::NotFound,
        "no rows in result set",
    )));
    let app = app_with(identity);

    let response = app
        .router
        .oneshot(empty_request("GET", VERIFY_URI))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["status"], "INVALID_ARGUMENT");
    assert_eq!(json["data"], "incorrect code");
    assert_eq!(app.mocks.identity.calls().len(), 1);
}

#[tokio::test]
async fn verify_unregistered_number_returns_400() {
    let identity = MockIdentity::new().with_check(Err(AppError::upstream(
        UpstreamKind::NotFound,
        "no rows in result set",
    )));
    let app = app_with(identity);

    let response = app
        .router
        .oneshot(empty_request("GET", VERIFY_URI))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["status"], "INVALID_ARGUMENT");
    assert_eq!(json["data"], "should register");
}

#[tokio::test]
async fn verify_upstream_failure_passes_message_through() {
    let identity = MockIdentity::new().with_verify(Err(AppError::upstream(
        UpstreamKind::Internal,
        "pq: connection reset",
    )));
    let app = app_with(identity);

    let response = app
        .router
        .oneshot(empty_request("GET", VERIFY_URI))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["status"], "GRPC_ERROR");
    assert_eq!(json["data"], "pq: connection reset");
}

#[tokio::test]
async fn verify_requires_both_parameters() {
    for (uri, message) in [
        ("/check?phone_number=%2B15551234567", "otp_code is required"),
        ("/check?otp_code=482913", "phone_number is required"),
        ("/check?otp_code=&phone_number=%2B15551234567", "otp_code is required"),
    ] {
        let app = app_with(MockIdentity::new());

        let response = app
            .router
            .oneshot(empty_request("GET", uri))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body_json(response).await["data"], message);
        assert!(app.mocks.identity.calls().is_empty());
    }
}
