use axum::http::{Request, StatusCode};
use chrono::{TimeDelta, Utc};
use tower::ServiceExt;

use car24_core::TokenIssuer;

use crate::common::{CAR_ID, TEST_SECRET, body_json, empty_request, setup_test_app_with_auth};

fn with_bearer(uri: &str, token: &str) -> Request<axum::body::Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(axum::body::Body::empty())
        .unwrap()
}

#[tokio::test]
async fn missing_token_returns_401() {
    let app = setup_test_app_with_auth();

    let response = app
        .router
        .oneshot(empty_request("GET", &format!("/car/{CAR_ID}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["status"], "UNAUTHORIZED");
    assert_eq!(app.mocks.crud_call_count(), 0);
}

#[tokio::test]
async fn token_signed_with_other_secret_returns_401() {
    let app = setup_test_app_with_auth();
    let session = TokenIssuer::new("some-other-secret").issue("u-001").unwrap();

    let response = app
        .router
        .oneshot(with_bearer(&format!("/car/{CAR_ID}"), &session.token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.mocks.crud_call_count(), 0);
}

#[tokio::test]
async fn expired_token_returns_401() {
    let app = setup_test_app_with_auth();
    let session = TokenIssuer::new(TEST_SECRET)
        .issue_at("u-001", Utc::now() - TimeDelta::minutes(30))
        .unwrap();

    let response = app
        .router
        .oneshot(with_bearer("/car", &session.token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_one_second_past_expiry_returns_401() {
    let app = setup_test_app_with_auth();
    let session = TokenIssuer::new(TEST_SECRET)
        .issue_at("u-001", Utc::now() - TimeDelta::seconds(601))
        .unwrap();

    let response = app
        .router
        .oneshot(with_bearer(&format!("/car/{CAR_ID}"), &session.token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["status"], "UNAUTHORIZED");
    assert_eq!(app.mocks.crud_call_count(), 0);
}

#[tokio::test]
async fn valid_token_is_accepted() {
    let app = setup_test_app_with_auth();
    let session = TokenIssuer::new(TEST_SECRET).issue("u-001").unwrap();

    let response = app
        .router
        .oneshot(with_bearer(&format!("/car/{CAR_ID}"), &session.token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.mocks.cars.calls(), vec![format!("get_by_id:{CAR_ID}")]);
}

#[tokio::test]
async fn login_and_health_stay_public() {
    for uri in ["/health", "/check?otp_code=482913&phone_number=%2B15551234567"] {
        let app = setup_test_app_with_auth();

        let response = app
            .router
            .oneshot(empty_request("GET", uri))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }
}
