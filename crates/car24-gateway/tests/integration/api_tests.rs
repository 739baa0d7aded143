use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use car24_core::proto::client_service::Client;
use car24_core::proto::order_service::{Car, GetListCarResponse};
use car24_core::testutil::{MockBackends, MockCrud};
use car24_core::{AppError, UpstreamKind};

use crate::common::{
    CAR_ID, body_bytes, body_json, empty_request, json_request, setup_test_app, setup_with,
};

fn car() -> Car {
    Car {
        id: CAR_ID.into(),
        model_id: "0c4a6f0e-95f5-4a8e-8d5b-3f2f7d1c9e10".into(),
        state_number: "01A777AA".into(),
        color: "white".into(),
        year: 2022,
        ..Default::default()
    }
}

#[tokio::test]
async fn health_returns_200() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(empty_request("GET", "/health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(empty_request("GET", "/api-docs/openapi.json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["paths"]["/check"]["get"].is_object());
    assert!(json["paths"]["/car/{id}"]["patch"].is_object());
}

#[tokio::test]
async fn create_returns_201_envelope() {
    let mocks = MockBackends {
        cars: MockCrud::new().with_entity(Ok(car())),
        ..Default::default()
    };
    let app = setup_with(mocks, false);

    let response = app
        .router
        .oneshot(json_request(
            "POST",
            "/car",
            json!({"model_id": "0c4a6f0e-95f5-4a8e-8d5b-3f2f7d1c9e10", "state_number": "01A777AA"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "CREATED");
    assert_eq!(json["data"]["id"], CAR_ID);
    assert_eq!(json["data"]["year"], 2022);
    assert_eq!(app.mocks.cars.calls(), vec!["create".to_string()]);
}

#[tokio::test]
async fn malformed_body_returns_bad_request() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(
            axum::http::Request::builder()
                .method("POST")
                .uri("/order")
                .header("content-type", "application/json")
                .body(axum::body::Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["status"], "BAD_REQUEST");
    assert_eq!(app.mocks.crud_call_count(), 0);
}

#[tokio::test]
async fn get_by_id_returns_entity() {
    let mocks = MockBackends {
        cars: MockCrud::new().with_entity(Ok(car())),
        ..Default::default()
    };
    let app = setup_with(mocks, false);

    let response = app
        .router
        .oneshot(empty_request("GET", &format!("/car/{CAR_ID}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "OK");
    assert_eq!(json["data"]["state_number"], "01A777AA");
    assert_eq!(app.mocks.cars.calls(), vec![format!("get_by_id:{CAR_ID}")]);
}

#[tokio::test]
async fn invalid_uuid_is_rejected_before_backend_call() {
    for (method, uri, body) in [
        ("GET", "/car/not-a-uuid", None),
        ("DELETE", "/car/not-a-uuid", None),
        ("GET", "/mechanic/42", None),
        ("PATCH", "/order/not-a-uuid", Some(json!({"data": {}}))),
    ] {
        let app = setup_test_app();
        let request = match body {
            Some(body) => json_request(method, uri, body),
            None => empty_request(method, uri),
        };

        let response = app.router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{method} {uri}");
        let json = body_json(response).await;
        assert_eq!(json["status"], "INVALID_ARGUMENT");
        assert!(json["data"].as_str().unwrap().ends_with("id is an invalid uuid"));
        assert_eq!(app.mocks.crud_call_count(), 0);
    }
}

#[tokio::test]
async fn invalid_uuid_message_names_resource() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(json_request("PUT", "/tarif/abc", json!({"name": "daily"})))
        .await
        .unwrap();

    let json = body_json(response).await;
    assert_eq!(json["data"], "tarif id is an invalid uuid");
}

#[tokio::test]
async fn upstream_not_found_maps_to_404() {
    let mocks = MockBackends {
        users: MockCrud::<car24_core::resource::Users>::new().with_entity(Err(
            AppError::upstream(UpstreamKind::NotFound, "no rows in result set"),
        )),
        ..Default::default()
    };
    let app = setup_with(mocks, false);

    let response = app
        .router
        .oneshot(empty_request("GET", &format!("/user/{CAR_ID}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["status"], "GRPC_ERROR");
    assert_eq!(json["data"], "no rows in result set");
}

#[tokio::test]
async fn upstream_unavailable_maps_to_503() {
    let mocks = MockBackends {
        orders: MockCrud::new().with_entity(Err(AppError::upstream(
            UpstreamKind::Unavailable,
            "connection refused",
        ))),
        ..Default::default()
    };
    let app = setup_with(mocks, false);

    let response = app
        .router
        .oneshot(json_request("POST", "/order", json!({"car_id": CAR_ID})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["status"], "GRPC_ERROR");
}

#[tokio::test]
async fn list_forwards_default_pagination() {
    let mocks = MockBackends {
        cars: MockCrud::new().with_list(Ok(GetListCarResponse {
            count: 1,
            cars: vec![car()],
        })),
        ..Default::default()
    };
    let app = setup_with(mocks, false);

    let response = app
        .router
        .oneshot(empty_request("GET", "/car"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["count"], 1);
    assert_eq!(json["data"]["cars"][0]["id"], CAR_ID);

    let request = app.mocks.cars.last_list.lock().unwrap().clone().unwrap();
    assert_eq!(request.offset, 0);
    assert_eq!(request.limit, 10);
    assert_eq!(request.search, "");
}

#[tokio::test]
async fn list_forwards_explicit_pagination_and_search() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(empty_request("GET", "/model?offset=20&limit=50&search=tesla"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let request = app.mocks.models.last_list.lock().unwrap().clone().unwrap();
    assert_eq!(request.offset, 20);
    assert_eq!(request.limit, 50);
    assert_eq!(request.search, "tesla");
}

#[tokio::test]
async fn list_rejects_out_of_range_pagination() {
    for query in ["limit=0", "limit=101", "offset=-1", "limit=ten"] {
        let app = setup_test_app();

        let response = app
            .router
            .oneshot(empty_request("GET", &format!("/discount?{query}")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{query}");
        assert_eq!(body_json(response).await["status"], "INVALID_ARGUMENT");
        assert_eq!(app.mocks.crud_call_count(), 0);
    }
}

#[tokio::test]
async fn update_uses_path_id_over_body_id() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(json_request(
            "PUT",
            &format!("/user/{CAR_ID}"),
            json!({"id": "11111111-1111-1111-1111-111111111111", "first_name": "Aziz"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let update = app.mocks.users.last_update.lock().unwrap().clone().unwrap();
    assert_eq!(update.id, CAR_ID);
    assert_eq!(update.first_name, "Aziz");
}

#[tokio::test]
async fn patch_converts_fields_to_struct() {
    let mocks = MockBackends {
        users: MockCrud::new().with_entity(Ok(Client {
            id: CAR_ID.into(),
            address: "Tashkent".into(),
            ..Default::default()
        })),
        ..Default::default()
    };
    let app = setup_with(mocks, false);

    let response = app
        .router
        .oneshot(json_request(
            "PATCH",
            &format!("/user/{CAR_ID}"),
            json!({"data": {"address": "Tashkent", "rating": 4.5, "tags": ["vip"], "note": null}}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["address"], "Tashkent");

    let patch = app.mocks.users.last_patch.lock().unwrap().clone().unwrap();
    assert_eq!(patch.id, CAR_ID);
    let fields = patch.fields.unwrap().fields;
    assert_eq!(fields.len(), 4);
    assert_eq!(
        fields["address"].kind,
        Some(prost_types::value::Kind::StringValue("Tashkent".into()))
    );
    assert_eq!(
        fields["rating"].kind,
        Some(prost_types::value::Kind::NumberValue(4.5))
    );
}

#[tokio::test]
async fn patch_without_data_object_is_bad_request() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(json_request(
            "PATCH",
            &format!("/car/{CAR_ID}"),
            json!({"color": "red"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["status"], "BAD_REQUEST");
    assert_eq!(app.mocks.crud_call_count(), 0);
}

#[tokio::test]
async fn delete_returns_204_without_body() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(empty_request("DELETE", &format!("/car/{CAR_ID}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(response).await.is_empty());
    assert_eq!(app.mocks.cars.calls(), vec![format!("delete:{CAR_ID}")]);
}
