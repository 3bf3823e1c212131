//! HTTP surface tests driven through the router with `oneshot`

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use orders_server::api;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_endpoint_responds() {
    let (state, _dir) = common::test_state().await;
    let app = api::build_app(state);

    let response = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}

#[tokio::test]
async fn create_order_returns_created_with_location() {
    let (state, _dir) = common::test_state().await;
    let app = api::build_app(state);

    let payload = json!({
        "customer_name": "Alice",
        "order_items": [
            { "product_name": "Widget", "quantity": 2, "unit_price": 10.0, "total_price": 20.0 }
        ]
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/orders", payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["customer_name"], "Alice");
    assert_eq!(body["total_amount"], 20.0);
    assert_eq!(body["order_items"].as_array().unwrap().len(), 1);
    assert_eq!(location, format!("/api/orders/{}", body["order_id"].as_str().unwrap()));

    // Location dereferences to the created resource
    let fetched = app.oneshot(get(&location)).await.unwrap();
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(json_body(fetched).await["order_id"], body["order_id"]);
}

#[tokio::test]
async fn create_order_rejects_empty_customer_name() {
    let (state, _dir) = common::test_state().await;
    let app = api::build_app(state);

    let response = app
        .oneshot(json_request("POST", "/api/orders", json!({ "customer_name": "" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["code"], "E0002");
}

#[tokio::test]
async fn get_unknown_order_returns_not_found() {
    let (state, _dir) = common::test_state().await;
    let app = api::build_app(state);

    let response = app
        .oneshot(get(&format!("/api/orders/{}", Uuid::new_v4())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["code"], "E0003");
}

#[tokio::test]
async fn update_with_mismatched_id_is_rejected() {
    let (state, _dir) = common::test_state().await;
    let app = api::build_app(state);

    let created = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/orders",
            json!({ "customer_name": "Bob" }),
        ))
        .await
        .unwrap();
    let order_id = json_body(created).await["order_id"].as_str().unwrap().to_string();

    let payload = json!({
        "order_id": Uuid::new_v4(),
        "customer_name": "Bob",
        "total_amount": 1.0
    });
    let response = app
        .oneshot(json_request("PUT", &format!("/api/orders/{order_id}"), payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["code"], "E0006");
}

#[tokio::test]
async fn delete_order_returns_no_content_then_not_found() {
    let (state, _dir) = common::test_state().await;
    let app = api::build_app(state);

    let created = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/orders",
            json!({ "customer_name": "Carol" }),
        ))
        .await
        .unwrap();
    let order_id = json_body(created).await["order_id"].as_str().unwrap().to_string();

    let deleted = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/orders/{order_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let fetched = app.oneshot(get(&format!("/api/orders/{order_id}"))).await.unwrap();
    assert_eq!(fetched.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn add_item_to_missing_order_returns_not_found() {
    let (state, _dir) = common::test_state().await;
    let app = api::build_app(state);

    let missing_order = Uuid::new_v4();
    let payload = json!({
        "order_id": missing_order,
        "product_name": "Ghost",
        "quantity": 1,
        "unit_price": 1.0,
        "total_price": 1.0
    });
    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/api/orders/{missing_order}/items"),
            payload,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["code"], "E0003");
}

#[tokio::test]
async fn item_routes_enforce_order_scope() {
    let (state, _dir) = common::test_state().await;
    let app = api::build_app(state);

    let created = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/orders",
            json!({
                "customer_name": "Dave",
                "order_items": [
                    { "product_name": "Widget", "quantity": 1, "unit_price": 4.0, "total_price": 4.0 }
                ]
            }),
        ))
        .await
        .unwrap();
    let body = json_body(created).await;
    let item_id = body["order_items"][0]["order_item_id"].as_str().unwrap().to_string();

    // fetching the item under a different order is a 404
    let wrong_order = app
        .clone()
        .oneshot(get(&format!("/api/orders/{}/items/{item_id}", Uuid::new_v4())))
        .await
        .unwrap();
    assert_eq!(wrong_order.status(), StatusCode::NOT_FOUND);

    // payload order_id must match the path order_id
    let mismatched = app
        .oneshot(json_request(
            "POST",
            &format!("/api/orders/{}/items", body["order_id"].as_str().unwrap()),
            json!({
                "order_id": Uuid::new_v4(),
                "product_name": "Widget",
                "quantity": 1,
                "unit_price": 4.0,
                "total_price": 4.0
            }),
        ))
        .await
        .unwrap();
    assert_eq!(mismatched.status(), StatusCode::BAD_REQUEST);
}
