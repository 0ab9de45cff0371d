//! Handler tests for the Products domain
//!
//! Drive the router exactly as the service mounts it (`/products`) over the
//! in-memory repositories:
//! - request/response JSON shape
//! - status codes and error bodies
//! - cascade and permissive-delete behaviour

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

fn app() -> Router {
    let options = InMemoryProductOptionRepository::new();
    let products = InMemoryProductRepository::with_options(options.clone());
    Router::new().nest(
        "/products",
        handlers::router(ProductService::new(products, options)),
    )
}

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_product(app: &Router, name: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/products",
        Some(json!({ "Name": name, "Price": 9.99, "DeliveryPrice": 1.00 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn test_create_get_delete_scenario() {
    let app = app();

    let created = create_product(&app, "Widget").await;
    let id = created["Id"].as_str().unwrap().to_string();
    assert!(Uuid::parse_str(&id).is_ok());
    assert_eq!(created["Name"], "Widget");
    assert_eq!(created["Price"], 9.99);
    assert_eq!(created["DeliveryPrice"], 1.0);
    assert_eq!(created["Description"], Value::Null);

    let (status, fetched) = send(&app, "GET", &format!("/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, deleted) = send(&app, "DELETE", &format!("/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["Id"], created["Id"]);

    let (status, body) = send(&app, "GET", &format!("/products/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_create_keeps_supplied_id() {
    let app = app();
    let id = Uuid::new_v4();

    let request = Request::builder()
        .method("POST")
        .uri("/products")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "Id": id, "Name": "Gadget", "Price": 3.5 }).to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.id, id);
    assert_eq!(product.delivery_price, rust_decimal::Decimal::ZERO);
}

#[tokio::test]
async fn test_prices_round_trip_without_rounding() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/products")
        .header("content-type", "application/json")
        .body(Body::from(
            r#"{"Name":"Precise","Price":1.0000000000000000001,"DeliveryPrice":12345678901234567.89}"#,
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created: Value = json_body(response.into_body()).await;
    let id = created["Id"].as_str().unwrap();

    let (status, fetched) = send(&app, "GET", &format!("/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["Price"].to_string(), "1.0000000000000000001");
    assert_eq!(fetched["DeliveryPrice"].to_string(), "12345678901234567.89");
}

#[tokio::test]
async fn test_list_wraps_items_and_filters_by_name() {
    let app = app();
    for name in ["Blue Widget", "Gadget", "Red Widget"] {
        create_product(&app, name).await;
    }

    let (status, all) = send(&app, "GET", "/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all["Items"].as_array().unwrap().len(), 3);

    let (_, filtered) = send(&app, "GET", "/products?name=Widget", None).await;
    let names: Vec<_> = filtered["Items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["Name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Blue Widget", "Red Widget"]);

    let (_, none) = send(&app, "GET", "/products?name=widget", None).await;
    assert!(none["Items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_update_overwrites_all_fields() {
    let app = app();
    let created = create_product(&app, "Widget").await;
    let id = created["Id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/products/{id}"),
        Some(json!({ "Id": id, "Name": "Widget v2", "Description": "Shiny", "Price": 12.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["Name"], "Widget v2");

    let (_, fetched) = send(&app, "GET", &format!("/products/{id}"), None).await;
    assert_eq!(fetched["Description"], "Shiny");
    assert_eq!(fetched["Price"], 12.5);
    // Omitted fields are overwritten with their defaults
    assert_eq!(fetched["DeliveryPrice"], 0.0);
}

#[tokio::test]
async fn test_update_with_mismatched_id_is_bad_request() {
    let app = app();
    let created = create_product(&app, "Widget").await;
    let id = created["Id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/products/{id}"),
        Some(json!({ "Id": Uuid::new_v4(), "Name": "Other" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");

    let (_, fetched) = send(&app, "GET", &format!("/products/{id}"), None).await;
    assert_eq!(fetched["Name"], "Widget");
}

#[tokio::test]
async fn test_update_without_body_id_is_bad_request() {
    let app = app();
    let id = Uuid::new_v4();

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/products/{id}"),
        Some(json!({ "Name": "No id" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_unknown_product_is_not_found() {
    let app = app();
    let id = Uuid::new_v4();

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/products/{id}"),
        Some(json!({ "Id": id, "Name": "Ghost" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_product_is_not_found() {
    let (status, _) = send(&app(), "DELETE", &format!("/products/{}", Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_uuid_is_bad_request() {
    let (status, body) = send(&app(), "GET", "/products/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_UUID");
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/products")
        .header("content-type", "application/json")
        .body(Body::from("{\"Name\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "JSON_EXTRACTION");
}

#[tokio::test]
async fn test_option_lifecycle() {
    let app = app();
    let product = create_product(&app, "Widget").await;
    let pid = product["Id"].as_str().unwrap();

    let (status, option) = send(
        &app,
        "POST",
        &format!("/products/{pid}/options"),
        Some(json!({ "Name": "Red", "Description": "Bright red" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(option.get("ProductId").is_none());
    let oid = option["Id"].as_str().unwrap();

    let (_, list) = send(&app, "GET", &format!("/products/{pid}/options"), None).await;
    assert_eq!(list, json!({ "Items": [option.clone()] }));

    let (status, fetched) = send(&app, "GET", &format!("/products/{pid}/options/{oid}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, option);

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/products/{pid}/options/{oid}"),
        Some(json!({ "Id": oid, "Name": "Crimson" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["Name"], "Crimson");
    assert_eq!(updated["Description"], Value::Null);

    let (status, deleted) =
        send(&app, "DELETE", &format!("/products/{pid}/options/{oid}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["Name"], "Crimson");

    let (status, _) = send(&app, "GET", &format!("/products/{pid}/options/{oid}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_option_returns_null() {
    let app = app();
    let uri = format!("/products/{}/options/{}", Uuid::new_v4(), Uuid::new_v4());

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_update_option_with_mismatched_id_is_bad_request() {
    let app = app();
    let uri = format!("/products/{}/options/{}", Uuid::new_v4(), Uuid::new_v4());

    let (status, _) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({ "Id": Uuid::new_v4(), "Name": "Red" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_unknown_option_is_not_found() {
    let app = app();
    let oid = Uuid::new_v4();
    let uri = format!("/products/{}/options/{oid}", Uuid::new_v4());

    let (status, _) = send(&app, "PUT", &uri, Some(json!({ "Id": oid, "Name": "Red" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_product_cascades_to_options() {
    let app = app();
    let product = create_product(&app, "Widget").await;
    let pid = product["Id"].as_str().unwrap();

    let mut option_ids = Vec::new();
    for name in ["Red", "Green", "Blue"] {
        let (_, option) = send(
            &app,
            "POST",
            &format!("/products/{pid}/options"),
            Some(json!({ "Name": name })),
        )
        .await;
        option_ids.push(option["Id"].as_str().unwrap().to_string());
    }

    let (status, _) = send(&app, "DELETE", &format!("/products/{pid}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, list) = send(&app, "GET", &format!("/products/{pid}/options"), None).await;
    assert!(list["Items"].as_array().unwrap().is_empty());

    for oid in option_ids {
        let (status, _) =
            send(&app, "GET", &format!("/products/{pid}/options/{oid}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
