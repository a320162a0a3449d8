//! Handler tests for the Products domain
//!
//! These tests verify that HTTP handlers work correctly:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization (Rust structs → JSON)
//! - HTTP status codes
//! - Error responses
//!
//! They run against the in-memory repository, so no database is needed.
//! Storage-level behavior against PostgreSQL is covered by the
//! integration tests.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> Router {
    let repo = InMemoryProductRepository::new();
    let service = ProductService::new(repo);
    handlers::router(service)
}

fn app_with_service() -> (Router, ProductService<InMemoryProductRepository>) {
    let repo = InMemoryProductRepository::new();
    let service = ProductService::new(repo);
    (handlers::router(service.clone()), service)
}

fn product_input(name: &str, price: f64, in_stock: bool, category: &str) -> ProductInput {
    ProductInput {
        name: name.to_string(),
        description: format!("{} description", name),
        price,
        in_stock,
        category: category.to_string(),
    }
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn put_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_create_product_returns_201() {
    let app = app();

    let response = app
        .oneshot(post_json(
            "/",
            json!({
                "name": "Widget",
                "description": "A useful widget",
                "price": 9.99,
                "in_stock": true,
                "category": "tools"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.id, 1);
    assert_eq!(product.name, "Widget");
    assert_eq!(product.price, 9.99);
    assert!(product.in_stock);
    assert_eq!(product.category, "tools");
}

#[tokio::test]
async fn test_create_product_validates_empty_name() {
    let app = app();

    let response = app
        .oneshot(post_json(
            "/",
            json!({
                "name": "",
                "description": "",
                "price": 1.0,
                "in_stock": true,
                "category": "tools"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_product_rejects_negative_price() {
    let app = app();

    let response = app
        .oneshot(post_json(
            "/",
            json!({
                "name": "Widget",
                "description": "",
                "price": -5.0,
                "in_stock": true,
                "category": "tools"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_duplicate_name_returns_409() {
    let (app, service) = app_with_service();
    service
        .create_product(product_input("Widget", 9.99, true, "tools"))
        .await
        .unwrap();

    let response = app
        .oneshot(post_json(
            "/",
            json!({
                "name": "Widget",
                "description": "another",
                "price": 5.0,
                "in_stock": false,
                "category": "other"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "CONFLICT");

    // The failed create must not have persisted a second row
    let widgets = service
        .list_products(ProductFilter {
            name: Some("Widget".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(widgets.len(), 1);
    assert_eq!(widgets[0].price, 9.99);
}

#[tokio::test]
async fn test_get_product_returns_200() {
    let (app, service) = app_with_service();
    let created = service
        .create_product(product_input("Widget", 9.99, true, "tools"))
        .await
        .unwrap();

    let response = app.oneshot(get(&format!("/{}", created.id))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.id, created.id);
    assert_eq!(product.name, "Widget");
}

#[tokio::test]
async fn test_get_product_returns_404_for_missing() {
    let app = app();

    let response = app.oneshot(get("/999")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_product_rejects_non_numeric_id() {
    let app = app();

    let response = app.oneshot(get("/not-a-number")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_products_filters_by_category() {
    let (app, service) = app_with_service();
    service
        .create_product(product_input("Hammer", 12.0, true, "hand tools"))
        .await
        .unwrap();
    service
        .create_product(product_input("Drill", 89.0, true, "power tools"))
        .await
        .unwrap();
    service
        .create_product(product_input("Apple", 0.5, true, "groceries"))
        .await
        .unwrap();

    let response = app.oneshot(get("/?category=tools")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let products: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 2);
    assert!(products.iter().all(|p| p.category.contains("tools")));
}

#[tokio::test]
async fn test_list_products_filters_by_price_range() {
    let (app, service) = app_with_service();
    for (name, price) in [("Cheap", 1.0), ("Mid", 10.0), ("Pricey", 100.0)] {
        service
            .create_product(product_input(name, price, true, "misc"))
            .await
            .unwrap();
    }

    let response = app
        .oneshot(get("/?min_price=5&max_price=50"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let products: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Mid");
}

#[tokio::test]
async fn test_list_products_sorts_by_requested_column() {
    let (app, service) = app_with_service();
    for (name, price) in [("B", 3.0), ("C", 1.0), ("A", 2.0)] {
        service
            .create_product(product_input(name, price, true, "misc"))
            .await
            .unwrap();
    }

    let response = app.oneshot(get("/?sortby=price")).await.unwrap();
    let products: Vec<Product> = json_body(response.into_body()).await;
    let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["C", "A", "B"]);
}

#[tokio::test]
async fn test_list_products_ignores_unknown_sort_column() {
    let (app, service) = app_with_service();
    for name in ["First", "Second"] {
        service
            .create_product(product_input(name, 1.0, true, "misc"))
            .await
            .unwrap();
    }

    let response = app
        .oneshot(get("/?sortby=definitely_not_a_column"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    // Falls back to insertion (id) order
    let products: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(products[0].name, "First");
    assert_eq!(products[1].name, "Second");
}

#[tokio::test]
async fn test_list_products_defaults_to_ten_results() {
    let (app, service) = app_with_service();
    for i in 0..15 {
        service
            .create_product(product_input(&format!("P{:02}", i), 1.0, true, "misc"))
            .await
            .unwrap();
    }

    let response = app.oneshot(get("/")).await.unwrap();
    let products: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 10);
}

#[tokio::test]
async fn test_list_products_paginates_with_skip_and_limit() {
    let (app, service) = app_with_service();
    for i in 0..5 {
        service
            .create_product(product_input(&format!("P{}", i), 1.0, true, "misc"))
            .await
            .unwrap();
    }

    let response = app.oneshot(get("/?skip=2&limit=2")).await.unwrap();
    let products: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "P2");
    assert_eq!(products[1].name, "P3");
}

#[tokio::test]
async fn test_list_products_limit_zero_returns_empty_list() {
    let (app, service) = app_with_service();
    service
        .create_product(product_input("Widget", 9.99, true, "tools"))
        .await
        .unwrap();

    let response = app.oneshot(get("/?limit=0")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let products: Vec<Product> = json_body(response.into_body()).await;
    assert!(products.is_empty());
}

#[tokio::test]
async fn test_list_products_rejects_negative_skip() {
    let app = app();

    let response = app.oneshot(get("/?skip=-1")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_product_replaces_all_fields() {
    let (app, service) = app_with_service();
    let created = service
        .create_product(product_input("Widget", 9.99, true, "tools"))
        .await
        .unwrap();

    let response = app
        .oneshot(put_json(
            &format!("/{}", created.id),
            json!({
                "name": "Widget Pro",
                "description": "upgraded",
                "price": 14.99,
                "in_stock": false,
                "category": "premium tools"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.id, created.id);
    assert_eq!(product.name, "Widget Pro");
    assert_eq!(product.description, "upgraded");
    assert_eq!(product.price, 14.99);
    assert!(!product.in_stock);
    assert_eq!(product.category, "premium tools");
}

#[tokio::test]
async fn test_update_product_returns_404_for_missing() {
    let app = app();

    let response = app
        .oneshot(put_json(
            "/999",
            json!({
                "name": "Ghost",
                "description": "",
                "price": 1.0,
                "in_stock": true,
                "category": "none"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_product_returns_409_for_taken_name() {
    let (app, service) = app_with_service();
    service
        .create_product(product_input("Widget", 9.99, true, "tools"))
        .await
        .unwrap();
    let other = service
        .create_product(product_input("Gadget", 19.99, true, "tools"))
        .await
        .unwrap();

    let response = app
        .oneshot(put_json(
            &format!("/{}", other.id),
            json!({
                "name": "Widget",
                "description": "",
                "price": 1.0,
                "in_stock": true,
                "category": "tools"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_product_returns_200_with_message() {
    let (app, service) = app_with_service();
    let created = service
        .create_product(product_input("Widget", 9.99, true, "tools"))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(delete(&format!("/{}", created.id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body: DeleteResponse = json_body(response.into_body()).await;
    assert_eq!(
        body.message,
        format!("Product with id {} deleted successfully", created.id)
    );

    // Gone afterwards
    let response = app.oneshot(get(&format!("/{}", created.id))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_product_returns_404_for_missing() {
    let app = app();

    let response = app.oneshot(delete("/999")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
