//! End-to-end tests against a live listener on an ephemeral port.

use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use cartwise_api::config::ServerSettings;

async fn spawn_server(settings: ServerSettings) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = cartwise_api::router(&settings);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn post_cart(base: &str, body: Value) -> (StatusCode, Value) {
    let response = reqwest::Client::new()
        .post(format!("{}/cart", base))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn test_evaluates_cart() {
    let base = spawn_server(ServerSettings::default()).await;

    let (status, body) = post_cart(
        &base,
        json!({
            "cart": {
                "reference": "2d832fe0-6c96-4515-9be7-4c00983539c1",
                "lineItems": [
                    { "name": "Peanut Butter", "price": "39.0", "collection": "BEST-SELLERS" },
                    { "name": "Cocoa", "price": "34.99", "collection": "KETO" },
                    { "name": "Fruity", "price": "32", "collection": "DEFAULT" }
                ]
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let items = body["cart"]["lineItems"].as_array().unwrap();
    let prices: Vec<f64> = items
        .iter()
        .map(|i| i["discounted_price"].as_f64().unwrap())
        .collect();
    assert_eq!(prices, vec![37.05, 34.99, 30.4]);
    assert_eq!(body["cart"]["totalPrice"], json!(102.44));
    assert_eq!(body["cart"]["reference"], json!("2d832fe0-6c96-4515-9be7-4c00983539c1"));
}

#[tokio::test]
async fn test_rejects_missing_cart() {
    let base = spawn_server(ServerSettings::default()).await;

    let (status, body) = post_cart(&base, json!({ "order": {} })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["errors"],
        json!([
            "cart hash is required",
            "reference key is required",
            "lineItems key is required"
        ])
    );
}

#[tokio::test]
async fn test_rejects_unpermitted_key() {
    let base = spawn_server(ServerSettings::default()).await;

    let (status, body) = post_cart(
        &base,
        json!({
            "cart": {
                "reference": "r",
                "lineItems": [
                    { "name": "Cocoa", "price": "34.99", "collection": "KETO", "other_key": "x" }
                ]
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({ "error": "found unpermitted parameter: :other_key" }));
}

#[tokio::test]
async fn test_empty_line_items() {
    let base = spawn_server(ServerSettings::default()).await;

    let (status, body) =
        post_cart(&base, json!({ "cart": { "reference": "r", "lineItems": [] } })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cart"]["lineItems"], json!([]));
    assert_eq!(body["cart"]["totalPrice"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn test_rejects_invalid_json() {
    let base = spawn_server(ServerSettings::default()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/cart", base))
        .header("content-type", "application/json")
        .body("{\"cart\": ")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_rejects_wrong_content_type() {
    let base = spawn_server(ServerSettings::default()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/cart", base))
        .header("content-type", "text/plain")
        .body("{}")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_rejects_oversized_body() {
    let base = spawn_server(ServerSettings {
        max_body_bytes: 64,
        ..ServerSettings::default()
    })
    .await;

    let items: Vec<Value> = (0..20)
        .map(|_| json!({ "name": "Cocoa", "price": "34.99", "collection": "KETO" }))
        .collect();
    let (status, body) =
        post_cart(&base, json!({ "cart": { "reference": "r", "lineItems": items } })).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_health() {
    let base = spawn_server(ServerSettings::default()).await;

    let body: Value = reqwest::get(format!("{}/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["service"], json!("cart-api"));
}
