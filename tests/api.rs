//! Route wiring: requests go through the full router and middleware stack.

mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use storefront_api::{
    cart::CartStore,
    catalog::CatalogAccessor,
    routes::create_app,
    state::AppState,
    storage::{CartStorage, FileStorage},
};

async fn send(app: axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn products_endpoint_lists_everything() {
    let app = create_app(common::test_state());
    let (status, body) = send(app, "GET", "/api/products", None).await;

    assert_eq!(status, StatusCode::OK);
    let items = body["data"].as_array().expect("product array");
    assert_eq!(items.len(), 5);
    assert_eq!(items[0]["slug"], "fjallraven-backpack");
    assert_eq!(body["meta"]["total"], 5);
}

#[tokio::test]
async fn products_endpoint_with_slug_returns_one_product() {
    let app = create_app(common::test_state());
    let (status, body) = send(app, "GET", "/api/products?slug=fjallraven-backpack", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["title"], "Fjallraven Backpack");
}

#[tokio::test]
async fn empty_slug_returns_the_full_list() {
    let app = create_app(common::test_state());
    let (status, body) = send(app, "GET", "/api/products?slug=", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn search_query_is_matched_verbatim() {
    let state = common::test_state();

    let (_, body) = send(
        create_app(state.clone()),
        "GET",
        "/api/products/search?q=petite%20%20",
        None,
    )
    .await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(0));

    let (_, body) = send(create_app(state.clone()), "GET", "/api/products/search?q=petite", None).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    let (_, body) = send(create_app(state), "GET", "/api/products/search?q=%20", None).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn unknown_slug_is_not_found() {
    let state = common::test_state();

    let (status, _) = send(create_app(state.clone()), "GET", "/api/products?slug=nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(create_app(state), "GET", "/api/products/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Not Found");
}

#[tokio::test]
async fn missing_catalog_is_a_generic_server_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let catalog = CatalogAccessor::open(dir.path().join("items.json")).await;
    let (_, cart) = common::memory_cart();
    let app = create_app(AppState::new(catalog, cart));

    let (status, body) = send(app, "GET", "/api/products", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["data"]["error"], "Data unavailable");
    assert!(!body.to_string().contains("items.json"));
}

#[tokio::test]
async fn filters_search_and_price_range() {
    let state = common::test_state();

    let (_, body) = send(
        create_app(state.clone()),
        "GET",
        "/api/products?category=men%27s%20clothing&max_price=100",
        None,
    )
    .await;
    let ids: Vec<i64> = body["data"]
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|p| p["id"].as_i64())
        .collect();
    assert_eq!(ids, vec![2]);

    let (_, body) = send(create_app(state.clone()), "GET", "/api/products/search?q=gold", None).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    let (_, body) = send(create_app(state.clone()), "GET", "/api/products/featured?limit=3", None).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(3));

    let (_, body) = send(create_app(state), "GET", "/api/products/price-range", None).await;
    assert_eq!(body["data"]["max"], 168.0);
}

#[tokio::test]
async fn categories_and_tags() {
    let state = common::test_state();

    let (status, body) = send(create_app(state.clone()), "GET", "/api/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["display_name"], "Men");
    assert_eq!(body["data"][0]["product_count"], 2);

    let (status, body) = send(
        create_app(state.clone()),
        "GET",
        "/api/categories/jewelery/products",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["id"], 3);

    let (status, _) = send(
        create_app(state.clone()),
        "GET",
        "/api/categories/toys/products",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(create_app(state.clone()), "GET", "/api/tags", None).await;
    assert_eq!(body["data"], json!(["bags", "outdoor", "jackets", "gold"]));

    let (status, body) = send(create_app(state), "GET", "/api/tags/outdoor/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn cart_flow() {
    let state = common::test_state();

    let (status, body) = send(
        create_app(state.clone()),
        "POST",
        "/api/cart/items",
        Some(json!({ "product_id": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 1);

    let (_, body) = send(
        create_app(state.clone()),
        "POST",
        "/api/cart/items",
        Some(json!({ "product_id": 1 })),
    )
    .await;
    assert_eq!(body["data"]["count"], 2);
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(1));

    let (_, body) = send(
        create_app(state.clone()),
        "PUT",
        "/api/cart/items/1",
        Some(json!({ "quantity": 5 })),
    )
    .await;
    assert_eq!(body["data"]["items"][0]["quantity"], 5);

    let (_, body) = send(
        create_app(state.clone()),
        "PUT",
        "/api/cart/items/99",
        Some(json!({ "quantity": 3 })),
    )
    .await;
    assert_eq!(body["data"]["count"], 5);

    let (status, body) = send(create_app(state.clone()), "GET", "/api/cart", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["summary"]["item_count"], 5);
    assert_eq!(body["data"]["summary"]["shipping"], 5.99);

    let (_, body) = send(create_app(state.clone()), "DELETE", "/api/cart/items/1", None).await;
    assert_eq!(body["data"]["count"], 0);

    send(
        create_app(state.clone()),
        "POST",
        "/api/cart/items",
        Some(json!({ "product_id": 3 })),
    )
    .await;
    let (_, body) = send(create_app(state.clone()), "DELETE", "/api/cart", None).await;
    assert_eq!(body["data"]["count"], 0);

    assert_eq!(state.cart.lock().await.count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn cart_changes_reach_file_storage() {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = Arc::new(FileStorage::new(dir.path()));
    let catalog = CatalogAccessor::with_catalog("unused/items.json", common::sample_catalog());
    let state = AppState::new(catalog, CartStore::initialize(storage.clone(), "cart"));

    for _ in 0..3 {
        let (status, _) = send(
            create_app(state.clone()),
            "POST",
            "/api/cart/items",
            Some(json!({ "product_id": 4 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let raw = storage.read("cart").expect("read").expect("snapshot");
    let saved: Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(saved["items"][0]["product"]["id"], 4);
    assert_eq!(saved["items"][0]["quantity"], 3);

    let restored = CartStore::initialize(Arc::new(FileStorage::new(dir.path())), "cart");
    assert_eq!(restored.count(), 3);
}

#[tokio::test]
async fn adding_unknown_product_is_rejected() {
    let state = common::test_state();
    let (status, _) = send(
        create_app(state.clone()),
        "POST",
        "/api/cart/items",
        Some(json!({ "product_id": 404 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(state.cart.lock().await.is_empty());
}

#[tokio::test]
async fn unknown_routes_fall_back_to_not_found() {
    let app = create_app(common::test_state());
    let (status, body) = send(app, "GET", "/nowhere", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["path"], "/nowhere");
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = create_app(common::test_state());
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}
