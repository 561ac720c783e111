//! Integration tests for the storefront cart.
//!
//! Each test drives one visitor: the session cookie is carried from request
//! to request the way a browser would.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use patty_wagon_integration_tests::{TestClient, sample_store};

async fn add(client: &mut TestClient, product_id: &str) {
    let response = client
        .post_form(
            "/cart/add",
            &[("product_id", product_id), ("return_to", "/menu")],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
}

fn cart_count(body: &str) -> &str {
    let marker = r#"<span class="cart-count">"#;
    let start = body.find(marker).unwrap() + marker.len();
    let end = start + body[start..].find("</span>").unwrap();
    &body[start..end]
}

// =============================================================================
// Adding
// =============================================================================

#[tokio::test]
async fn test_add_same_product_merges_lines() {
    let mut client = TestClient::storefront(sample_store());
    add(&mut client, "classic").await;
    add(&mut client, "classic").await;

    let body = client.get("/cart").await.body;
    assert_eq!(cart_count(&body), "2");
    assert_eq!(body.matches(r#"<li class="cart-line">"#).count(), 1);
    assert!(body.contains(r#"<span class="quantity">2</span>"#));
    assert!(body.contains("$17.98"));
}

#[tokio::test]
async fn test_add_redirects_back_and_shows_toast_once() {
    let mut client = TestClient::storefront(sample_store());
    let response = client
        .post_form(
            "/cart/add",
            &[("product_id", "fries"), ("return_to", "/menu?category=Sides")],
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/menu?category=Sides"));

    let first = client.get("/menu?category=Sides").await.body;
    assert!(first.contains("Fries added to your cart"));
    let second = client.get("/menu?category=Sides").await.body;
    assert!(!second.contains("added to your cart"));
    assert_eq!(cart_count(&second), "1");
}

#[tokio::test]
async fn test_add_ignores_offsite_return_path() {
    let mut client = TestClient::storefront(sample_store());
    let response = client
        .post_form(
            "/cart/add",
            &[("product_id", "fries"), ("return_to", "//evil.example/")],
        )
        .await;

    assert_eq!(response.location(), Some("/menu"));
}

#[tokio::test]
async fn test_add_unknown_product_is_ignored() {
    let mut client = TestClient::storefront(sample_store());
    add(&mut client, "does-not-exist").await;

    let body = client.get("/cart").await.body;
    assert!(body.contains("Your cart is empty."));
    assert_eq!(cart_count(&body), "0");
}

// =============================================================================
// Quantities and Removal
// =============================================================================

#[tokio::test]
async fn test_update_sets_quantity_and_total() {
    let mut client = TestClient::storefront(sample_store());
    add(&mut client, "classic").await;
    add(&mut client, "fries").await;

    let response = client
        .post_form("/cart/update", &[("index", "0"), ("quantity", "3")])
        .await;
    assert_eq!(response.location(), Some("/cart"));

    let body = client.get("/cart").await.body;
    assert_eq!(cart_count(&body), "4");
    // 3 x 8.99 + 3.49
    assert!(body.contains("$30.46"));
}

#[tokio::test]
async fn test_update_to_zero_or_below_removes_line() {
    let mut client = TestClient::storefront(sample_store());
    add(&mut client, "classic").await;
    add(&mut client, "fries").await;

    client
        .post_form("/cart/update", &[("index", "0"), ("quantity", "0")])
        .await;
    let body = client.get("/cart").await.body;
    assert!(!body.contains("<h3>Classic Patty</h3>"));
    assert!(body.contains("<h3>Fries</h3>"));

    client
        .post_form("/cart/update", &[("index", "0"), ("quantity", "-1")])
        .await;
    let body = client.get("/cart").await.body;
    assert!(body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_remove_shifts_later_lines() {
    let mut client = TestClient::storefront(sample_store());
    add(&mut client, "classic").await;
    add(&mut client, "fries").await;
    add(&mut client, "shake").await;

    client.post_form("/cart/remove", &[("index", "1")]).await;
    // "Vanilla Shake" is now line 1
    client.post_form("/cart/remove", &[("index", "1")]).await;

    let body = client.get("/cart").await.body;
    assert!(body.contains("<h3>Classic Patty</h3>"));
    assert!(!body.contains("<h3>Fries</h3>"));
    assert!(!body.contains("<h3>Vanilla Shake</h3>"));
    assert_eq!(cart_count(&body), "1");
}

#[tokio::test]
async fn test_invalid_index_is_rejected() {
    let mut client = TestClient::storefront(sample_store());
    add(&mut client, "classic").await;

    let response = client
        .post_form("/cart/update", &[("index", "5"), ("quantity", "2")])
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = client.post_form("/cart/remove", &[("index", "1")]).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let body = client.get("/cart").await.body;
    assert_eq!(cart_count(&body), "1");
}

#[tokio::test]
async fn test_negative_and_non_numeric_index_is_rejected() {
    let mut client = TestClient::storefront(sample_store());
    add(&mut client, "classic").await;

    for index in ["-1", "first", "0.5", ""] {
        let response = client
            .post_form("/cart/update", &[("index", index), ("quantity", "2")])
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "update index {index:?}");

        let response = client.post_form("/cart/remove", &[("index", index)]).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "remove index {index:?}");
    }

    let response = client.post_form("/cart/remove", &[]).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let body = client.get("/cart").await.body;
    assert_eq!(cart_count(&body), "1");
}

// =============================================================================
// Clearing and Checkout
// =============================================================================

#[tokio::test]
async fn test_clear_requires_confirmation() {
    let mut client = TestClient::storefront(sample_store());
    add(&mut client, "classic").await;

    let response = client.post_form("/cart/clear", &[]).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Clear your cart?"));
    assert_eq!(cart_count(&client.get("/cart").await.body), "1");

    let response = client.post_form("/cart/clear", &[("confirm", "true")]).await;
    assert_eq!(response.location(), Some("/cart"));

    let body = client.get("/cart").await.body;
    assert!(body.contains("Your cart is now empty"));
    assert!(body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_checkout_shows_ticket_and_empties_cart() {
    let mut client = TestClient::storefront(sample_store());
    add(&mut client, "classic").await;
    add(&mut client, "classic").await;
    add(&mut client, "shake").await;

    let response = client.post_form("/cart/checkout", &[]).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("<li>2x Classic Patty</li>"));
    assert!(response.body.contains("<li>1x Vanilla Shake</li>"));
    assert!(response.body.contains("$23.48"));
    assert_eq!(cart_count(&response.body), "0");

    let body = client.get("/cart").await.body;
    assert!(body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_checkout_with_empty_cart_redirects() {
    let mut client = TestClient::storefront(sample_store());

    let response = client.post_form("/cart/checkout", &[]).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/cart"));
}

#[tokio::test]
async fn test_carts_are_per_visitor() {
    let mut first = TestClient::storefront(sample_store());
    add(&mut first, "classic").await;

    let mut second = first.new_visitor();
    assert_eq!(cart_count(&second.get("/cart").await.body), "0");
    assert_eq!(cart_count(&first.get("/cart").await.body), "1");
}
