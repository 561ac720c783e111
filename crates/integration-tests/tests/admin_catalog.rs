//! Integration tests for the admin catalog editor.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use axum::http::StatusCode;
use patty_wagon_core::{CatalogStore, MemoryCatalogStore, PLACEHOLDER_IMAGE, ProductId};
use patty_wagon_integration_tests::{FailingStore, TestClient, sample_store};

fn product_fields<'a>(name: &'a str, price: &'a str, position: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("name", name),
        ("description", "Grilled cheese on sourdough"),
        ("price", price),
        ("category", "Sides"),
        ("position", position),
        ("image", ""),
    ]
}

// =============================================================================
// Dashboard
// =============================================================================

#[tokio::test]
async fn test_dashboard_lists_products_and_categories() {
    let mut client = TestClient::admin(sample_store());
    let response = client.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Classic Patty"));
    assert!(response.body.contains("$11.49"));
    assert!(response.body.contains(r#"href="/products/classic/edit""#));
    assert!(response.body.contains("Shakes"));
    assert_eq!(response.headers.get("cache-control").unwrap(), "no-store");
}

#[tokio::test]
async fn test_dashboard_ignores_unknown_notice() {
    let mut client = TestClient::admin(sample_store());
    let body = client.get("/?notice=%3Cb%3Ehi%3C%2Fb%3E").await.body;

    assert!(!body.contains("notice-success"));
    assert!(!body.contains("<b>hi</b>"));
}

// =============================================================================
// Creating Products
// =============================================================================

#[tokio::test]
async fn test_create_product_with_placeholder_image() {
    let store = Arc::new(MemoryCatalogStore::new());
    let mut client = TestClient::admin(store.clone());

    let mut fields = product_fields("Grilled Cheese", "6.50", "4");
    fields.push(("favorite", "on"));
    let response = client.post_form("/products", &fields).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/?notice=created"));

    let products = store.list_products().await.unwrap();
    assert_eq!(products.len(), 1);
    let created = &products[0];
    assert_eq!(created.name, "Grilled Cheese");
    assert_eq!(created.price.display(), "$6.50");
    assert_eq!(created.position, 4);
    assert!(created.favorite);
    assert_eq!(created.image_url(), PLACEHOLDER_IMAGE);

    let body = client.get("/?notice=created").await.body;
    assert!(body.contains("Product created."));
}

#[tokio::test]
async fn test_invalid_price_keeps_submitted_values() {
    let store = Arc::new(MemoryCatalogStore::new());
    let mut client = TestClient::admin(store.clone());

    let response = client
        .post_form("/products", &product_fields("Grilled Cheese", "six", "2"))
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body.contains("Please fix the highlighted fields"));
    assert!(response.body.contains(r#"value="Grilled Cheese""#));
    assert!(response.body.contains(r#"value="six""#));
    assert!(response.body.contains(r#"value="2""#));
    assert!(store.list_products().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_negative_price_and_bad_position_are_rejected() {
    let store = Arc::new(MemoryCatalogStore::new());
    let mut client = TestClient::admin(store.clone());

    let response = client
        .post_form("/products", &product_fields("Grilled Cheese", "-1", "first"))
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body.contains("negative"));
    assert!(response.body.contains("whole number"));
    assert!(store.list_products().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_store_failure_keeps_form_and_reports() {
    let mut client = TestClient::admin(Arc::new(FailingStore));

    let response = client
        .post_form("/products", &product_fields("Grilled Cheese", "6.50", "1"))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body.contains("could not be saved"));
    assert!(response.body.contains(r#"value="Grilled Cheese""#));
    assert!(!response.body.contains("connection refused"));
}

#[tokio::test]
async fn test_delete_failure_keeps_confirmation_and_reports() {
    let mut client = TestClient::admin(Arc::new(FailingStore));

    let response = client
        .post_form("/products/fries/delete", &[("confirm", "true")])
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body.contains("could not be deleted"));
    assert!(response.body.contains(r#"action="/products/fries/delete""#));
    assert!(!response.body.contains("could not be loaded"));
    assert!(!response.body.contains("connection refused"));
}

// =============================================================================
// Editing and Deleting Products
// =============================================================================

#[tokio::test]
async fn test_edit_form_is_prefilled() {
    let mut client = TestClient::admin(sample_store());
    let response = client.get("/products/double/edit").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(r#"value="Double Wagon""#));
    assert!(response.body.contains(r#"value="11.49""#));
    assert!(response.body.contains(r#"action="/products/double""#));
    assert!(response.body.contains(r#"<option value="Burgers">"#));
}

#[tokio::test]
async fn test_edit_unknown_product_is_not_found() {
    let mut client = TestClient::admin(sample_store());
    assert_eq!(
        client.get("/products/nope/edit").await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_update_overwrites_every_field() {
    let store = sample_store();
    let mut client = TestClient::admin(store.clone());

    let response = client
        .post_form(
            "/products/double",
            &[
                ("name", "Triple Wagon"),
                ("description", "Three patties"),
                ("price", "13.00"),
                ("category", "Burgers"),
                ("position", "3"),
                ("image", "https://cdn.example/triple.jpg"),
            ],
        )
        .await;
    assert_eq!(response.location(), Some("/?notice=updated"));

    let products = store.list_products().await.unwrap();
    let updated = products
        .iter()
        .find(|product| product.id == ProductId::new("double"))
        .unwrap();
    assert_eq!(updated.name, "Triple Wagon");
    assert_eq!(updated.description, "Three patties");
    assert_eq!(updated.price.display(), "$13.00");
    assert_eq!(updated.position, 3);
    // Unticked checkbox
    assert!(!updated.favorite);
    assert_eq!(updated.image, "https://cdn.example/triple.jpg");
}

#[tokio::test]
async fn test_update_unknown_product_is_not_found() {
    let mut client = TestClient::admin(sample_store());
    let response = client
        .post_form("/products/nope", &product_fields("Ghost", "1", "1"))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let store = sample_store();
    let mut client = TestClient::admin(store.clone());

    let response = client.post_form("/products/fries/delete", &[]).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Delete <strong>Fries</strong>?"));
    assert_eq!(store.list_products().await.unwrap().len(), 5);

    let response = client
        .post_form("/products/fries/delete", &[("confirm", "true")])
        .await;
    assert_eq!(response.location(), Some("/?notice=deleted"));

    let products = store.list_products().await.unwrap();
    assert_eq!(products.len(), 4);
    assert!(products.iter().all(|product| product.name != "Fries"));
}

#[tokio::test]
async fn test_delete_unknown_product_is_not_found() {
    let mut client = TestClient::admin(sample_store());
    let response = client
        .post_form("/products/nope/delete", &[("confirm", "true")])
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Categories
// =============================================================================

#[tokio::test]
async fn test_create_category() {
    let store = sample_store();
    let mut client = TestClient::admin(store.clone());

    let response = client
        .post_form("/categories", &[("name", "Desserts"), ("position", "4")])
        .await;
    assert_eq!(response.location(), Some("/categories?notice=created"));

    let body = client.get("/categories?notice=created").await.body;
    assert!(body.contains("Category created."));
    assert!(body.contains("<td>Desserts</td>"));

    let categories = store.list_categories().await.unwrap();
    assert_eq!(categories.len(), 4);
}

#[tokio::test]
async fn test_create_category_rejects_bad_position() {
    let store = sample_store();
    let mut client = TestClient::admin(store.clone());

    let response = client
        .post_form("/categories", &[("name", "Desserts"), ("position", "last")])
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body.contains(r#"value="Desserts""#));
    assert!(response.body.contains(r#"value="last""#));
    assert_eq!(store.list_categories().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_admin_health_endpoints() {
    let mut client = TestClient::admin(sample_store());
    assert_eq!(client.get("/health").await.status, StatusCode::OK);
    assert_eq!(client.get("/health/ready").await.status, StatusCode::OK);

    let mut failing = TestClient::admin(Arc::new(FailingStore));
    assert_eq!(
        failing.get("/health/ready").await.status,
        StatusCode::SERVICE_UNAVAILABLE
    );
}
