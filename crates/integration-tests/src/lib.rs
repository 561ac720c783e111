//! Integration tests for Patty Wagon.
//!
//! Both applications are driven in-process through `tower::ServiceExt::oneshot`
//! against an in-memory catalog, so no database or network is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p patty-wagon-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_menu` - Home page, menu filters, catalog failures
//! - `storefront_cart` - Cart flows across requests
//! - `admin_catalog` - Product and category editing

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use patty_wagon_core::{
    CatalogStore, Category, CategoryId, CategoryInput, MemoryCatalogStore, Price, Product,
    ProductId, ProductInput, StoreError, StoreResult,
};
use secrecy::SecretString;
use tower::ServiceExt;
use tower_sessions::MemoryStore;

// =============================================================================
// Fixtures
// =============================================================================

/// Build a product with the given fields and an empty image.
#[must_use]
pub fn product(id: &str, name: &str, price: &str, category: &str, position: i32) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: format!("{name} description"),
        price: Price::parse(price).unwrap(),
        category: category.to_string(),
        position,
        favorite: false,
        image: String::new(),
    }
}

#[must_use]
pub fn category(id: &str, name: &str, position: i32) -> Category {
    Category {
        id: CategoryId::new(id),
        name: name.to_string(),
        position,
    }
}

/// A small menu: two burgers, fries, a shake and an uncategorized special.
#[must_use]
pub fn sample_store() -> Arc<MemoryCatalogStore> {
    let mut classic = product("classic", "Classic Patty", "8.99", "Burgers", 1);
    classic.favorite = true;
    let double = product("double", "Double Wagon", "11.49", "Burgers", 2);
    let mut fries = product("fries", "Fries", "3.49", "Sides", 1);
    fries.favorite = true;
    let shake = product("shake", "Vanilla Shake", "5.50", "Shakes", 1);
    let special = product("special", "Seasonal Pie", "4.00", "Desserts", 1);

    Arc::new(MemoryCatalogStore::with_records(
        // Deliberately out of display order
        vec![double, shake, fries, classic, special],
        vec![
            category("cat-shakes", "Shakes", 3),
            category("cat-burgers", "Burgers", 1),
            category("cat-sides", "Sides", 2),
        ],
    ))
}

/// Catalog store that fails every operation.
#[derive(Debug, Default)]
pub struct FailingStore;

fn unavailable<T>() -> StoreResult<T> {
    Err(StoreError::Unavailable("connection refused".to_string()))
}

#[async_trait]
impl CatalogStore for FailingStore {
    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        unavailable()
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        unavailable()
    }

    async fn create_product(&self, _input: &ProductInput) -> StoreResult<Product> {
        unavailable()
    }

    async fn update_product(&self, _id: &ProductId, _input: &ProductInput) -> StoreResult<Product> {
        unavailable()
    }

    async fn delete_product(&self, _id: &ProductId) -> StoreResult<()> {
        unavailable()
    }

    async fn create_category(&self, _input: &CategoryInput) -> StoreResult<Category> {
        unavailable()
    }

    async fn ping(&self) -> StoreResult<()> {
        unavailable()
    }
}

// =============================================================================
// Application Builders
// =============================================================================

fn storefront_config() -> patty_wagon_storefront::config::StorefrontConfig {
    patty_wagon_storefront::config::StorefrontConfig {
        database_url: SecretString::from("postgres://localhost/patty_wagon_test"),
        host: "127.0.0.1".parse().unwrap(),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

fn admin_config() -> patty_wagon_admin::config::AdminConfig {
    patty_wagon_admin::config::AdminConfig {
        database_url: SecretString::from("postgres://localhost/patty_wagon_test"),
        host: "127.0.0.1".parse().unwrap(),
        port: 3001,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

// =============================================================================
// Test Client
// =============================================================================

/// A response with its body read to a string.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The redirect target, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }
}

/// Drives a router like a browser that keeps one session cookie.
pub struct TestClient {
    router: Router,
    cookie: Option<String>,
}

impl TestClient {
    /// Storefront backed by `store`, with in-memory sessions.
    #[must_use]
    pub fn storefront(store: Arc<dyn CatalogStore>) -> Self {
        let state = patty_wagon_storefront::state::AppState::new(storefront_config(), store);
        let sessions =
            patty_wagon_storefront::middleware::session_layer(MemoryStore::default(), false);
        Self {
            router: patty_wagon_storefront::app(state, sessions),
            cookie: None,
        }
    }

    /// Admin panel backed by `store`.
    #[must_use]
    pub fn admin(store: Arc<dyn CatalogStore>) -> Self {
        let state = patty_wagon_admin::state::AppState::new(admin_config(), store);
        Self {
            router: patty_wagon_admin::app(state),
            cookie: None,
        }
    }

    /// Another visitor on the same application, starting without a cookie.
    #[must_use]
    pub fn new_visitor(&self) -> Self {
        Self {
            router: self.router.clone(),
            cookie: None,
        }
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = Request::builder().method("GET").uri(uri);
        self.send(request, Body::empty()).await
    }

    /// POST an `application/x-www-form-urlencoded` body.
    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&");
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        self.send(request, Body::from(body)).await
    }

    async fn send(
        &mut self,
        mut request: axum::http::request::Builder,
        body: Body,
    ) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }

        let response = self
            .router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
        {
            let pair = set_cookie.split(';').next().unwrap_or_default().trim();
            let has_value = pair.split_once('=').is_some_and(|(_, value)| !value.is_empty());
            self.cookie = has_value.then(|| pair.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}
