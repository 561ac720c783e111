//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (catalog store ping)
//!
//! # Dashboard
//! GET  /                           - Product and category lists
//!
//! # Products
//! GET  /products/new               - New product form
//! POST /products                   - Create product
//! GET  /products/{id}/edit         - Edit product form
//! POST /products/{id}              - Update product
//! POST /products/{id}/delete       - Delete product (asks for confirmation first)
//!
//! # Categories
//! GET  /categories                 - Category list and new category form
//! POST /categories                 - Create category
//! ```

pub mod categories;
pub mod dashboard;
pub mod health;
pub mod products;

use askama::Template;
use axum::{
    Router,
    response::Html,
    routing::{get, post},
};
use serde::Deserialize;

use crate::error::Result;
use crate::state::AppState;

/// Outcome of a successful write, carried to the next page in the query
/// string as `?notice=<code>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Created,
    Updated,
    Deleted,
}

impl Notice {
    /// Query-string code for this notice.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        }
    }

    /// Parse a query-string code. Unknown codes are ignored.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "created" => Some(Self::Created),
            "updated" => Some(Self::Updated),
            "deleted" => Some(Self::Deleted),
            _ => None,
        }
    }

    /// Banner text, e.g. "Product created."
    #[must_use]
    pub fn message(self, subject: &str) -> String {
        format!("{subject} {}.", self.code())
    }
}

/// `?notice=` query parameter.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

impl NoticeQuery {
    /// Banner text for `subject`, if the query carries a known notice.
    #[must_use]
    pub fn message(&self, subject: &str) -> Option<String> {
        self.notice
            .as_deref()
            .and_then(Notice::from_code)
            .map(|notice| notice.message(subject))
    }
}

/// Render a template into an HTML response.
///
/// # Errors
///
/// Returns `AppError::Template` if rendering fails.
pub fn render(template: &impl Template) -> Result<Html<String>> {
    Ok(Html(template.render()?))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(products::create))
        .route("/new", get(products::new_product))
        .route("/{id}", post(products::update))
        .route("/{id}/edit", get(products::edit))
        .route("/{id}/delete", post(products::delete))
}

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/products", product_routes())
        .route(
            "/categories",
            get(categories::index).post(categories::create),
        )
}
