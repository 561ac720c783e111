//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (category cards + favorites)
//! GET  /menu                   - Full menu (?category=<name> or ?favorites=true)
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (catalog store ping)
//!
//! # Cart (form POST + redirect)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add one unit of a product
//! POST /cart/update            - Set the quantity of a line
//! POST /cart/remove            - Remove a line
//! POST /cart/clear             - Empty the cart (asks for confirmation first)
//! POST /cart/checkout          - Order at the counter
//! ```

pub mod cart;
pub mod health;
pub mod home;
pub mod menu;

use axum::{
    Router,
    routing::{get, post},
};
use patty_wagon_core::{Cart, CategoryCard, Product};
use tower_sessions::Session;

use crate::services::flash;
use crate::state::AppState;

/// Page chrome shared by every full-page template.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    /// Total units in the visitor's cart, shown in the header.
    pub cart_count: u64,
    /// Pending confirmation toast.
    pub flash: Option<String>,
}

impl Layout {
    /// Build the chrome for `cart`, consuming any pending flash message.
    pub async fn load(session: &Session, cart: &Cart) -> Self {
        Self {
            cart_count: cart.item_count(),
            flash: flash::take(session).await,
        }
    }
}

/// Product display data for templates.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub category: String,
    pub favorite: bool,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.display(),
            image: product.image_url().to_string(),
            category: product.category.clone(),
            favorite: product.favorite,
        }
    }
}

/// Category card display data for templates.
#[derive(Debug, Clone)]
pub struct CategoryCardView {
    pub name: String,
    pub image: String,
    pub product_count: usize,
    pub href: String,
}

impl From<&CategoryCard<'_>> for CategoryCardView {
    fn from(card: &CategoryCard<'_>) -> Self {
        Self {
            name: card.category.name.clone(),
            image: card.sample_image.to_string(),
            product_count: card.product_count,
            href: category_href(&card.category.name),
        }
    }
}

/// Menu URL filtered to one category.
#[must_use]
pub fn category_href(name: &str) -> String {
    format!("/menu?category={}", urlencoding::encode(name))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/checkout", post(cart::checkout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/menu", get(menu::menu))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/cart", cart_routes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_href_encodes_name() {
        assert_eq!(category_href("Burgers"), "/menu?category=Burgers");
        assert_eq!(
            category_href("Fries & Sides"),
            "/menu?category=Fries%20%26%20Sides"
        );
    }
}
