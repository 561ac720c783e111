//! Cart route handlers.
//!
//! Every mutation is a form POST that reads the stored cart, applies one
//! change, writes the whole cart back and redirects. Lines are addressed by
//! index, so a stale page can post an index that no longer exists; that is
//! answered with 400 rather than guessed at.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use patty_wagon_core::{Cart, ProductId, QuantityChange, format_amount};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::Layout;
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::services::{CartStore, flash};
use crate::state::AppState;

/// Where add-to-cart sends the visitor when no usable return path is given.
const DEFAULT_RETURN_PATH: &str = "/menu";

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub index: usize,
    pub name: String,
    pub image: String,
    pub unit_price: String,
    pub quantity: u32,
    pub subtotal: String,
    /// Quantity posted by the "-" button; zero removes the line.
    pub decrement: i64,
    /// Quantity posted by the "+" button.
    pub increment: i64,
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub item_count: u64,
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart
                .lines()
                .iter()
                .enumerate()
                .map(|(index, line)| CartLineView {
                    index,
                    name: line.product.name.clone(),
                    image: line.product.image_url().to_string(),
                    unit_price: line.product.price.display(),
                    quantity: line.quantity,
                    subtotal: format_amount(line.subtotal()),
                    decrement: i64::from(line.quantity) - 1,
                    increment: i64::from(line.quantity) + 1,
                })
                .collect(),
            total: cart.display_total(),
            item_count: cart.item_count(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    pub return_to: Option<String>,
}

/// Update quantity form data.
///
/// `index` is kept as text and resolved against the stored cart, so that a
/// missing, negative or non-numeric index is an invalid index like any
/// other. `quantity` is signed so that zero and negative values reach the
/// cart, which removes the line.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    #[serde(default)]
    pub index: String,
    pub quantity: i64,
}

/// Remove line form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    #[serde(default)]
    pub index: String,
}

/// Clear cart form data.
#[derive(Debug, Deserialize)]
pub struct ClearCartForm {
    pub confirm: Option<String>,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub layout: Layout,
    pub cart: CartView,
}

/// Clear-cart confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/confirm_clear.html")]
pub struct ConfirmClearTemplate {
    pub layout: Layout,
    pub cart: CartView,
}

/// Order ticket page template, shown after checkout.
#[derive(Template, WebTemplate)]
#[template(path = "cart/order.html")]
pub struct OrderTemplate {
    pub layout: Layout,
    pub items: Vec<String>,
    pub total: String,
}

/// Only same-site absolute paths are followed after add-to-cart.
fn return_path(requested: Option<&str>) -> &str {
    match requested {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => DEFAULT_RETURN_PATH,
    }
}

/// Display cart page.
#[instrument(skip_all)]
pub async fn show(session: Session, carts: CartStore) -> CartShowTemplate {
    let cart = carts.get().await;
    CartShowTemplate {
        layout: Layout::load(&session, &cart).await,
        cart: CartView::from(&cart),
    }
}

/// Add one unit of a product to the cart.
///
/// The product is looked up in a fresh catalog snapshot. An unknown ID is a
/// silent no-op.
#[instrument(skip(state, session, carts))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    carts: CartStore,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let target = return_path(form.return_to.as_deref());
    let product_id = ProductId::new(form.product_id.trim());
    let catalog = state.catalog().await?;

    let Some(product) = catalog.find_product(&product_id) else {
        tracing::debug!(product_id = %product_id, "Ignoring add for unknown product");
        return Ok(Redirect::to(target));
    };

    let mut cart = carts.get().await;
    let quantity = cart.add(product);
    carts.set(&cart).await?;

    add_breadcrumb(
        "cart",
        "Added product",
        Some(&[("product_id", product_id.as_str())]),
    );
    tracing::info!(product_id = %product_id, quantity, "Added to cart");
    flash::set(&session, format!("{} added to your cart", product.name)).await;

    Ok(Redirect::to(target))
}

/// Set the quantity of a cart line. Zero or below removes it.
#[instrument(skip(session, carts))]
pub async fn update(
    session: Session,
    carts: CartStore,
    Form(form): Form<UpdateCartForm>,
) -> Result<Redirect> {
    let mut cart = carts.get().await;
    let index = cart.line_index(&form.index)?;
    let change = cart.update_quantity(index, form.quantity)?;
    carts.set(&cart).await?;

    if let QuantityChange::Removed(line) = change {
        flash::set(&session, format!("{} removed from your cart", line.product.name)).await;
    }

    Ok(Redirect::to("/cart"))
}

/// Remove a cart line.
#[instrument(skip(session, carts))]
pub async fn remove(
    session: Session,
    carts: CartStore,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Redirect> {
    let mut cart = carts.get().await;
    let index = cart.line_index(&form.index)?;
    let line = cart.remove(index)?;
    carts.set(&cart).await?;

    flash::set(&session, format!("{} removed from your cart", line.product.name)).await;
    Ok(Redirect::to("/cart"))
}

/// Empty the cart.
///
/// Without `confirm=true` this only renders a confirmation page.
#[instrument(skip(session, carts))]
pub async fn clear(
    session: Session,
    carts: CartStore,
    Form(form): Form<ClearCartForm>,
) -> Result<Response> {
    if form.confirm.as_deref() != Some("true") {
        let cart = carts.get().await;
        return Ok(ConfirmClearTemplate {
            layout: Layout::load(&session, &cart).await,
            cart: CartView::from(&cart),
        }
        .into_response());
    }

    carts.clear().await?;
    tracing::info!("Cart cleared");
    flash::set(&session, "Your cart is now empty").await;

    Ok(Redirect::to("/cart").into_response())
}

/// Order at the counter: show the itemized ticket and empty the cart.
///
/// An empty cart redirects back without touching storage.
#[instrument(skip_all)]
pub async fn checkout(session: Session, carts: CartStore) -> Result<Response> {
    let mut cart = carts.get().await;
    let Some(ticket) = cart.checkout() else {
        return Ok(Redirect::to("/cart").into_response());
    };

    carts.clear().await?;
    tracing::info!(
        lines = ticket.items.len(),
        total = %ticket.display_total(),
        "Order placed at counter"
    );
    tracing::debug!(ticket = %ticket.message(), "Order ticket");

    Ok(OrderTemplate {
        layout: Layout::load(&session, &cart).await,
        total: ticket.display_total(),
        items: ticket.items,
    }
    .into_response())
}
