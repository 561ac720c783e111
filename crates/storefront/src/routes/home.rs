//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use patty_wagon_core::FAVORITES_LIMIT;
use tower_sessions::Session;
use tracing::instrument;

use super::{CategoryCardView, Layout, ProductCardView};
use crate::error::Result;
use crate::filters;
use crate::services::CartStore;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: Layout,
    pub categories: Vec<CategoryCardView>,
    pub favorites: Vec<ProductCardView>,
    /// Where add-to-cart forms send the visitor back to.
    pub return_to: String,
}

/// Display the home page.
#[instrument(skip_all)]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    carts: CartStore,
) -> Result<HomeTemplate> {
    let catalog = state.catalog().await?;
    let cart = carts.get().await;

    Ok(HomeTemplate {
        layout: Layout::load(&session, &cart).await,
        categories: catalog
            .category_cards()
            .iter()
            .map(CategoryCardView::from)
            .collect(),
        favorites: catalog
            .favorites(FAVORITES_LIMIT)
            .into_iter()
            .map(ProductCardView::from)
            .collect(),
        return_to: "/".to_string(),
    })
}
