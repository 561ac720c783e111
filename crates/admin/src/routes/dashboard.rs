//! Dashboard route handler.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
};
use patty_wagon_core::{Catalog, CategoryCard, Product};
use tracing::instrument;

use super::{NoticeQuery, render};
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Product row for the dashboard table.
#[derive(Debug, Clone)]
pub struct ProductRowView {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub position: i32,
    pub favorite: bool,
    pub image: String,
    pub edit_href: String,
    pub delete_href: String,
}

impl From<&Product> for ProductRowView {
    fn from(product: &Product) -> Self {
        let id = urlencoding::encode(product.id.as_str()).into_owned();
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            price: product.price.display(),
            position: product.position,
            favorite: product.favorite,
            image: product.image_url().to_string(),
            edit_href: format!("/products/{id}/edit"),
            delete_href: format!("/products/{id}/delete"),
        }
    }
}

/// Category row with its product count.
#[derive(Debug, Clone)]
pub struct CategoryRowView {
    pub name: String,
    pub position: i32,
    pub product_count: usize,
}

impl From<&CategoryCard<'_>> for CategoryRowView {
    fn from(card: &CategoryCard<'_>) -> Self {
        Self {
            name: card.category.name.clone(),
            position: card.category.position,
            product_count: card.product_count,
        }
    }
}

/// Dashboard template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub current_path: String,
    pub notice: Option<String>,
    pub products: Vec<ProductRowView>,
    pub categories: Vec<CategoryRowView>,
}

/// Dashboard page handler.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Result<Html<String>> {
    let catalog = Catalog::load(state.store()).await?;

    render(&DashboardTemplate {
        current_path: "/".to_string(),
        notice: query.message("Product"),
        products: catalog.products().iter().map(ProductRowView::from).collect(),
        categories: catalog
            .category_cards()
            .iter()
            .map(CategoryRowView::from)
            .collect(),
    })
}
