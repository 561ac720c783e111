//! Menu page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::Uri,
};
use patty_wagon_core::{Catalog, MenuFilter};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::{Layout, ProductCardView, category_href};
use crate::error::Result;
use crate::filters;
use crate::services::CartStore;
use crate::state::AppState;

/// Menu query parameters.
///
/// `favorites=true` wins over `category`.
#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
    pub favorites: Option<String>,
}

impl MenuQuery {
    #[must_use]
    pub fn filter(&self) -> MenuFilter {
        MenuFilter::from_query(
            self.category.as_deref(),
            self.favorites.as_deref() == Some("true"),
        )
    }
}

/// A group of products under an optional heading.
#[derive(Debug, Clone)]
pub struct MenuSectionView {
    pub heading: Option<String>,
    pub products: Vec<ProductCardView>,
}

/// One entry in the filter bar.
#[derive(Debug, Clone)]
pub struct FilterLink {
    pub label: String,
    pub href: String,
    pub active: bool,
}

/// Menu page template.
#[derive(Template, WebTemplate)]
#[template(path = "menu.html")]
pub struct MenuTemplate {
    pub layout: Layout,
    pub heading: String,
    pub filter_links: Vec<FilterLink>,
    pub sections: Vec<MenuSectionView>,
    /// Where add-to-cart forms send the visitor back to.
    pub return_to: String,
}

impl MenuTemplate {
    /// Whether the active filter matched nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|section| section.products.is_empty())
    }
}

/// Display the menu, filtered by the query string.
#[instrument(skip(state, session, carts, uri))]
pub async fn menu(
    State(state): State<AppState>,
    session: Session,
    carts: CartStore,
    uri: Uri,
    Query(query): Query<MenuQuery>,
) -> Result<MenuTemplate> {
    let catalog = state.catalog().await?;
    let cart = carts.get().await;
    let filter = query.filter();

    Ok(MenuTemplate {
        layout: Layout::load(&session, &cart).await,
        heading: heading(&filter),
        filter_links: filter_links(&catalog, &filter),
        sections: sections(&catalog, &filter),
        return_to: uri
            .path_and_query()
            .map_or_else(|| "/menu".to_string(), ToString::to_string),
    })
}

fn heading(filter: &MenuFilter) -> String {
    match filter {
        MenuFilter::All => "Our Menu".to_string(),
        MenuFilter::Category(name) => name.clone(),
        MenuFilter::Favorites => "Customer Favorites".to_string(),
    }
}

/// The full menu is grouped by category; filtered views are one flat grid.
fn sections(catalog: &Catalog, filter: &MenuFilter) -> Vec<MenuSectionView> {
    if *filter == MenuFilter::All {
        return catalog
            .sections()
            .into_iter()
            .map(|section| MenuSectionView {
                heading: Some(
                    section
                        .category
                        .map_or_else(|| "More".to_string(), |category| category.name.clone()),
                ),
                products: section.products.into_iter().map(ProductCardView::from).collect(),
            })
            .collect();
    }

    vec![MenuSectionView {
        heading: None,
        products: catalog
            .filter(filter)
            .into_iter()
            .map(ProductCardView::from)
            .collect(),
    }]
}

fn filter_links(catalog: &Catalog, active: &MenuFilter) -> Vec<FilterLink> {
    let mut links = vec![FilterLink {
        label: "All".to_string(),
        href: "/menu".to_string(),
        active: *active == MenuFilter::All,
    }];
    links.extend(catalog.categories().iter().map(|category| FilterLink {
        label: category.name.clone(),
        href: category_href(&category.name),
        active: matches!(active, MenuFilter::Category(name) if *name == category.name),
    }));
    links.push(FilterLink {
        label: "Favorites".to_string(),
        href: "/menu?favorites=true".to_string(),
        active: *active == MenuFilter::Favorites,
    });
    links
}
