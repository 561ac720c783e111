//! Catalog snapshot: sorted products and categories plus menu filtering.
//!
//! A [`Catalog`] is loaded once per page view and passed to whatever needs
//! it. It is never refreshed in place.

use crate::store::{CatalogStore, StoreResult};
use crate::types::{Category, PLACEHOLDER_IMAGE, Product, ProductId};

/// Maximum number of favorites shown on the home page.
pub const FAVORITES_LIMIT: usize = 6;

/// Which products the menu page shows. Exactly one filter is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MenuFilter {
    /// Every product.
    #[default]
    All,
    /// Products whose category name equals the given name.
    Category(String),
    /// Products flagged favorite.
    Favorites,
}

impl MenuFilter {
    /// Build a filter from menu query parameters.
    ///
    /// `favorites` wins over `category`; a blank category means no filter.
    #[must_use]
    pub fn from_query(category: Option<&str>, favorites: bool) -> Self {
        if favorites {
            return Self::Favorites;
        }
        match category.map(str::trim) {
            Some(name) if !name.is_empty() => Self::Category(name.to_owned()),
            _ => Self::All,
        }
    }

    fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Category(name) => product.category == *name,
            Self::Favorites => product.favorite,
        }
    }
}

/// Summary card for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCard<'a> {
    pub category: &'a Category,
    /// Image of the first product in the category, or the placeholder.
    pub sample_image: &'a str,
    pub product_count: usize,
}

/// Products grouped under one heading on the full menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSection<'a> {
    /// `None` for products whose category matches no category record.
    pub category: Option<&'a Category>,
    pub products: Vec<&'a Product>,
}

/// An in-memory, sorted view of the catalog store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl Catalog {
    /// Build a snapshot, sorting both collections by position.
    ///
    /// The sort is stable: records with equal positions keep the order they
    /// were given in.
    #[must_use]
    pub fn new(mut products: Vec<Product>, mut categories: Vec<Category>) -> Self {
        products.sort_by_key(|product| product.position);
        categories.sort_by_key(|category| category.position);
        Self {
            products,
            categories,
        }
    }

    /// Fetch every product and category from `store` and build a snapshot.
    ///
    /// # Errors
    ///
    /// Returns the store's error if either collection cannot be read.
    pub async fn load(store: &dyn CatalogStore) -> StoreResult<Self> {
        let categories = store.list_categories().await?;
        let products = store.list_products().await?;
        tracing::debug!(
            products = products.len(),
            categories = categories.len(),
            "Catalog loaded"
        );
        Ok(Self::new(products, categories))
    }

    /// Products in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Categories in display order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn find_product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == *id)
    }

    /// Up to `limit` favorite products, in display order.
    #[must_use]
    pub fn favorites(&self, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| product.favorite)
            .take(limit)
            .collect()
    }

    /// Products matching `filter`, in display order.
    #[must_use]
    pub fn filter(&self, filter: &MenuFilter) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| filter.matches(product))
            .collect()
    }

    /// One card per category, in category order.
    #[must_use]
    pub fn category_cards(&self) -> Vec<CategoryCard<'_>> {
        self.categories
            .iter()
            .map(|category| {
                let members: Vec<&Product> = self
                    .products
                    .iter()
                    .filter(|product| product.category == category.name)
                    .collect();
                CategoryCard {
                    category,
                    sample_image: members
                        .first()
                        .copied()
                        .map_or(PLACEHOLDER_IMAGE, Product::image_url),
                    product_count: members.len(),
                }
            })
            .collect()
    }

    /// Products grouped by category, in category order.
    ///
    /// Categories without products are skipped. Products whose category
    /// name matches no category record are collected into a trailing section
    /// with `category: None`.
    #[must_use]
    pub fn sections(&self) -> Vec<MenuSection<'_>> {
        let mut sections: Vec<MenuSection<'_>> = self
            .categories
            .iter()
            .map(|category| MenuSection {
                category: Some(category),
                products: self
                    .products
                    .iter()
                    .filter(|product| product.category == category.name)
                    .collect(),
            })
            .filter(|section| !section.products.is_empty())
            .collect();

        let orphans: Vec<&Product> = self
            .products
            .iter()
            .filter(|product| {
                !self
                    .categories
                    .iter()
                    .any(|category| category.name == product.category)
            })
            .collect();
        if !orphans.is_empty() {
            sections.push(MenuSection {
                category: None,
                products: orphans,
            });
        }

        sections
    }
}
