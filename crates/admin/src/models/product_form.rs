//! Product create/edit form.

use patty_wagon_core::{Price, Product, ProductInput};
use serde::Deserialize;

use super::{FieldErrors, parse_position};

/// Product form fields as submitted.
///
/// Only price and position are validated. Everything else is stored as
/// typed; an empty image becomes the placeholder on save.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub position: String,
    /// Checkbox: present (any value) when ticked.
    #[serde(default)]
    pub favorite: Option<String>,
    #[serde(default)]
    pub image: String,
}

impl ProductForm {
    /// Pre-fill the form from a stored product.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.amount().to_string(),
            category: product.category.clone(),
            position: product.position.to_string(),
            favorite: product.favorite.then(|| "on".to_string()),
            image: product.image.clone(),
        }
    }

    #[must_use]
    pub const fn is_favorite(&self) -> bool {
        self.favorite.is_some()
    }

    /// Validate the form into writeable product fields.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages when price is not a non-negative number
    /// or position is not an integer.
    pub fn validate(&self) -> Result<ProductInput, FieldErrors> {
        let price = Price::parse(&self.price).map_err(|e| e.to_string());
        let position = parse_position(&self.position);

        match (price, position) {
            (Ok(price), Ok(position)) => Ok(ProductInput {
                name: self.name.trim().to_string(),
                description: self.description.trim().to_string(),
                price,
                category: self.category.trim().to_string(),
                position,
                favorite: self.is_favorite(),
                image: self.image.trim().to_string(),
            }),
            (price, position) => Err(FieldErrors {
                price: price.err(),
                position: position.err(),
            }),
        }
    }
}
