//! Product records held by the catalog store.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// Image shown for products saved without an image reference.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=200&width=300";

/// A menu item as stored in the `products` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identifier.
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Name of the category this product is listed under.
    ///
    /// Joined to [`Category::name`](super::Category::name) by value; nothing
    /// guarantees a matching category exists.
    pub category: String,
    /// Manual sort key. Not unique.
    pub position: i32,
    pub favorite: bool,
    /// Image URL, see [`Product::image_url`].
    #[serde(default)]
    pub image: String,
}

impl Product {
    /// The image URL to render, falling back to [`PLACEHOLDER_IMAGE`].
    #[must_use]
    pub fn image_url(&self) -> &str {
        image_or_placeholder(&self.image)
    }
}

/// Writeable product fields, used for create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: String,
    pub position: i32,
    pub favorite: bool,
    pub image: String,
}

impl ProductInput {
    /// The image reference that will be stored, falling back to
    /// [`PLACEHOLDER_IMAGE`].
    #[must_use]
    pub fn image_url(&self) -> &str {
        image_or_placeholder(&self.image)
    }

    /// Attach a store-assigned ID, producing the stored record.
    ///
    /// An empty image reference is replaced with [`PLACEHOLDER_IMAGE`].
    #[must_use]
    pub fn into_product(self, id: ProductId) -> Product {
        let image = self.image_url().to_owned();
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            position: self.position,
            favorite: self.favorite,
            image,
        }
    }
}

impl From<&Product> for ProductInput {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            category: product.category.clone(),
            position: product.position,
            favorite: product.favorite,
            image: product.image.clone(),
        }
    }
}

fn image_or_placeholder(image: &str) -> &str {
    if image.trim().is_empty() {
        PLACEHOLDER_IMAGE
    } else {
        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(image: &str) -> ProductInput {
        ProductInput {
            name: "Burger".to_owned(),
            description: "Double patty".to_owned(),
            price: Price::ZERO,
            category: "Burgers".to_owned(),
            position: 1,
            favorite: false,
            image: image.to_owned(),
        }
    }

    #[test]
    fn test_empty_image_becomes_placeholder() {
        let product = input("  ").into_product(ProductId::new("p1"));
        assert_eq!(product.image, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_input_image_url_matches_stored_image() {
        assert_eq!(input("").image_url(), PLACEHOLDER_IMAGE);
        let with_image = input("/img/shake.png");
        assert_eq!(with_image.image_url(), "/img/shake.png");
        assert_eq!(
            with_image.clone().into_product(ProductId::new("p2")).image,
            with_image.image_url()
        );
    }

    #[test]
    fn test_image_kept_when_present() {
        let product =
            input("https://cdn.example.com/burger.jpg").into_product(ProductId::new("p1"));
        assert_eq!(product.image_url(), "https://cdn.example.com/burger.jpg");
    }

    #[test]
    fn test_image_url_falls_back_for_stored_blank() {
        let mut product = input("x").into_product(ProductId::new("p1"));
        product.image.clear();
        assert_eq!(product.image_url(), PLACEHOLDER_IMAGE);
    }
}
