//! In-process catalog store.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use uuid::Uuid;

use super::{CatalogStore, StoreError, StoreResult};
use crate::types::{Category, CategoryId, CategoryInput, Product, ProductId, ProductInput};

#[derive(Debug, Default)]
struct Collections {
    products: Vec<Product>,
    categories: Vec<Category>,
}

/// Catalog store kept in memory, returning records in insertion order.
#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
    collections: RwLock<Collections>,
}

impl MemoryCatalogStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records.
    #[must_use]
    pub fn with_records(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self {
            collections: RwLock::new(Collections {
                products,
                categories,
            }),
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Collections>> {
        self.collections
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_owned()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Collections>> {
        self.collections
            .write()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_owned()))
    }
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        Ok(self.read()?.products.clone())
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.read()?.categories.clone())
    }

    async fn create_product(&self, input: &ProductInput) -> StoreResult<Product> {
        let product = input.clone().into_product(ProductId::new(new_id()));
        self.write()?.products.push(product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: &ProductId, input: &ProductInput) -> StoreResult<Product> {
        let mut collections = self.write()?;
        let slot = collections
            .products
            .iter_mut()
            .find(|product| product.id == *id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        *slot = input.clone().into_product(id.clone());
        Ok(slot.clone())
    }

    async fn delete_product(&self, id: &ProductId) -> StoreResult<()> {
        let mut collections = self.write()?;
        let before = collections.products.len();
        collections.products.retain(|product| product.id != *id);
        if collections.products.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn create_category(&self, input: &CategoryInput) -> StoreResult<Category> {
        let category = input.clone().into_category(CategoryId::new(new_id()));
        self.write()?.categories.push(category.clone());
        Ok(category)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.read().map(|_| ())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::{PLACEHOLDER_IMAGE, Price};

    fn input(name: &str) -> ProductInput {
        ProductInput {
            name: name.to_owned(),
            description: String::new(),
            price: Price::parse("4.25").unwrap(),
            category: "Sides".to_owned(),
            position: 1,
            favorite: false,
            image: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_ids_and_placeholder() {
        let store = MemoryCatalogStore::new();
        let a = store.create_product(&input("Fries")).await.unwrap();
        let b = store.create_product(&input("Onion Rings")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.image, PLACEHOLDER_IMAGE);

        let names: Vec<String> = store
            .list_products()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["Fries", "Onion Rings"]);
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let store = MemoryCatalogStore::new();
        let created = store.create_product(&input("Fries")).await.unwrap();
        let mut changed = input("Curly Fries");
        changed.favorite = true;
        let updated = store.update_product(&created.id, &changed).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Curly Fries");
        assert!(store.list_products().await.unwrap()[0].favorite);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let store = MemoryCatalogStore::new();
        let missing = ProductId::new("missing");
        assert!(matches!(
            store.update_product(&missing, &input("x")).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.delete_product(&missing).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_removes_product() {
        let store = MemoryCatalogStore::new();
        let created = store.create_product(&input("Fries")).await.unwrap();
        store.delete_product(&created.id).await.unwrap();
        assert!(store.list_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_category() {
        let store = MemoryCatalogStore::new();
        let category = store
            .create_category(&CategoryInput {
                name: "Drinks".to_owned(),
                position: 4,
            })
            .await
            .unwrap();
        assert_eq!(store.list_categories().await.unwrap(), vec![category]);
        store.ping().await.unwrap();
    }
}
