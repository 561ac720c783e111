//! Catalog store: the external record collections behind the menu.
//!
//! The store holds two collections, `products` and `categories`. Access is
//! deliberately coarse: create one record, read a whole collection, update
//! or delete by ID. All sorting and filtering happens client-side in
//! [`Catalog`](crate::Catalog).
//!
//! # Implementations
//!
//! - [`MemoryCatalogStore`] - in-process store for tests and local demos
//! - [`postgres::PgCatalogStore`] - `PostgreSQL` store (requires the `postgres` feature)

mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{Category, CategoryInput, Product, ProductId, ProductInput};

pub use memory::MemoryCatalogStore;

/// Errors that can occur during catalog store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[cfg(feature = "postgres")]
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored record could not be turned into a domain type.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// No record has the requested ID.
    #[error("not found: {0}")]
    NotFound(String),

    /// The store cannot currently serve requests.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// CRUD access to the product and category collections.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Read every product, in the store's natural order.
    async fn list_products(&self) -> StoreResult<Vec<Product>>;

    /// Read every category, in the store's natural order.
    async fn list_categories(&self) -> StoreResult<Vec<Category>>;

    /// Create a product and return it with its assigned ID.
    async fn create_product(&self, input: &ProductInput) -> StoreResult<Product>;

    /// Overwrite every writeable field of an existing product.
    ///
    /// Returns `StoreError::NotFound` if no product has `id`.
    async fn update_product(&self, id: &ProductId, input: &ProductInput) -> StoreResult<Product>;

    /// Delete a product.
    ///
    /// Returns `StoreError::NotFound` if no product has `id`.
    async fn delete_product(&self, id: &ProductId) -> StoreResult<()>;

    /// Create a category and return it with its assigned ID.
    async fn create_category(&self, input: &CategoryInput) -> StoreResult<Category>;

    /// Check that the store is reachable.
    async fn ping(&self) -> StoreResult<()>;
}
