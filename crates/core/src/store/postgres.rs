//! `PostgreSQL` catalog store.
//!
//! # Tables
//!
//! - `catalog.product` - menu items
//! - `catalog.category` - menu sections
//!
//! Records are read back in creation order. Migrations live in the
//! workspace `migrations/` directory and are applied with `pw-cli migrate`.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::{CatalogStore, StoreError, StoreResult};
use crate::types::{Category, CategoryId, CategoryInput, Price, Product, ProductId, ProductInput};

const PRODUCT_COLUMNS: &str = "id, name, description, price, category, position, favorite, image";

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    description: String,
    price: Decimal,
    category: String,
    position: i32,
    favorite: bool,
    image: String,
}

impl TryFrom<ProductRow> for Product {
    type Error = StoreError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let price = Price::new(row.price).map_err(|e| {
            StoreError::DataCorruption(format!("invalid price for product {}: {e}", row.id))
        })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price,
            category: row.category,
            position: row.position,
            favorite: row.favorite,
            image: row.image,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: CategoryId,
    name: String,
    position: i32,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            position: row.position,
        }
    }
}

/// Catalog store backed by a `PostgreSQL` pool.
#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    /// Create a store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM catalog.product ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, position FROM catalog.category ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn create_product(&self, input: &ProductInput) -> StoreResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            INSERT INTO catalog.product
                (name, description, price, category, position, favorite, image)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price.amount())
        .bind(&input.category)
        .bind(input.position)
        .bind(input.favorite)
        .bind(input.image_url())
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(product_id = %row.id, "Product created");
        Product::try_from(row)
    }

    async fn update_product(&self, id: &ProductId, input: &ProductInput) -> StoreResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            UPDATE catalog.product
            SET name = $2, description = $3, price = $4, category = $5,
                position = $6, favorite = $7, image = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price.amount())
        .bind(&input.category)
        .bind(input.position)
        .bind(input.favorite)
        .bind(input.image_url())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        tracing::info!(product_id = %row.id, "Product updated");
        Product::try_from(row)
    }

    async fn delete_product(&self, id: &ProductId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM catalog.product WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }

        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }

    async fn create_category(&self, input: &CategoryInput) -> StoreResult<Category> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            INSERT INTO catalog.category (name, position)
            VALUES ($1, $2)
            RETURNING id, name, position
            ",
        )
        .bind(&input.name)
        .bind(input.position)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(category_id = %row.id, "Category created");
        Ok(Category::from(row))
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
