//! Seed the catalog with a menu described in YAML.
//!
//! # File Format
//!
//! ```yaml
//! categories:
//!   - name: Burgers
//!     position: 1
//! products:
//!   - name: Classic Patty
//!     description: Beef, cheddar, pickles
//!     price: "8.99"
//!     category: Burgers
//!     position: 1
//!     favorite: true
//! ```
//!
//! The whole file is validated before the database is touched.

use std::collections::HashSet;
use std::path::Path;

use patty_wagon_core::store::postgres::PgCatalogStore;
use patty_wagon_core::{CatalogStore, CategoryInput, Price, ProductInput};
use secrecy::ExposeSecret;
use serde::Deserialize;
use sqlx::PgPool;
use thiserror::Error;
use tracing::{error, info, warn};

use super::database_url;

/// Errors from reading a menu file.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{} validation errors found", .0.len())]
    Invalid(Vec<String>),
}

/// A menu file as written.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MenuFile {
    #[serde(default)]
    pub categories: Vec<SeedCategory>,
    #[serde(default)]
    pub products: Vec<SeedProduct>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedCategory {
    pub name: String,
    #[serde(default)]
    pub position: i32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Kept as text and parsed like the admin form does.
    pub price: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub image: String,
}

/// A validated menu, ready to write.
#[derive(Debug)]
pub struct Menu {
    pub categories: Vec<CategoryInput>,
    pub products: Vec<ProductInput>,
}

/// Parse and validate a menu file.
///
/// Products naming a category the file does not define are allowed (they
/// appear in the storefront's trailing section) but are logged.
///
/// # Errors
///
/// Returns `SeedError::Yaml` for malformed YAML and `SeedError::Invalid`
/// listing every bad entry.
pub fn parse_menu(content: &str) -> Result<Menu, SeedError> {
    let file: MenuFile = serde_yaml::from_str(content)?;
    let mut problems = Vec::new();

    let mut category_names = HashSet::new();
    for (i, category) in file.categories.iter().enumerate() {
        if category.name.trim().is_empty() {
            problems.push(format!("categories[{i}]: name is empty"));
        } else if !category_names.insert(category.name.trim()) {
            problems.push(format!(
                "categories[{i}]: duplicate category {:?}",
                category.name
            ));
        }
    }

    let mut products = Vec::with_capacity(file.products.len());
    for (i, product) in file.products.iter().enumerate() {
        if product.name.trim().is_empty() {
            problems.push(format!("products[{i}]: name is empty"));
        }
        let category = product.category.trim();
        if !category.is_empty() && !category_names.contains(category) {
            warn!(
                product = %product.name,
                category,
                "Product category is not defined in this file"
            );
        }
        match Price::parse(&product.price) {
            Ok(price) => products.push(ProductInput {
                name: product.name.trim().to_string(),
                description: product.description.trim().to_string(),
                price,
                category: category.to_string(),
                position: product.position,
                favorite: product.favorite,
                image: product.image.trim().to_string(),
            }),
            Err(e) => problems.push(format!("products[{i}] ({}): {e}", product.name)),
        }
    }

    if !problems.is_empty() {
        return Err(SeedError::Invalid(problems));
    }

    let categories = file
        .categories
        .into_iter()
        .map(|category| CategoryInput {
            name: category.name.trim().to_string(),
            position: category.position,
        })
        .collect();

    Ok(Menu {
        categories,
        products,
    })
}

/// Seed the catalog from a YAML file.
///
/// # Arguments
///
/// * `path` - Path to the YAML menu file
/// * `clear_existing` - If true, delete every product and category first
///
/// # Errors
///
/// Returns an error if the file is missing or invalid, or a database
/// operation fails.
pub async fn menu(path: &Path, clear_existing: bool) -> Result<(), Box<dyn std::error::Error>> {
    let database_url = database_url()?;

    if !path.exists() {
        return Err(format!("File not found: {}", path.display()).into());
    }

    info!(path = %path.display(), "Loading menu from file");

    // Read and validate YAML before connecting to database
    let content = tokio::fs::read_to_string(path).await?;
    let menu = match parse_menu(&content) {
        Ok(menu) => menu,
        Err(SeedError::Invalid(problems)) => {
            error!("Menu validation failed:");
            for problem in &problems {
                error!("  - {problem}");
            }
            return Err(SeedError::Invalid(problems).into());
        }
        Err(e) => return Err(e.into()),
    };

    info!(
        categories = menu.categories.len(),
        products = menu.products.len(),
        "Menu validated successfully"
    );

    let pool = PgPool::connect(database_url.expose_secret()).await?;
    info!("Connected to database");

    if clear_existing {
        clear_catalog(&pool).await?;
    }

    let store = PgCatalogStore::new(pool);
    for category in &menu.categories {
        store.create_category(category).await?;
    }
    for product in &menu.products {
        store.create_product(product).await?;
    }

    info!("Seeding complete!");
    info!("  Categories inserted: {}", menu.categories.len());
    info!("  Products inserted: {}", menu.products.len());

    Ok(())
}

/// Delete every product and category in one transaction.
async fn clear_catalog(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    let products = sqlx::query("DELETE FROM catalog.product")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    let categories = sqlx::query("DELETE FROM catalog.category")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    tx.commit().await?;

    info!(products, categories, "Cleared existing catalog");
    Ok(())
}
