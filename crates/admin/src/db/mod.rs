//! Database connection for the admin panel.
//!
//! The admin reads and writes the `catalog` schema through
//! [`PgCatalogStore`](patty_wagon_core::store::postgres::PgCatalogStore).
//! Migrations are applied by `pw-cli migrate`, never on startup.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Create a small `PostgreSQL` connection pool; the dashboard has few users.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
