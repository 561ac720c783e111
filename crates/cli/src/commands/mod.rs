//! CLI subcommands.

pub mod migrate;
pub mod seed;

use secrecy::SecretString;

/// Read the database URL shared by every command.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is not set.
pub fn database_url() -> Result<SecretString, Box<dyn std::error::Error>> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    std::env::var("DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| "DATABASE_URL not set".into())
}
