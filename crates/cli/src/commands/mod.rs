//! CLI command implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

/// Errors shared by the CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Repository error: {0}")]
    Repository(#[from] medimeet_server::db::RepositoryError),
}

/// Connect to the platform database using the server's pool settings.
///
/// # Errors
///
/// Returns `CommandError::MissingEnvVar` when no database URL is configured
/// and `CommandError::Database` when the connection fails.
pub async fn connect() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("MEDIMEET_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| CommandError::MissingEnvVar("MEDIMEET_DATABASE_URL"))?;

    Ok(medimeet_server::db::create_pool(&SecretString::from(database_url)).await?)
}
