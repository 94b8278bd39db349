//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! mm-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `MEDIMEET_DATABASE_URL` - `PostgreSQL` connection string
//!   (falls back to `DATABASE_URL`)
//!
//! Migration files live in `crates/server/migrations/`.

use super::{CommandError, connect};

/// Run the platform database migrations.
///
/// # Errors
///
/// Returns `CommandError` when the database is unreachable or a migration
/// fails.
pub async fn run() -> Result<(), CommandError> {
    tracing::info!("Connecting to database...");
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
