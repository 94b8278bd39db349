//! MediMeet CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! mm-cli migrate
//!
//! # Seed the database with demo data
//! mm-cli seed
//!
//! # Promote a user to admin
//! mm-cli admin grant --identity-id idp_2f9Kd81s
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed database with demo data
//! - `admin grant` - Promote an existing user to ADMIN

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "mm-cli")]
#[command(author, version, about = "MediMeet CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database with demo data
    Seed,
    /// Manage admin users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Promote an existing user to ADMIN
    Grant {
        /// Identity-provider id of the user to promote
        #[arg(short, long)]
        identity_id: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mm_cli=info,medimeet_server=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Seed => commands::seed::run().await,
        Commands::Admin {
            action: AdminAction::Grant { identity_id },
        } => commands::admin::grant(&identity_id).await,
    };

    if let Err(err) = result {
        tracing::error!("command failed: {err}");
        std::process::exit(1);
    }
}
