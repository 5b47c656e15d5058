//! Invite CLI - Operator tools for the invitation site.
//!
//! # Usage
//!
//! ```bash
//! # Hash the admin password for ADMIN_PASSWORD_HASH (reads stdin)
//! echo -n 'segredo' | invite-cli password hash
//!
//! # Check that the confirmations table has every column
//! invite-cli schema check
//!
//! # Insert the built-in gift suggestions into an empty gifts table
//! invite-cli gifts seed
//! ```
//!
//! # Commands
//!
//! - `password hash` - Argon2 PHC string for the admin password
//! - `schema check` - Probe the `confirmations` columns
//! - `gifts seed` - Seed the `gifts` table

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "invite-cli")]
#[command(version, about = "Invitation site operator tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Admin password helpers
    Password {
        #[command(subcommand)]
        action: PasswordAction,
    },
    /// Backend schema helpers
    Schema {
        #[command(subcommand)]
        action: SchemaAction,
    },
    /// Gift list helpers
    Gifts {
        #[command(subcommand)]
        action: GiftsAction,
    },
}

#[derive(Subcommand)]
enum PasswordAction {
    /// Hash a password read from stdin and print the PHC string
    Hash,
}

#[derive(Subcommand)]
enum SchemaAction {
    /// Report whether `confirmations` has the extended columns
    Check,
}

#[derive(Subcommand)]
enum GiftsAction {
    /// Insert the built-in suggestions
    Seed {
        /// Seed even when the table already has gifts
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Password { action } => match action {
            PasswordAction::Hash => commands::password::hash()?,
        },
        Commands::Schema { action } => match action {
            SchemaAction::Check => commands::schema::check().await?,
        },
        Commands::Gifts { action } => match action {
            GiftsAction::Seed { force } => commands::gifts::seed(force).await?,
        },
    }
    Ok(())
}
