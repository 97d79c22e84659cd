//! Creates the first administrator account.
//!
//! Reads `ADMIN_USERNAME` (default "admin"), `ADMIN_PASSWORD` and the optional
//! `ADMIN_EMAIL`, plus the usual database settings. Does nothing if the user
//! already exists.

use anyhow::Context;
use folio_api::auth::seed::ensure_admin;
use folio_api::setup::database::setup_database;
use folio_core::Config;
use folio_db::UserRepository;
use std::env;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;

    folio_infra::init_telemetry(config.json_logs())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    let username = env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let password = env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD must be set")?;
    let email = env::var("ADMIN_EMAIL").ok().filter(|e| !e.trim().is_empty());

    let pool = setup_database(&config).await?;
    let users = UserRepository::new(pool);

    match ensure_admin(&users, &username, &password, email).await? {
        Some(user) => println!("Created admin user '{}' ({})", user.username, user.id),
        None => println!("Admin user '{}' already exists, nothing to do", username),
    }

    Ok(())
}
