//! loyalty-admin: loyalty-program administration backend
//!
//! REST API behind the admin panel:
//! - Businesses (firms), their admin accounts and campaigns
//! - Customers and their per-business wallets
//! - Dashboard statistics over the transaction ledger
//! - Uploaded logos and campaign images, served under `/uploads`

mod api;
mod auth;
mod config;
mod db;
mod error;
mod state;
mod stats;
mod upload;
mod util;

use config::Config;
use state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loyalty_admin=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting loyalty-admin (env: {})", config.environment);

    let state = AppState::new(&config).await?;
    let app = api::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("loyalty-admin HTTP listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
