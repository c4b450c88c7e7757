//! Application state

use sqlx::PgPool;

use crate::config::Config;
use crate::stats::clock::StatsClock;
use crate::upload::UploadStore;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// JWT secret for session tokens
    pub jwt_secret: String,
    /// Stored uploads (logos, campaign headers)
    pub uploads: UploadStore,
    /// Day boundaries for dashboard statistics
    pub clock: StatsClock,
}

impl AppState {
    /// Connect, migrate and build the state
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        let state = Self::with_pool(pool, config)?;
        state.uploads.ensure_dirs().await?;
        Ok(state)
    }

    /// Build the state around an existing pool (no migrations, no I/O)
    pub fn with_pool(pool: PgPool, config: &Config) -> Result<Self, BoxError> {
        let clock = StatsClock::new(config.stats_utc_offset_minutes)
            .ok_or("STATS_UTC_OFFSET_MINUTES out of range")?;
        Ok(Self {
            pool,
            jwt_secret: config.jwt_secret.clone(),
            uploads: UploadStore::new(config.upload_dir.clone()),
            clock,
        })
    }
}
