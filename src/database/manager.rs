use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::{DatabaseConfig, StoreBackend};
use crate::database::memory::MemoryUserStore;
use crate::database::postgres::PgUserStore;
use crate::database::store::{StoreError, UserStore};

/// Errors from DatabaseManager
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Opened store plus the pool behind it, if any, so it can be closed on shutdown
pub struct DatabaseManager {
    store: Arc<dyn UserStore>,
    pool: Option<PgPool>,
}

impl DatabaseManager {
    /// Open the configured backend and bootstrap the users collection
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        match config.store {
            StoreBackend::Memory => {
                info!("Using in-memory users store");
                Ok(Self {
                    store: Arc::new(MemoryUserStore::new()),
                    pool: None,
                })
            }
            StoreBackend::Postgres => {
                let url = config
                    .url
                    .as_deref()
                    .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

                let pool = PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .acquire_timeout(Duration::from_secs(config.connection_timeout))
                    .connect(url)
                    .await?;

                info!("Created database pool for: {}", Self::redact_url(url)?);

                let store = PgUserStore::new(pool.clone());
                store.ensure_schema().await?;

                Ok(Self {
                    store: Arc::new(store),
                    pool: Some(pool),
                })
            }
        }
    }

    pub fn store(&self) -> Arc<dyn UserStore> {
        Arc::clone(&self.store)
    }

    /// Close the pool (e.g., on shutdown)
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
            info!("Closed database pool");
        }
    }

    /// Connection URL with any password masked, for logging
    fn redact_url(raw: &str) -> Result<String, DatabaseError> {
        let mut url = url::Url::parse(raw).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if url.password().is_some() {
            url.set_password(Some("***"))
                .map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        }
        Ok(url.into())
    }
}
