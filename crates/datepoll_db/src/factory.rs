//! Factory for creating database clients

use crate::client::DbClient;
use crate::error::DbError;
use datepoll_config::AppConfig;
use tracing::debug;

/// Factory for creating database clients from different configuration sources.
#[derive(Debug, Clone, Default)]
pub struct DbClientFactory;

impl DbClientFactory {
    pub fn new() -> Self {
        Self
    }

    /// Create a new database client from an application configuration
    ///
    /// # Errors
    ///
    /// Fails when the database section is missing, the URL is empty or the
    /// connection cannot be established.
    pub async fn from_app_config(&self, config: &AppConfig) -> Result<DbClient, DbError> {
        debug!("Creating database client from application configuration");
        DbClient::new(config).await
    }

    /// Create a new database client from a database URL
    pub async fn from_url(&self, db_url: &str) -> Result<DbClient, DbError> {
        debug!("Creating database client from URL");
        DbClient::from_url(db_url).await
    }
}
