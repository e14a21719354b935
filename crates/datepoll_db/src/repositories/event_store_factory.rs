//! Factory for creating SQL event stores

use crate::repositories::event_store_sql::SqlEventStore;
use crate::{DbClient, RepositoryFactory};

/// Builds a [`SqlEventStore`] on top of an existing database client.
#[derive(Debug, Clone, Default)]
pub struct SqlEventStoreFactory;

impl SqlEventStoreFactory {
    pub fn new() -> Self {
        Self
    }
}

impl RepositoryFactory<SqlEventStore, DbClient> for SqlEventStoreFactory {
    fn create_repository(&self, db_client: DbClient) -> SqlEventStore {
        SqlEventStore::new(db_client)
    }
}
