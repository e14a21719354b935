//! Service factory implementation.
//!
//! Builds the event store and the optional collaborators from the
//! configuration. A store that cannot be opened falls back to memory so the
//! server still starts.
use datepoll_common::services::{EventStore, LinkShortener, NotificationService, ServiceFactory};
use datepoll_common::{is_database_enabled, is_notify_enabled, is_shortener_enabled};
use datepoll_config::AppConfig;
use datepoll_db::{DbClientFactory, DbError, RepositoryFactory, SqlEventStore, SqlEventStoreFactory};
use datepoll_events::InMemoryEventStore;
use datepoll_notify::{EmailRelayClient, HttpLinkShortener};
use std::sync::Arc;
use tracing::{error, info, warn};

pub struct DatepollServiceFactory {
    event_store: Arc<dyn EventStore>,
    notification_service: Option<Arc<dyn NotificationService>>,
    link_shortener: Option<Arc<dyn LinkShortener>>,
}

impl DatepollServiceFactory {
    /// Create a new service factory.
    pub async fn new(config: Arc<AppConfig>) -> Self {
        let event_store: Arc<dyn EventStore> = if is_database_enabled(&config) {
            info!("Initializing SQL event store...");
            match open_sql_store(&config).await {
                Ok(store) => Arc::new(store),
                Err(e) => {
                    error!("Failed to open SQL event store, using in-memory store: {}", e);
                    Arc::new(InMemoryEventStore::new())
                }
            }
        } else {
            info!("Database disabled, using in-memory event store");
            Arc::new(InMemoryEventStore::new())
        };

        let notification_service: Option<Arc<dyn NotificationService>> =
            if is_notify_enabled(&config) {
                match EmailRelayClient::from_app_config(&config) {
                    Ok(client) => {
                        info!("Email relay notifications enabled");
                        Some(Arc::new(client))
                    }
                    Err(e) => {
                        warn!("Email relay not available: {}", e);
                        None
                    }
                }
            } else {
                None
            };

        let link_shortener: Option<Arc<dyn LinkShortener>> = match config.shortener.as_ref() {
            Some(shortener) if is_shortener_enabled(&config) => {
                info!("Link shortener enabled: {}", shortener.endpoint);
                Some(Arc::new(HttpLinkShortener::new(shortener)))
            }
            _ => None,
        };

        Self {
            event_store,
            notification_service,
            link_shortener,
        }
    }
}

async fn open_sql_store(config: &AppConfig) -> Result<SqlEventStore, DbError> {
    let db_client = DbClientFactory::new().from_app_config(config).await?;
    let store = SqlEventStoreFactory::new().create_repository(db_client);
    store.init_schema().await?;
    Ok(store)
}

impl ServiceFactory for DatepollServiceFactory {
    fn event_store(&self) -> Arc<dyn EventStore> {
        self.event_store.clone()
    }

    fn notification_service(&self) -> Option<Arc<dyn NotificationService>> {
        self.notification_service.clone()
    }

    fn link_shortener(&self) -> Option<Arc<dyn LinkShortener>> {
        self.link_shortener.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datepoll_config::{DatabaseConfig, NotifyConfig, ShortenerConfig, SECRET_MARKER};

    #[tokio::test]
    async fn test_defaults_use_memory_store_without_collaborators() {
        let factory = DatepollServiceFactory::new(Arc::new(AppConfig::default())).await;
        assert!(factory.notification_service().is_none());
        assert!(factory.link_shortener().is_none());
        assert!(matches!(
            factory.event_store().fetch_event("x").await,
            Err(datepoll_common::services::StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_unresolved_secret_disables_notifications() {
        let config = AppConfig {
            use_notify: true,
            notify: Some(NotifyConfig {
                endpoint: "https://relay.example/send".to_string(),
                service_id: "svc".to_string(),
                template_id: "tpl".to_string(),
                public_key: SECRET_MARKER.to_string(),
            }),
            use_shortener: true,
            shortener: Some(ShortenerConfig {
                endpoint: "https://short.example/api".to_string(),
            }),
            ..AppConfig::default()
        };
        let factory = DatepollServiceFactory::new(Arc::new(config)).await;
        assert!(factory.notification_service().is_none());
        assert!(factory.link_shortener().is_some());
    }

    #[tokio::test]
    async fn test_sqlite_store_is_opened() {
        let path = std::env::temp_dir().join(format!(
            "datepoll-factory-{}.db",
            std::process::id()
        ));
        let config = AppConfig {
            use_database: true,
            database: Some(DatabaseConfig {
                url: format!("sqlite://{}", path.display()),
            }),
            ..AppConfig::default()
        };
        let factory = DatepollServiceFactory::new(Arc::new(config)).await;
        assert!(path.exists());
        assert!(factory.event_store().fetch_candidates("x").await.unwrap().is_empty());
    }
}
