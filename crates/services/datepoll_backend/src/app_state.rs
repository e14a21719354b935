// --- File: crates/services/datepoll_backend/src/app_state.rs ---
use datepoll_common::services::ServiceFactory;
use datepoll_config::AppConfig;
use datepoll_events::EventService;
use std::sync::Arc;

use crate::service_factory::DatepollServiceFactory;

/// Application state that is shared across all routes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub service_factory: Arc<dyn ServiceFactory>,
    pub events: Arc<EventService>,
}

impl AppState {
    /// Build the service factory from the configuration and wire the event service.
    pub async fn new(config: Arc<AppConfig>) -> Self {
        let service_factory = Arc::new(DatepollServiceFactory::new(config.clone()).await);
        Self::with_factory(config, service_factory)
    }

    pub fn with_factory(config: Arc<AppConfig>, service_factory: Arc<dyn ServiceFactory>) -> Self {
        let events = Arc::new(EventService::from_factory(
            service_factory.as_ref(),
            config.public_base_url.clone(),
        ));
        Self {
            config,
            service_factory,
            events,
        }
    }
}
