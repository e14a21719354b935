// --- File: crates/datepoll_notify/src/email.rs ---
use datepoll_common::services::{BoxFuture, BoxedError, NewResponseNotice, NotificationService};
use datepoll_common::HTTP_CLIENT;
use datepoll_config::{AppConfig, NotifyConfig, SECRET_MARKER};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::error::NotifyError;

const SERVICE_NAME: &str = "Email relay";

#[derive(Serialize, Debug)]
struct TemplateParams<'a> {
    to_email: &'a str,
    event_title: &'a str,
    participant_name: &'a str,
    event_url: &'a str,
}

/// Body posted to the relay endpoint.
#[derive(Serialize, Debug)]
struct RelayRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

/// Sends "new response" mails through a template-based HTTP email relay.
#[derive(Debug, Clone)]
pub struct EmailRelayClient {
    client: Client,
    config: NotifyConfig,
}

impl EmailRelayClient {
    /// Create a relay client that uses the shared HTTP client.
    pub fn new(config: NotifyConfig) -> Self {
        Self::with_client(HTTP_CLIENT.clone(), config)
    }

    pub fn with_client(client: Client, config: NotifyConfig) -> Self {
        Self { client, config }
    }

    /// Build a relay client from the application configuration.
    ///
    /// # Errors
    ///
    /// Fails when the `notify` section is missing or the public key was never
    /// provided through the environment.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, NotifyError> {
        let notify = config
            .notify
            .as_ref()
            .ok_or_else(|| NotifyError::ConfigError("notify section is missing".to_string()))?;
        if notify.public_key.is_empty() || notify.public_key == SECRET_MARKER {
            return Err(NotifyError::ConfigError(
                "notify.public_key is not set".to_string(),
            ));
        }
        Ok(Self::new(notify.clone()))
    }

    /// Post one notice to the relay.
    pub async fn send(&self, notice: &NewResponseNotice) -> Result<(), NotifyError> {
        let body = RelayRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: TemplateParams {
                to_email: &notice.to,
                event_title: &notice.event_title,
                participant_name: &notice.participant_name,
                event_url: &notice.event_url,
            },
        };

        debug!(
            "Sending new-response notice for '{}' to {}",
            notice.event_title, notice.to
        );
        let resp = self
            .client
            .post(&self.config.endpoint)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            error!("{} returned {}: {}", SERVICE_NAME, status, message);
            return Err(NotifyError::ApiError {
                service: SERVICE_NAME,
                status_code: status.as_u16(),
                message,
            });
        }

        info!("New-response notice sent to {}", notice.to);
        Ok(())
    }
}

impl NotificationService for EmailRelayClient {
    fn notify_new_response(&self, notice: NewResponseNotice) -> BoxFuture<'_, (), BoxedError> {
        Box::pin(async move { self.send(&notice).await.map_err(BoxedError::from) })
    }
}
