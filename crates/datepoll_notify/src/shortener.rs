// --- File: crates/datepoll_notify/src/shortener.rs ---
use datepoll_common::services::{BoxFuture, BoxedError, LinkShortener};
use datepoll_common::HTTP_CLIENT;
use datepoll_config::ShortenerConfig;
use reqwest::Client;
use tracing::{debug, warn};

use crate::error::NotifyError;

const SERVICE_NAME: &str = "Link shortener";

/// Shortens URLs with a `GET <endpoint>?url=<url>` service that answers with
/// the short link as plain text.
#[derive(Debug, Clone)]
pub struct HttpLinkShortener {
    client: Client,
    endpoint: String,
}

impl HttpLinkShortener {
    pub fn new(config: &ShortenerConfig) -> Self {
        Self::with_client(HTTP_CLIENT.clone(), config.endpoint.clone())
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub async fn request_short_link(&self, url: &str) -> Result<String, NotifyError> {
        debug!("Shortening {}", url);
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[("url", url)])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(NotifyError::ApiError {
                service: SERVICE_NAME,
                status_code: status.as_u16(),
                message: body,
            });
        }

        let short = body.trim();
        if short.is_empty() {
            return Err(NotifyError::EmptyResponse(SERVICE_NAME));
        }
        Ok(short.to_string())
    }
}

impl LinkShortener for HttpLinkShortener {
    fn shorten(&self, url: &str) -> BoxFuture<'_, String, BoxedError> {
        let url = url.to_string();
        Box::pin(async move {
            self.request_short_link(&url)
                .await
                .map_err(BoxedError::from)
        })
    }
}

/// Shorten `url` when a shortener is available; any failure yields `url` unchanged.
pub async fn shorten_or_original(shortener: Option<&dyn LinkShortener>, url: &str) -> String {
    let Some(shortener) = shortener else {
        return url.to_string();
    };
    match shortener.shorten(url).await {
        Ok(short) => short,
        Err(e) => {
            warn!("Link shortening failed, using original link: {}", e);
            url.to_string()
        }
    }
}
