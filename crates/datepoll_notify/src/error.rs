use datepoll_common::services::BoxedError;
use thiserror::Error;

/// Failures of the email relay and link shortener clients.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Transport-level failure
    #[error("Request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// The remote service answered with a non-success status
    #[error("{service} returned an error: {message} (Status: {status_code})")]
    ApiError {
        service: &'static str,
        status_code: u16,
        message: String,
    },

    /// The shortener answered 2xx with nothing usable in the body
    #[error("Empty response from {0}")]
    EmptyResponse(&'static str),

    /// Missing or incomplete configuration
    #[error("Configuration missing or incomplete: {0}")]
    ConfigError(String),
}

impl From<NotifyError> for BoxedError {
    fn from(err: NotifyError) -> Self {
        BoxedError(Box::new(err))
    }
}
