//! Service-level error type and its HTTP status mapping.

use std::fmt;
use thiserror::Error;

use crate::services::StoreError;

/// The base error type for all Datepoll errors.
///
/// Each crate can extend this by implementing From<SpecificError> for DatepollError.
#[derive(Error, Debug)]
pub enum DatepollError {
    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred while talking to the event store
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DatepollError {
    /// Whether this error is a transient failure worth recording in the last-error slot.
    ///
    /// Not-found and validation failures are expected outcomes of user input.
    pub fn is_transient(&self) -> bool {
        !matches!(
            self,
            DatepollError::NotFoundError(_) | DatepollError::ValidationError(_)
        )
    }
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for DatepollError {
    fn status_code(&self) -> u16 {
        match self {
            DatepollError::ValidationError(_) => 400,
            DatepollError::DatabaseError(_) => 500,
            DatepollError::NotFoundError(_) => 404,
            DatepollError::InternalError(_) => 500,
        }
    }
}

impl From<StoreError> for DatepollError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => DatepollError::NotFoundError(what),
            StoreError::Io(message) => DatepollError::DatabaseError(message),
        }
    }
}

// Utility functions for error handling
pub fn validation_error<T: fmt::Display>(message: T) -> DatepollError {
    DatepollError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> DatepollError {
    DatepollError::NotFoundError(message.to_string())
}

pub fn internal_error<T: fmt::Display>(message: T) -> DatepollError {
    DatepollError::InternalError(message.to_string())
}
