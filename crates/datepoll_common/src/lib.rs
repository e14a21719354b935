// Declare modules within this crate
pub mod error; // Error handling
pub mod features; // Runtime feature checks
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Event, candidate and response models
pub mod services; // Collaborator abstractions

// Re-export error types and utilities for easier access
pub use error::{
    internal_error, not_found, validation_error, DatepollError, HttpStatusCode,
};

// Re-export HTTP utilities for easier access
pub use http::{
    client::{create_client, HTTP_CLIENT},
    IntoHttpResponse,
};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level};

pub use features::{is_database_enabled, is_feature_enabled, is_notify_enabled, is_shortener_enabled};
