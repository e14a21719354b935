//! Runtime feature checks for the Datepoll application.
//!
//! Collaborators are switched on by a `use_*` flag in the configuration and
//! only count as enabled when their configuration section is present too:
//!
//! - `use_database` + `database`: SQL-backed event store (in-memory otherwise)
//! - `use_notify` + `notify`: email relay for new-response notifications
//! - `use_shortener` + `shortener`: link shortening for share links

use datepoll_config::AppConfig;

/// Check if a feature is enabled at runtime based on configuration.
///
/// # Returns
///
/// `true` if the flag is set and the feature configuration is present
pub fn is_feature_enabled<T>(use_feature: bool, feature_config: Option<&T>) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if the SQL event store is enabled at runtime.
pub fn is_database_enabled(config: &AppConfig) -> bool {
    is_feature_enabled(config.use_database, config.database.as_ref())
}

/// Check if the email relay is enabled at runtime.
pub fn is_notify_enabled(config: &AppConfig) -> bool {
    is_feature_enabled(config.use_notify, config.notify.as_ref())
}

/// Check if the link shortener is enabled at runtime.
pub fn is_shortener_enabled(config: &AppConfig) -> bool {
    is_feature_enabled(config.use_shortener, config.shortener.as_ref())
}
