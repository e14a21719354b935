//! Repository factory trait
//!
//! Lets the backend build a store for any database client without knowing the
//! concrete repository type.

/// A trait for database repository factories
///
/// Generic over the repository type and the configuration type.
pub trait RepositoryFactory<R, C> {
    /// Create a new repository instance
    fn create_repository(&self, config: C) -> R;
}
