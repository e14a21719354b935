//! SQL persistence for Datepoll
//!
//! Provides a database agnostic client built on SQLx's `Any` driver and the
//! [`SqlEventStore`], which keeps events, date candidates, participant
//! responses and their availability in four tables. SQLite is the default
//! backend; PostgreSQL and MySQL are available through feature flags.
//!
//! # Example
//!
//! ```rust,no_run
//! use datepoll_db::{DbClient, SqlEventStore};
//!
//! async fn setup_store() -> Result<SqlEventStore, Box<dyn std::error::Error>> {
//!     let db_client = DbClient::from_url("sqlite://data/datepoll.db").await?;
//!     let store = SqlEventStore::new(db_client);
//!     store.init_schema().await?;
//!     Ok(store)
//! }
//! ```

pub mod client;
pub mod error;
pub mod factory;
pub mod repositories;
pub mod repository;

pub use client::DbClient;
pub use error::DbError;
pub use factory::DbClientFactory;
pub use repository::RepositoryFactory;

pub use repositories::{SqlEventStore, SqlEventStoreFactory};
