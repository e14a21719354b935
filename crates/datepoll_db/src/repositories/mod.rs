//! Repository implementations backed by the database client

pub mod event_store_factory;
pub mod event_store_sql;

pub use event_store_factory::SqlEventStoreFactory;
pub use event_store_sql::SqlEventStore;
