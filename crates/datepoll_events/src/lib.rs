// --- File: crates/datepoll_events/src/lib.rs ---
// Declare modules within this crate
pub mod assemble;
pub mod cache;
#[cfg(test)]
mod cache_test;
pub mod doc;
pub mod handlers;
pub mod link;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod memory;
pub mod routes;
pub mod service;
pub mod view;

pub use cache::{EventCache, LastError};
pub use memory::InMemoryEventStore;
pub use service::EventService;
pub use view::{View, ViewAction};
