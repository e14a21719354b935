//! Outbound collaborators for Datepoll
//!
//! - [`EmailRelayClient`] tells an organizer about new responses through an
//!   HTTP email relay.
//! - [`HttpLinkShortener`] shortens share links, with [`shorten_or_original`]
//!   falling back to the unshortened link on any failure.
//! - [`dispatch_new_response`] fires a notification without waiting for it.

pub mod dispatch;
pub mod email;
pub mod error;
pub mod shortener;

pub use dispatch::dispatch_new_response;
pub use email::EmailRelayClient;
pub use error::NotifyError;
pub use shortener::{shorten_or_original, HttpLinkShortener};
