//! Consumer-side SDK for the marketplace API.
//!
//! Wraps the HTTP surface with the client-side sync behaviours the UI
//! needs: a staleness-windowed response cache with in-flight request
//! coalescing, a retry policy split by query sensitivity, and an
//! optimistic purchase mirror that is reconciled against the server-side
//! ledger before being trusted.

pub mod cache;
pub mod error;
pub mod fetch;
pub mod mirror;

mod client;

pub use client::MarketClient;
pub use error::ClientError;
