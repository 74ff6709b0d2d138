//! Roomspec domain core.
//!
//! Pure domain logic for the purchase-gated visibility engine: the entity
//! hierarchy and its ancestry resolver, the listing sale-state machine,
//! transitive purchase coverage, ownership verification, and the visibility
//! cascade. This crate contains no database dependencies; all evaluation is
//! done against pre-loaded data passed in by the caller.

pub mod coverage;
pub mod entity;
pub mod error;
pub mod image;
pub mod listing;
pub mod ownership;
pub mod types;
pub mod visibility;
