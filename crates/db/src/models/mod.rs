//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod drawing;
pub mod image;
pub mod listing;
pub mod product;
pub mod property;
pub mod room;
pub mod transaction;
pub mod user;
