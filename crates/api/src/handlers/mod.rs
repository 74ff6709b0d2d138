//! HTTP handlers, one module per resource.

pub mod drawing;
pub mod image;
pub mod listing;
pub mod product;
pub mod property;
pub mod purchase;
pub mod room;
pub mod user;
pub mod visibility;

use roomspec_core::entity::EntityRef;
use roomspec_core::ownership::require_ownership;
use roomspec_core::types::DbId;
use roomspec_db::repositories::GraphRepo;
use roomspec_db::DbPool;

use crate::error::AppError;

/// Gate a mutation on ownership of the target's root property.
pub(crate) async fn require_owner(
    pool: &DbPool,
    user_id: DbId,
    target: EntityRef,
) -> Result<(), AppError> {
    let property_id = GraphRepo::ancestor_property(pool, target).await?;
    let graph = GraphRepo::load_property_graph(pool, property_id).await?;
    require_ownership(&graph, user_id, target)?;
    Ok(())
}
