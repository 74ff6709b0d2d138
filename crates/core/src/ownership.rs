//! Ownership verification.
//!
//! Ownership is a permission axis separate from purchase: the user who
//! controls a property controls all of its descendants, whether or not
//! anything is listed or sold. Resolution failures deny.

use crate::entity::{EntityGraph, EntityRef};
use crate::error::CoreError;
use crate::types::DbId;

/// Whether `user_id` owns the root property of `target`.
///
/// Any resolution failure (dangling link, unknown entity) yields `false`;
/// access is never granted on an unresolved chain.
pub fn verify_ownership(graph: &EntityGraph, user_id: DbId, target: EntityRef) -> bool {
    match graph.ancestor_property(target) {
        Ok(property_id) => graph.owner_of_property(property_id) == Some(user_id),
        Err(_) => false,
    }
}

/// Require ownership, producing the error surfaced for owner-only actions.
pub fn require_ownership(
    graph: &EntityGraph,
    user_id: DbId,
    target: EntityRef,
) -> Result<(), CoreError> {
    if verify_ownership(graph, user_id, target) {
        Ok(())
    } else {
        Err(CoreError::Ownership(format!(
            "User {user_id} does not own {} {}",
            target.kind().as_str(),
            target.id()
        )))
    }
}
