//! Transitive purchase coverage.
//!
//! A purchase at a coarser scope unlocks all finer-scoped descendants of
//! that scope and nothing else: a property-specs purchase covers the whole
//! property subtree, a room-specs purchase only that room's subtree, a
//! product-specs purchase only that product's subtree. Service listings
//! (consultation, viewing) grant no content access.

use crate::entity::{EntityGraph, EntityRef};
use crate::error::CoreError;
use crate::listing::ListingScope;

/// Whether `scope` transitively covers `target` within the loaded graph.
///
/// Fails with `NotFound` when the target's ancestry cannot be resolved;
/// callers gating access must treat that as a denial.
pub fn scope_covers(
    graph: &EntityGraph,
    scope: &ListingScope,
    target: EntityRef,
) -> Result<bool, CoreError> {
    let ancestry = graph.ancestry(target)?;
    let covered = match *scope {
        ListingScope::PropertySpecs { property_id } => ancestry.property_id == property_id,
        ListingScope::RoomSpecs { room_id } => ancestry.room_id == Some(room_id),
        ListingScope::ProductSpecs { product_id } => ancestry.product_id == Some(product_id),
        ListingScope::Consultation { .. } | ListingScope::PropertyViewing { .. } => false,
    };
    Ok(covered)
}

/// Filter `scopes` down to those covering `target`, ordered finest first.
///
/// This is the listing-selection rule behind the visibility cascade: the
/// first element, if any, is the most specific applicable listing.
pub fn covering_scopes<'a, I>(
    graph: &EntityGraph,
    scopes: I,
    target: EntityRef,
) -> Result<Vec<&'a ListingScope>, CoreError>
where
    I: IntoIterator<Item = &'a ListingScope>,
{
    let mut covering = Vec::new();
    for scope in scopes {
        if scope_covers(graph, scope, target)? {
            covering.push(scope);
        }
    }
    covering.sort_by_key(|s| s.granularity());
    Ok(covering)
}
