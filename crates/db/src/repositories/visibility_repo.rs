//! Visibility context assembly.
//!
//! Gathers the viewer-specific facts the pure cascade needs (ownership,
//! the most specific covering listing's status, purchase coverage) from
//! the hierarchy, listing, and ledger tables, then delegates the decision
//! to `roomspec_core::visibility::decide`.

use roomspec_core::coverage::{covering_scopes, scope_covers};
use roomspec_core::entity::EntityRef;
use roomspec_core::error::CoreError;
use roomspec_core::listing::{ListingScope, ListingStatus};
use roomspec_core::ownership::verify_ownership;
use roomspec_core::types::DbId;
use roomspec_core::visibility::{decide, FieldClass, Visibility, VisibilityContext};
use sqlx::PgPool;

use crate::error::RepoError;
use crate::repositories::{GraphRepo, ImageRepo, ListingRepo, TransactionRepo};

/// Read-side gating queries.
pub struct VisibilityRepo;

impl VisibilityRepo {
    /// Resolve the [`VisibilityContext`] for a viewer and target.
    ///
    /// `viewer_id` is `None` for anonymous viewers, who can neither own
    /// nor have purchased anything.
    pub async fn context_for(
        pool: &PgPool,
        viewer_id: Option<DbId>,
        target: EntityRef,
    ) -> Result<VisibilityContext, RepoError> {
        let property_id = GraphRepo::ancestor_property(pool, target).await?;
        let graph = GraphRepo::load_property_graph(pool, property_id).await?;

        let viewer_is_owner =
            viewer_id.is_some_and(|viewer| verify_ownership(&graph, viewer, target));

        // Candidate listings anywhere in the property; the core selection
        // rule picks the finest covering scope, whose status drives step 3
        // of the cascade.
        let listings = ListingRepo::list_for_property(pool, property_id).await?;
        let mut scoped: Vec<(ListingScope, ListingStatus)> = Vec::with_capacity(listings.len());
        for listing in &listings {
            scoped.push((listing.scope()?, listing.status_value()?));
        }
        let covering = covering_scopes(&graph, scoped.iter().map(|(scope, _)| scope), target)?;
        let covering_listing_status = covering.first().and_then(|finest| {
            scoped
                .iter()
                .find(|(scope, _)| scope == *finest)
                .map(|(_, status)| *status)
        });

        let purchased = match viewer_id {
            Some(viewer) => {
                let scopes = TransactionRepo::purchased_scopes(pool, viewer).await?;
                let mut purchased = false;
                for scope in &scopes {
                    if scope_covers(&graph, scope, target)? {
                        purchased = true;
                        break;
                    }
                }
                purchased
            }
            None => false,
        };

        Ok(VisibilityContext {
            viewer_is_owner,
            covering_listing_status,
            purchased,
        })
    }

    /// Classify `target` for `viewer_id`, resolving the image type when the
    /// target is an image so the MAIN-teaser refinement applies.
    pub async fn decide_for(
        pool: &PgPool,
        viewer_id: Option<DbId>,
        target: EntityRef,
        field_class: FieldClass,
    ) -> Result<Visibility, RepoError> {
        let image_type = match target {
            EntityRef::Image(id) => {
                let image = ImageRepo::find_by_id(pool, id).await?.ok_or(RepoError::Core(
                    CoreError::NotFound {
                        entity: "Image",
                        id,
                    },
                ))?;
                Some(image.image_type_value()?)
            }
            _ => None,
        };
        let ctx = Self::context_for(pool, viewer_id, target).await?;
        Ok(decide(&ctx, field_class, image_type))
    }
}
