//! Ancestry resolution and graph loading for the entity hierarchy.
//!
//! Two access patterns: point resolution of one entity's ancestor chain
//! with SQL joins, and loading a whole property subtree into the core's
//! [`EntityGraph`] for pure coverage and ownership evaluation.

use roomspec_core::entity::{Ancestry, EntityGraph, EntityRef};
use roomspec_core::error::CoreError;
use roomspec_core::image::attachment_parent;
use roomspec_core::types::DbId;
use sqlx::PgPool;

use crate::error::RepoError;

/// Read-only ancestry and subtree queries over the hierarchy tables.
pub struct GraphRepo;

impl GraphRepo {
    /// Resolve the ancestor chain of `target` up to its root property.
    ///
    /// Foreign keys keep intermediate links intact, so a missing row can
    /// only be the target itself (or an image's parent): both surface as
    /// `NotFound`.
    pub async fn ancestry(pool: &PgPool, target: EntityRef) -> Result<Ancestry, RepoError> {
        // Images resolve through their single attachment parent, which is
        // never itself an image.
        let target = match target {
            EntityRef::Image(id) => Self::image_parent(pool, id).await?,
            other => other,
        };

        match target {
            EntityRef::Property(id) => {
                let exists: Option<(DbId,)> =
                    sqlx::query_as("SELECT id FROM properties WHERE id = $1")
                        .bind(id)
                        .fetch_optional(pool)
                        .await?;
                exists.ok_or(RepoError::Core(CoreError::NotFound {
                    entity: "Property",
                    id,
                }))?;
                Ok(Ancestry {
                    property_id: id,
                    room_id: None,
                    product_id: None,
                })
            }
            EntityRef::Room(id) => {
                let row: Option<(DbId,)> =
                    sqlx::query_as("SELECT property_id FROM rooms WHERE id = $1")
                        .bind(id)
                        .fetch_optional(pool)
                        .await?;
                let (property_id,) = row.ok_or(RepoError::Core(CoreError::NotFound {
                    entity: "Room",
                    id,
                }))?;
                Ok(Ancestry {
                    property_id,
                    room_id: Some(id),
                    product_id: None,
                })
            }
            EntityRef::Product(id) => {
                let row: Option<(DbId, DbId)> = sqlx::query_as(
                    "SELECT p.room_id, r.property_id
                     FROM products p JOIN rooms r ON r.id = p.room_id
                     WHERE p.id = $1",
                )
                .bind(id)
                .fetch_optional(pool)
                .await?;
                let (room_id, property_id) = row.ok_or(RepoError::Core(CoreError::NotFound {
                    entity: "Product",
                    id,
                }))?;
                Ok(Ancestry {
                    property_id,
                    room_id: Some(room_id),
                    product_id: Some(id),
                })
            }
            EntityRef::Specification(id) => {
                Self::product_child_ancestry(pool, "product_specifications", id, "ProductSpecification")
                    .await
            }
            EntityRef::Dimension(id) => {
                Self::product_child_ancestry(pool, "product_dimensions", id, "ProductDimension")
                    .await
            }
            EntityRef::Drawing(id) => {
                let row: Option<(DbId,)> =
                    sqlx::query_as("SELECT property_id FROM drawings WHERE id = $1")
                        .bind(id)
                        .fetch_optional(pool)
                        .await?;
                let (property_id,) = row.ok_or(RepoError::Core(CoreError::NotFound {
                    entity: "Drawing",
                    id,
                }))?;
                Ok(Ancestry {
                    property_id,
                    room_id: None,
                    product_id: None,
                })
            }
            EntityRef::Image(_) => unreachable!("image targets resolved above"),
        }
    }

    /// Resolve the root property id of `target`.
    pub async fn ancestor_property(pool: &PgPool, target: EntityRef) -> Result<DbId, RepoError> {
        Ok(Self::ancestry(pool, target).await?.property_id)
    }

    /// Load the whole subtree of one property into an [`EntityGraph`].
    pub async fn load_property_graph(
        pool: &PgPool,
        property_id: DbId,
    ) -> Result<EntityGraph, RepoError> {
        let owner: Option<(DbId,)> =
            sqlx::query_as("SELECT user_id FROM properties WHERE id = $1")
                .bind(property_id)
                .fetch_optional(pool)
                .await?;
        let (owner_id,) = owner.ok_or(RepoError::Core(CoreError::NotFound {
            entity: "Property",
            id: property_id,
        }))?;

        let mut graph = EntityGraph::new();
        graph.insert_property(property_id, owner_id);

        let rooms: Vec<(DbId,)> =
            sqlx::query_as("SELECT id FROM rooms WHERE property_id = $1 ORDER BY id")
                .bind(property_id)
                .fetch_all(pool)
                .await?;
        for (room_id,) in &rooms {
            graph.insert_room(*room_id, property_id);
        }

        let products: Vec<(DbId, DbId)> = sqlx::query_as(
            "SELECT p.id, p.room_id
             FROM products p JOIN rooms r ON r.id = p.room_id
             WHERE r.property_id = $1 ORDER BY p.id",
        )
        .bind(property_id)
        .fetch_all(pool)
        .await?;
        for (id, room_id) in &products {
            graph.insert_product(*id, *room_id);
        }

        let specifications: Vec<(DbId, DbId)> = sqlx::query_as(
            "SELECT s.id, s.product_id
             FROM product_specifications s
             JOIN products p ON p.id = s.product_id
             JOIN rooms r ON r.id = p.room_id
             WHERE r.property_id = $1 ORDER BY s.id",
        )
        .bind(property_id)
        .fetch_all(pool)
        .await?;
        for (id, product_id) in &specifications {
            graph.insert_specification(*id, *product_id);
        }

        let dimensions: Vec<(DbId, DbId)> = sqlx::query_as(
            "SELECT d.id, d.product_id
             FROM product_dimensions d
             JOIN products p ON p.id = d.product_id
             JOIN rooms r ON r.id = p.room_id
             WHERE r.property_id = $1 ORDER BY d.id",
        )
        .bind(property_id)
        .fetch_all(pool)
        .await?;
        for (id, product_id) in &dimensions {
            graph.insert_dimension(*id, *product_id);
        }

        let drawings: Vec<(DbId,)> =
            sqlx::query_as("SELECT id FROM drawings WHERE property_id = $1 ORDER BY id")
                .bind(property_id)
                .fetch_all(pool)
                .await?;
        for (id,) in &drawings {
            graph.insert_drawing(*id, property_id);
        }

        let images: Vec<(DbId, Option<DbId>, Option<DbId>, Option<DbId>, Option<DbId>, Option<DbId>)> =
            sqlx::query_as(
                "SELECT i.id, i.property_id, i.room_id, i.product_id,
                        i.product_specification_id, i.drawing_id
                 FROM images i
                 WHERE i.property_id = $1
                    OR i.room_id IN (SELECT id FROM rooms WHERE property_id = $1)
                    OR i.product_id IN (
                        SELECT p.id FROM products p
                        JOIN rooms r ON r.id = p.room_id
                        WHERE r.property_id = $1)
                    OR i.product_specification_id IN (
                        SELECT s.id FROM product_specifications s
                        JOIN products p ON p.id = s.product_id
                        JOIN rooms r ON r.id = p.room_id
                        WHERE r.property_id = $1)
                    OR i.drawing_id IN (SELECT id FROM drawings WHERE property_id = $1)
                 ORDER BY i.id",
            )
            .bind(property_id)
            .fetch_all(pool)
            .await?;
        for (id, prop, room, product, specification, drawing) in &images {
            let parent = attachment_parent(*prop, *room, *product, *specification, *drawing)?;
            graph.insert_image(*id, parent);
        }

        Ok(graph)
    }

    async fn product_child_ancestry(
        pool: &PgPool,
        table: &str,
        id: DbId,
        entity: &'static str,
    ) -> Result<Ancestry, RepoError> {
        let query = format!(
            "SELECT c.product_id, p.room_id, r.property_id
             FROM {table} c
             JOIN products p ON p.id = c.product_id
             JOIN rooms r ON r.id = p.room_id
             WHERE c.id = $1"
        );
        let row: Option<(DbId, DbId, DbId)> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        let (product_id, room_id, property_id) =
            row.ok_or(RepoError::Core(CoreError::NotFound { entity, id }))?;
        Ok(Ancestry {
            property_id,
            room_id: Some(room_id),
            product_id: Some(product_id),
        })
    }

    async fn image_parent(pool: &PgPool, id: DbId) -> Result<EntityRef, RepoError> {
        let row: Option<(Option<DbId>, Option<DbId>, Option<DbId>, Option<DbId>, Option<DbId>)> =
            sqlx::query_as(
                "SELECT property_id, room_id, product_id, product_specification_id, drawing_id
                 FROM images WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(pool)
            .await?;
        let (property, room, product, specification, drawing) =
            row.ok_or(RepoError::Core(CoreError::NotFound {
                entity: "Image",
                id,
            }))?;
        Ok(attachment_parent(property, room, product, specification, drawing)?)
    }
}
