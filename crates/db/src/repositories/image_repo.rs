//! Repository for the `images` table.

use roomspec_core::entity::EntityRef;
use roomspec_core::image::{attachment_parent, ImageStatus, ImageType};
use roomspec_core::types::DbId;
use sqlx::PgPool;

use crate::error::RepoError;
use crate::models::image::{CreateImage, Image, UpdateImage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, url, image_type, status, property_id, room_id, product_id, \
                       product_specification_id, drawing_id, created_at, updated_at";

/// Provides CRUD operations for image attachments.
pub struct ImageRepo;

impl ImageRepo {
    /// Register a finalized upload, returning the created row.
    ///
    /// Validates the image type string and the single-parent attachment
    /// rule before touching the database; the same rule is backed by a
    /// CHECK constraint.
    pub async fn create(pool: &PgPool, input: &CreateImage) -> Result<Image, RepoError> {
        ImageType::from_str_value(&input.image_type)?;
        if let Some(status) = &input.status {
            ImageStatus::from_str_value(status)?;
        }
        attachment_parent(
            input.property_id,
            input.room_id,
            input.product_id,
            input.product_specification_id,
            input.drawing_id,
        )?;

        let query = format!(
            "INSERT INTO images (url, image_type, status, property_id, room_id, product_id,
                                 product_specification_id, drawing_id)
             VALUES ($1, $2, COALESCE($3, 'pending'), $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let image = sqlx::query_as::<_, Image>(&query)
            .bind(&input.url)
            .bind(&input.image_type)
            .bind(&input.status)
            .bind(input.property_id)
            .bind(input.room_id)
            .bind(input.product_id)
            .bind(input.product_specification_id)
            .bind(input.drawing_id)
            .fetch_one(pool)
            .await?;
        Ok(image)
    }

    /// Find an image by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Image>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM images WHERE id = $1");
        sqlx::query_as::<_, Image>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all images attached to one entity, in creation order.
    pub async fn list_by_parent(
        pool: &PgPool,
        parent: EntityRef,
    ) -> Result<Vec<Image>, RepoError> {
        let column = match parent {
            EntityRef::Property(_) => "property_id",
            EntityRef::Room(_) => "room_id",
            EntityRef::Product(_) => "product_id",
            EntityRef::Specification(_) => "product_specification_id",
            EntityRef::Drawing(_) => "drawing_id",
            EntityRef::Dimension(_) | EntityRef::Image(_) => {
                return Err(RepoError::Core(roomspec_core::error::CoreError::Validation(
                    format!("Images cannot be attached to a {}", parent.kind().as_str()),
                )))
            }
        };
        let query = format!("SELECT {COLUMNS} FROM images WHERE {column} = $1 ORDER BY id");
        let images = sqlx::query_as::<_, Image>(&query)
            .bind(parent.id())
            .fetch_all(pool)
            .await?;
        Ok(images)
    }

    /// Update an image's url, type, or upload status.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateImage,
    ) -> Result<Option<Image>, RepoError> {
        if let Some(image_type) = &input.image_type {
            ImageType::from_str_value(image_type)?;
        }
        if let Some(status) = &input.status {
            ImageStatus::from_str_value(status)?;
        }
        let query = format!(
            "UPDATE images SET
                url = COALESCE($2, url),
                image_type = COALESCE($3, image_type),
                status = COALESCE($4, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let image = sqlx::query_as::<_, Image>(&query)
            .bind(id)
            .bind(&input.url)
            .bind(&input.image_type)
            .bind(&input.status)
            .fetch_optional(pool)
            .await?;
        Ok(image)
    }

    /// Delete an image by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
