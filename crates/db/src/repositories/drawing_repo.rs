//! Repository for the `drawings` table.

use roomspec_core::types::DbId;
use sqlx::PgPool;

use crate::models::drawing::{CreateDrawing, Drawing, UpdateDrawing};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, property_id, title, created_at, updated_at";

/// Provides CRUD operations for drawings.
pub struct DrawingRepo;

impl DrawingRepo {
    /// Insert a new drawing, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDrawing) -> Result<Drawing, sqlx::Error> {
        let query = format!(
            "INSERT INTO drawings (property_id, title)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Drawing>(&query)
            .bind(input.property_id)
            .bind(&input.title)
            .fetch_one(pool)
            .await
    }

    /// Find a drawing by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Drawing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM drawings WHERE id = $1");
        sqlx::query_as::<_, Drawing>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all drawings of a property, in creation order.
    pub async fn list_by_property(
        pool: &PgPool,
        property_id: DbId,
    ) -> Result<Vec<Drawing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM drawings WHERE property_id = $1 ORDER BY id");
        sqlx::query_as::<_, Drawing>(&query)
            .bind(property_id)
            .fetch_all(pool)
            .await
    }

    /// Update a drawing. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDrawing,
    ) -> Result<Option<Drawing>, sqlx::Error> {
        let query = format!(
            "UPDATE drawings SET
                title = COALESCE($2, title),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Drawing>(&query)
            .bind(id)
            .bind(&input.title)
            .fetch_optional(pool)
            .await
    }

    /// Delete a drawing by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM drawings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
