//! Repository for the `product_dimensions` table.

use roomspec_core::types::DbId;
use sqlx::PgPool;

use crate::models::product::{CreateProductDimension, ProductDimension, UpdateProductDimension};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, product_id, label, value_mm, created_at, updated_at";

/// Provides CRUD operations for product dimension entries.
pub struct ProductDimensionRepo;

impl ProductDimensionRepo {
    /// Insert a new dimension entry, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProductDimension,
    ) -> Result<ProductDimension, sqlx::Error> {
        let query = format!(
            "INSERT INTO product_dimensions (product_id, label, value_mm)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductDimension>(&query)
            .bind(input.product_id)
            .bind(&input.label)
            .bind(input.value_mm)
            .fetch_one(pool)
            .await
    }

    /// Find a dimension entry by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProductDimension>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM product_dimensions WHERE id = $1");
        sqlx::query_as::<_, ProductDimension>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all dimension entries of a product, in creation order.
    pub async fn list_by_product(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<ProductDimension>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM product_dimensions WHERE product_id = $1 ORDER BY id");
        sqlx::query_as::<_, ProductDimension>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    /// Update a dimension entry. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProductDimension,
    ) -> Result<Option<ProductDimension>, sqlx::Error> {
        let query = format!(
            "UPDATE product_dimensions SET
                label = COALESCE($2, label),
                value_mm = COALESCE($3, value_mm),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductDimension>(&query)
            .bind(id)
            .bind(&input.label)
            .bind(input.value_mm)
            .fetch_optional(pool)
            .await
    }

    /// Delete a dimension entry by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM product_dimensions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
