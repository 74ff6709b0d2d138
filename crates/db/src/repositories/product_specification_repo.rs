//! Repository for the `product_specifications` table.

use roomspec_core::types::DbId;
use sqlx::PgPool;

use crate::models::product::{
    CreateProductSpecification, ProductSpecification, UpdateProductSpecification,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, product_id, label, value, created_at, updated_at";

/// Provides CRUD operations for product specification entries.
pub struct ProductSpecificationRepo;

impl ProductSpecificationRepo {
    /// Insert a new specification entry, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProductSpecification,
    ) -> Result<ProductSpecification, sqlx::Error> {
        let query = format!(
            "INSERT INTO product_specifications (product_id, label, value)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductSpecification>(&query)
            .bind(input.product_id)
            .bind(&input.label)
            .bind(&input.value)
            .fetch_one(pool)
            .await
    }

    /// Find a specification entry by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProductSpecification>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM product_specifications WHERE id = $1");
        sqlx::query_as::<_, ProductSpecification>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all specification entries of a product, in creation order.
    pub async fn list_by_product(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<ProductSpecification>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM product_specifications WHERE product_id = $1 ORDER BY id");
        sqlx::query_as::<_, ProductSpecification>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    /// Update a specification entry. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProductSpecification,
    ) -> Result<Option<ProductSpecification>, sqlx::Error> {
        let query = format!(
            "UPDATE product_specifications SET
                label = COALESCE($2, label),
                value = COALESCE($3, value),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductSpecification>(&query)
            .bind(id)
            .bind(&input.label)
            .bind(&input.value)
            .fetch_optional(pool)
            .await
    }

    /// Delete a specification entry by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM product_specifications WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
