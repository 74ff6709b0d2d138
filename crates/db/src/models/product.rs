//! Product entity models and DTOs.
//!
//! Covers three related tables:
//! - `products` -- products placed in a room
//! - `product_specifications` -- labelled key/value spec entries
//! - `product_dimensions` -- typed measurements in millimetres

use roomspec_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Product
// ---------------------------------------------------------------------------

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub room_id: DbId,
    pub name: String,
    pub category: Option<String>,
    pub maker: Option<String>,
    pub model_number: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new product.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProduct {
    pub room_id: DbId,
    pub name: String,
    pub category: Option<String>,
    pub maker: Option<String>,
    pub model_number: Option<String>,
}

/// DTO for updating an existing product. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub category: Option<String>,
    pub maker: Option<String>,
    pub model_number: Option<String>,
}

// ---------------------------------------------------------------------------
// ProductSpecification
// ---------------------------------------------------------------------------

/// A row from the `product_specifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductSpecification {
    pub id: DbId,
    pub product_id: DbId,
    pub label: String,
    pub value: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new specification entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductSpecification {
    pub product_id: DbId,
    pub label: String,
    pub value: String,
}

/// DTO for updating a specification entry.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProductSpecification {
    pub label: Option<String>,
    pub value: Option<String>,
}

// ---------------------------------------------------------------------------
// ProductDimension
// ---------------------------------------------------------------------------

/// A row from the `product_dimensions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductDimension {
    pub id: DbId,
    pub product_id: DbId,
    /// What is measured, e.g. `width`, `depth`, `seat height`.
    pub label: String,
    pub value_mm: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new dimension entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductDimension {
    pub product_id: DbId,
    pub label: String,
    pub value_mm: f64,
}

/// DTO for updating a dimension entry.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProductDimension {
    pub label: Option<String>,
    pub value_mm: Option<f64>,
}
