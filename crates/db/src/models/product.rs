//! Product entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::types::{DbId, Timestamp};
use validator::Validate;

/// A product row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a product. Every field except `description` is required.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 2, max = 10, message = "Name must be 2-10 characters"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(exclusive_min = 1.0, message = "Price must be greater than 1"))]
    pub price: f64,
    pub stock: bool,
}

/// DTO for a full replacement (`PUT`). Same shape and rules as creation;
/// an omitted `description` clears the stored one.
pub type UpdateProduct = CreateProduct;

/// DTO for a partial update (`PATCH`). Only fields that are present overwrite
/// the stored row; omitted fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PatchProduct {
    #[validate(length(min = 2, max = 10, message = "Name must be 2-10 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(exclusive_min = 1.0, message = "Price must be greater than 1"))]
    pub price: Option<f64>,
    pub stock: Option<bool>,
}

impl PatchProduct {
    /// True when the request carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock.is_none()
    }
}
